//! Prediction formatter: run the model on a validated table and render the reply.

use std::fmt::Write as _;

use visibot_io::Table;
use visibot_model::{PredictError, Regressor};

use crate::messages;

/// Why a validated table produced no reply text.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionFailure {
    Rejected(PredictError),
    /// The regressor broke its one-value-per-row contract.
    LengthMismatch { rows: usize, predictions: usize },
}

impl std::fmt::Display for PredictionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(e) => write!(f, "{e}"),
            Self::LengthMismatch { rows, predictions } => {
                write!(f, "{predictions} prediction(s) for {rows} row(s)")
            }
        }
    }
}

/// Predict and render. Only called with a non-empty table.
pub fn predict_reply(model: &dyn Regressor, table: &Table) -> Result<String, PredictionFailure> {
    let predictions = model.predict(table).map_err(PredictionFailure::Rejected)?;
    if predictions.len() != table.row_count() {
        return Err(PredictionFailure::LengthMismatch {
            rows: table.row_count(),
            predictions: predictions.len(),
        });
    }
    Ok(render(&predictions))
}

/// One value: a single line. Several: a header and 1-based numbered lines.
pub fn render(predictions: &[f64]) -> String {
    if let [value] = predictions {
        return format!("{} {:.1} {}.", messages::SINGLE_PREFIX, value, messages::UNIT);
    }

    let mut msg = String::from(messages::MULTI_HEADER);
    for (i, value) in predictions.iter().enumerate() {
        let _ = write!(msg, "\n{}) {:.1} {}", i + 1, value, messages::UNIT);
    }
    msg
}

/// Split a reply on line boundaries into messages of at most `limit`
/// characters. A single line longer than `limit` is cut mid-line.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut parts = Vec::new();
    // `open` is false until the current part holds at least one line.
    let mut current = String::new();
    let mut current_len = 0;
    let mut open = false;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        let sep = usize::from(open);
        if current_len + sep + line_len <= limit {
            if open {
                current.push('\n');
            }
            current.push_str(line);
            current_len += sep + line_len;
            open = true;
            continue;
        }

        if open {
            parts.push(std::mem::take(&mut current));
        }
        let mut chars = line.chars().peekable();
        loop {
            current = chars.by_ref().take(limit).collect();
            current_len = current.chars().count();
            if chars.peek().is_none() {
                break;
            }
            parts.push(std::mem::take(&mut current));
        }
        open = true;
    }
    if open {
        parts.push(current);
    }
    parts
}
