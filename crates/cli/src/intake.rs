//! File intake: upload reference → bytes → non-empty table.

use std::fmt;

use visibot_io::{Table, TableError};
use visibot_telegram::TelegramError;

use crate::event::FileRef;
use crate::messages;
use crate::transport::Transport;

/// Upload refused before prediction. Each maps to one fixed user reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    NoAttachment,
    Unparseable(TableError),
    TooLarge { size: u64, limit: u64 },
    ZeroRecords,
}

impl Rejection {
    pub fn reply(&self) -> &'static str {
        match self {
            Rejection::NoAttachment => messages::NO_ATTACHMENT,
            Rejection::Unparseable(_) | Rejection::TooLarge { .. } => messages::PARSE_FAILURE,
            Rejection::ZeroRecords => messages::ZERO_RECORDS,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoAttachment => write!(f, "no attachment"),
            Rejection::Unparseable(e) => write!(f, "unparseable upload: {e}"),
            Rejection::TooLarge { size, limit } => write!(f, "upload of {size} bytes exceeds {limit}"),
            Rejection::ZeroRecords => write!(f, "upload has 0 records"),
        }
    }
}

#[derive(Debug)]
pub enum IntakeError {
    Rejected(Rejection),
    Transport(TelegramError),
}

impl From<Rejection> for IntakeError {
    fn from(r: Rejection) -> Self {
        IntakeError::Rejected(r)
    }
}

/// Resolve an upload to a validated table.
pub fn receive(file: Option<&FileRef>, transport: &dyn Transport) -> Result<Table, IntakeError> {
    let file = file.ok_or(Rejection::NoAttachment)?;

    let bytes = match transport.fetch_file(file) {
        Ok(bytes) => bytes,
        Err(TelegramError::TooLarge { size, limit }) => {
            return Err(Rejection::TooLarge { size, limit }.into())
        }
        Err(e) => return Err(IntakeError::Transport(e)),
    };
    log::debug!(
        "Fetched {} ({} bytes)",
        file.file_name.as_deref().unwrap_or(&file.file_id),
        bytes.len()
    );

    Ok(validate(&bytes)?)
}

/// Parse bytes as comma-separated data with a header row; require ≥1 row.
pub fn validate(bytes: &[u8]) -> Result<Table, Rejection> {
    let table = visibot_io::csv::parse(bytes).map_err(Rejection::Unparseable)?;
    if table.is_empty() {
        return Err(Rejection::ZeroRecords);
    }
    Ok(table)
}
