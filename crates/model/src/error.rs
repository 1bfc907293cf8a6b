use std::fmt;

/// Failure loading the model artifact at startup.
#[derive(Debug)]
pub enum ModelError {
    /// Artifact file is absent or unreadable.
    Missing { path: String, message: String },
    /// JSON parse / deserialization error.
    Parse(String),
    /// Artifact parsed but is structurally unusable.
    Invalid(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path, message } => write!(f, "model artifact '{path}': {message}"),
            Self::Parse(msg) => write!(f, "model parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid model: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

/// The model refused an input table.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Column set differs from the model's feature list.
    Columns { missing: Vec<String>, unexpected: Vec<String> },
    /// A cell could not be used as a number.
    NotNumeric { row: usize, column: String, value: String },
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Columns { missing, unexpected } => {
                write!(f, "column mismatch")?;
                if !missing.is_empty() {
                    write!(f, "; missing: {}", missing.join(", "))?;
                }
                if !unexpected.is_empty() {
                    write!(f, "; unexpected: {}", unexpected.join(", "))?;
                }
                Ok(())
            }
            Self::NotNumeric { row, column, value } => {
                write!(f, "row {}, column '{column}': cannot use '{value}' as a number", row + 1)
            }
        }
    }
}

impl std::error::Error for PredictError {}
