// In-memory table parsed from an upload

use std::fmt;

/// A single parsed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Empty,
}

impl Value {
    /// Classify a raw (already trimmed) field.
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            return Value::Empty;
        }
        match field.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(field.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Empty => Ok(()),
        }
    }
}

/// Rectangular table: named columns, every row has one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, checking that every row matches the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        if headers.is_empty() {
            return Err(TableError::Empty);
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(TableError::Malformed {
                    line: idx as u64 + 2,
                    message: format!(
                        "expected {} fields, found {}",
                        headers.len(),
                        row.len()
                    ),
                });
            }
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// Why an upload could not be turned into a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// No header row at all (empty input).
    Empty,
    /// Bytes are not valid UTF-8.
    Encoding(String),
    /// A header cell is blank.
    BlankHeader { column: usize },
    /// The same header name appears twice.
    DuplicateHeader(String),
    /// Row width mismatch or a CSV syntax error.
    Malformed { line: u64, message: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no header row"),
            Self::Encoding(msg) => write!(f, "not valid UTF-8: {msg}"),
            Self::BlankHeader { column } => write!(f, "column {} has a blank header", column + 1),
            Self::DuplicateHeader(name) => write!(f, "duplicate column '{name}'"),
            Self::Malformed { line, message } => write!(f, "line {line}: {message}"),
        }
    }
}

impl std::error::Error for TableError {}
