// CSV import for uploaded files

use crate::table::{Table, TableError, Value};

/// Uploads are always comma-separated; the template users fill in is.
pub const DELIMITER: u8 = b',';

/// Parse raw upload bytes into a table. The first record is the header.
pub fn parse(bytes: &[u8]) -> Result<Table, TableError> {
    let content = decode_utf8(bytes)?;
    parse_str(content, DELIMITER)
}

/// Uploads must be UTF-8. A leading byte-order mark is dropped.
fn decode_utf8(bytes: &[u8]) -> Result<&str, TableError> {
    let content = std::str::from_utf8(bytes).map_err(|e| TableError::Encoding(e.to_string()))?;
    Ok(content.strip_prefix('\u{feff}').unwrap_or(content))
}

fn parse_str(content: &str, delimiter: u8) -> Result<Table, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(String::from)
        .collect();

    if headers.is_empty() {
        return Err(TableError::Empty);
    }
    for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() {
            return Err(TableError::BlankHeader { column: idx });
        }
        if headers[..idx].contains(name) {
            return Err(TableError::DuplicateHeader(name.clone()));
        }
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(malformed)?;
        rows.push(record.iter().map(Value::from_field).collect());
    }

    Table::new(headers, rows)
}

fn malformed(e: csv::Error) -> TableError {
    let line = e.position().map(|p| p.line()).unwrap_or(0);
    TableError::Malformed { line, message: e.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_rows() {
        let table = parse(b"T,Po,fog\n12.5,745.1,0\n-3,760,1\n").unwrap();
        assert_eq!(table.headers(), &["T", "Po", "fog"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some(&Value::Number(12.5)));
        assert_eq!(table.get(1, 2), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let table = parse(b"T,Po,fog\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert_eq!(parse(b"").unwrap_err(), TableError::Empty);
    }

    #[test]
    fn test_ragged_row_is_error() {
        let err = parse(b"a,b,c\n1,2,3\n4,5\n").unwrap_err();
        assert!(matches!(err, TableError::Malformed { .. }), "got {err:?}");
    }

    #[test]
    fn test_extra_field_is_error() {
        let err = parse(b"a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, TableError::Malformed { .. }), "got {err:?}");
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let err = parse(&[0x61, 0x2c, 0x62, 0x0a, 0xff, 0xfe, 0x2c, 0x31]).unwrap_err();
        assert!(matches!(err, TableError::Encoding(_)), "got {err:?}");
    }

    #[test]
    fn test_bom_is_stripped() {
        let table = parse("\u{feff}T,U\n1,2\n".as_bytes()).unwrap();
        assert_eq!(table.headers()[0], "T");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let table = parse(b" T , U \n 1 , 2 \n").unwrap();
        assert_eq!(table.headers(), &["T", "U"]);
        assert_eq!(table.get(0, 1), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_blank_header_is_error() {
        assert_eq!(
            parse(b"T,,U\n1,2,3\n").unwrap_err(),
            TableError::BlankHeader { column: 1 }
        );
    }

    #[test]
    fn test_duplicate_header_is_error() {
        assert_eq!(
            parse(b"T,U,T\n1,2,3\n").unwrap_err(),
            TableError::DuplicateHeader("T".into())
        );
    }

    #[test]
    fn test_text_and_empty_cells_survive_parsing() {
        let table = parse(b"T,U\nwarm,\n").unwrap();
        assert_eq!(table.get(0, 0), Some(&Value::Text("warm".into())));
        assert_eq!(table.get(0, 1), Some(&Value::Empty));
    }
}
