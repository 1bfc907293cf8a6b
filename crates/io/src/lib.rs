// File I/O operations

pub mod csv;
pub mod table;

pub use table::{Table, TableError, Value};
