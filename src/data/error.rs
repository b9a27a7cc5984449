use thiserror::Error;

/// Raised by the loader when a raw table cannot become a canonical table.
/// Fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("{table} row {row}: missing value for '{column}'")]
    MissingValue {
        table: &'static str,
        row: usize,
        column: &'static str,
    },

    #[error("{table} row {row}: unrecognized {column} value '{value}'")]
    UnrecognizedLabel {
        table: &'static str,
        row: usize,
        column: &'static str,
        value: String,
    },
}
