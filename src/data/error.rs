use thiserror::Error;

/// The raw table cannot back a session.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{column}' (accepted names: {accepted})")]
    MissingColumn {
        column: &'static str,
        accepted: String,
    },
    #[error("row {row}: column '{column}' has unsupported type {found}")]
    UnsupportedType {
        row: usize,
        column: &'static str,
        found: String,
    },
    #[error("row {row}: column '{column}' is null")]
    NullValue { row: usize, column: &'static str },
    #[error("row {row}: compensation {value} is not a finite non-negative amount")]
    InvalidCompensation { row: usize, value: f64 },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

/// A selection mutation that was rejected and left the state unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown facet '{0}'")]
    UnknownFacet(String),
}
