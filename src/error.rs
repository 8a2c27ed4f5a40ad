use crate::util::byte_size::InvalidByteSize;
use thiserror::Error;

/// Fatal input corruption found while parsing a report.
///
/// Any of these means the column layout probably changed underneath us, so
/// the whole parse is abandoned rather than producing wrong metrics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Percent-used column is neither "-" nor `<int>%`.
    #[error("line {line}: invalid percent-used field {field:?}")]
    InvalidPercent { line: usize, field: String },

    /// Size, used or available column is not a non-negative number.
    #[error("line {line}, column {column}: invalid byte count")]
    InvalidNumber {
        line:   usize,
        column: usize,
        #[source]
        source: InvalidByteSize,
    },

    #[error("unknown byte unit {0:?} (expected B, KB, MB, GB, TB or PB)")]
    UnknownUnit(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
