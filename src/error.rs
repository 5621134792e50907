//! Error types for the simulation engines and their collaborators

use thiserror::Error;

/// Failure of an amortization or buy-vs-rent run
///
/// Raised before a malformed record reaches the output sequence: parameter
/// problems at entry, numeric problems right after the offending month.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Parameter outside its valid domain
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Non-finite intermediate result
    #[error("non-finite {quantity} in month {month}")]
    NumericOverflow { month: u32, quantity: &'static str },
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Failure to read a human-formatted value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    /// Enter as 100000, $10,000, $100K or 100K
    #[error("`{0}` is not a number (enter as 100000, $10,000, $100K or 100K)")]
    InvalidNumber(String),

    #[error("entered {found} rates; enter {expected} rates, or 1 rate to denote fixed")]
    SeriesLength { expected: usize, found: usize },

    #[error("invalid rate range `{0}` (enter as 3-5)")]
    InvalidRange(String),
}

/// Failure while writing a CSV export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
