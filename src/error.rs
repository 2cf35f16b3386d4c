use thiserror::Error;

/// Failures that abort a conversion run. All variants are fatal; there is no
/// retry or partial-output recovery.
#[derive(Error, Debug)]
pub enum TransformError {
    /// A lookup key was absent from its reference table (strict join).
    #[error("{table} has no entry for key {key:?}")]
    MissingKey { table: &'static str, key: String },

    /// A ratio would divide by zero and no fallback is defined.
    #[error("row {row}: zero denominator computing {what}")]
    ZeroDenominator { row: usize, what: &'static str },

    /// A row is too short for its schema, or a numeric field failed to parse.
    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

impl TransformError {
    /// Shorthand for `MalformedRow` with a 1-based source line number.
    pub fn malformed(row: usize, reason: impl ToString) -> Self {
        TransformError::MalformedRow {
            row,
            reason: reason.to_string(),
        }
    }
}
