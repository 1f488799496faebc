use std::path::PathBuf;

/// Failures surfaced by the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The source file is missing, unreadable, malformed, or lacks a
    /// required column. Fatal at startup.
    #[error("data unavailable at {}: {reason}", path.display())]
    Unavailable { path: PathBuf, reason: String },

    /// A numeric column held a value that cannot be read as a number.
    #[error("column '{column}' holds non-numeric value '{value}'")]
    NumericCoercion { column: String, value: String },
}
