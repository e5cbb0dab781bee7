//! Error type shared by the puzzle model, the solver and the board parser.

/// Errors produced while building, mutating or solving a puzzle.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// A construction option or argument is outside its accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// `bump_column` was given an index that does not name a column.
    #[error("column index {index} is out of range for a puzzle of width {width}")]
    ColumnOutOfRange { index: usize, width: usize },
    /// A freshly constructed puzzle failed its post-construction checks.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// A solver trial did not start from a clean state.
    #[error("internal consistency check failed: {0}")]
    InternalConsistency(String),
    /// Board text could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result alias used throughout the crate.
pub type Result<T, E = PuzzleError> = std::result::Result<T, E>;
