//! Construction options for a [`Puzzle`](crate::engine::Puzzle).

use crate::engine::{Column, RowMatches};

/// Token budget used when none is given.
pub const DEFAULT_STARTING_TOKENS: u32 = 5;
/// Default number of columns.
pub const DEFAULT_WIDTH: usize = 5;
/// Default number of rows.
pub const DEFAULT_LENGTH: usize = 10;

/// Options recognized when building a puzzle.
///
/// Anything left as `None` is generated randomly (columns, row matches) or
/// derived from the other fields (`up_to` falls back to `length`).
///
/// # Examples
/// ```
/// use tilematch_solver::config::PuzzleConfig;
///
/// let config = PuzzleConfig::new(3, 4).with_up_to(2).with_starting_tokens(1);
/// assert_eq!(config.width, 3);
/// assert_eq!(config.effective_up_to(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct PuzzleConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows (height of every column).
    pub length: usize,
    /// Upper bound for the depth of each randomly filled column prefix.
    pub up_to: Option<usize>,
    /// Number of bumps the puzzle may perform.
    pub starting_tokens: u32,
    /// Preset row targets, one per row.
    pub row_matches: Option<RowMatches>,
    /// Preset columns, one per column.
    pub columns: Option<Vec<Column>>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig::new(DEFAULT_WIDTH, DEFAULT_LENGTH)
    }
}

impl PuzzleConfig {
    /// Creates a configuration for a `width` x `length` board with default options.
    pub fn new(width: usize, length: usize) -> Self {
        PuzzleConfig {
            width,
            length,
            up_to: None,
            starting_tokens: DEFAULT_STARTING_TOKENS,
            row_matches: None,
            columns: None,
        }
    }

    pub fn with_up_to(mut self, up_to: usize) -> Self {
        self.up_to = Some(up_to);
        self
    }

    pub fn with_starting_tokens(mut self, starting_tokens: u32) -> Self {
        self.starting_tokens = starting_tokens;
        self
    }

    pub fn with_row_matches(mut self, row_matches: RowMatches) -> Self {
        self.row_matches = Some(row_matches);
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// The `up_to` bound actually used for column generation.
    pub fn effective_up_to(&self) -> usize {
        self.up_to.unwrap_or(self.length)
    }
}
