//! # Tile-Match Solver Library
//!
//! This library models a tile-matching board puzzle and provides a
//! brute-force solver that finds the token placement with the highest
//! match score.
//!
//! A board is a set of columns of colored tiles. Every row has a target of
//! one or two colors, and the score counts the tiles that hit their row's
//! target. Spending a token "bumps" a column: a token tile is inserted at the
//! bottom and the column's tiles move up one row.
//!
//! It is used by two binaries:
//! - `tilematch_solver`: builds a random (or file-defined) puzzle, runs the
//!   solver and prints the best placement.
//! - `bump_demo`: walks through bumping columns of a fixed board.
//!
//! ## Modules
//! - `engine`: tiles (`Tile`), row targets (`RowMatch`, `RowMatches`), columns
//!   (`Column`) and the board itself (`Puzzle`), with scoring and duplication.
//! - `config`: construction options for a `Puzzle`.
//! - `solver`: the combination sweep (`Solver`) and the combination counts.
//! - `render`: ANSI rendering of a puzzle for the terminal.
//! - `utils`: parsing of columns, row targets and board files from text.
//! - `error`: the crate's error type.

pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod solver;
pub mod utils;

pub use crate::error::{PuzzleError, Result};
