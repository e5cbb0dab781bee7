//! Terminal rendering of a puzzle.
//!
//! The core types only expose tiles and row targets; everything about glyph
//! layout and ANSI colors lives here.

use crate::engine::{Puzzle, RowMatch, Tile};

/// Returns the ANSI background color code used for a tile.
fn to_ansi_color_code(tile: Tile) -> &'static str {
    match tile {
        Tile::Empty => "40",
        Tile::Red => "41",
        Tile::Green => "42",
        Tile::Token => "43",
        Tile::Blue => "44",
        Tile::Purple => "45",
    }
}

/// Three-character label for a row target, e.g. `" R "` or `"R G"`.
pub fn row_match_label(row_match: &RowMatch) -> String {
    match row_match.second() {
        None => format!(" {} ", row_match.first().to_char()),
        Some(second) => format!("{} {}", row_match.first().to_char(), second.to_char()),
    }
}

/// Renders the board top row first, each row prefixed by its target.
///
/// Tiles matching their row are highlighted: bold when `use_color` is set,
/// bracketed otherwise.
///
/// # Examples
/// ```
/// use tilematch_solver::config::PuzzleConfig;
/// use tilematch_solver::engine::Puzzle;
/// use tilematch_solver::render::to_string_with_highlight;
/// use tilematch_solver::utils::{columns_from_str_array, row_matches_from_str_array};
///
/// let config = PuzzleConfig::new(2, 2)
///     .with_columns(columns_from_str_array(&["RG", "B."]).unwrap())
///     .with_row_matches(row_matches_from_str_array(&["RB", "G"]).unwrap());
/// let puzzle = Puzzle::with_seed(config, 0).unwrap();
///
/// assert_eq!(to_string_with_highlight(&puzzle, false), "| G |[G] . |\n|R B|[R][B]|");
/// ```
pub fn to_string_with_highlight(puzzle: &Puzzle, use_color: bool) -> String {
    let rows = puzzle.reorder();
    let mut output = String::new();

    for (r_idx, row) in rows.iter().enumerate().rev() {
        let row_match = puzzle
            .row_matches()
            .get(r_idx)
            .map(row_match_label)
            .unwrap_or_else(|| "   ".to_string());
        output.push('|');
        output.push_str(&row_match);
        output.push('|');

        for (c_idx, &tile) in row.iter().enumerate() {
            let is_match = puzzle.matches_at(r_idx, c_idx);
            let glyph = tile.to_char();
            if use_color {
                // Bold for matches, dim otherwise.
                let weight = if is_match { 1 } else { 2 };
                output.push_str(&format!(
                    "\x1b[{};{}m {} \x1b[m",
                    weight,
                    to_ansi_color_code(tile),
                    glyph
                ));
            } else if is_match {
                output.push_str(&format!("[{}]", glyph));
            } else {
                output.push_str(&format!(" {} ", glyph));
            }
        }
        output.push('|');
        if r_idx > 0 {
            output.push('\n');
        }
    }

    output
}

/// Colored rendering for terminal output.
pub fn render(puzzle: &Puzzle) -> String {
    to_string_with_highlight(puzzle, true)
}
