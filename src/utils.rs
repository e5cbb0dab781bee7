//! Parsing fixed boards from text.
//!
//! Tiles use the glyphs of [`Tile::to_char`]: `R`, `G`, `B`, `P` for the
//! colors, `T` for a token and `.` for an empty cell.

use crate::engine::{Column, RowMatch, RowMatches, Tile};
use crate::error::{PuzzleError, Result};

/// Line separating column lines from row-match lines in a board file.
pub const BOARD_SEPARATOR: &str = "--";

fn parse_error(line: usize, message: String) -> PuzzleError {
    PuzzleError::Parse { line, message }
}

fn tile_at(c: char, line: usize, position: usize) -> Result<Tile> {
    Tile::from_char(c).ok_or_else(|| {
        parse_error(
            line,
            format!("Unrecognized character '{}' at position {}", c, position),
        )
    })
}

/// Parses one column, bottom tile first.
///
/// # Examples
/// ```
/// use tilematch_solver::engine::Tile;
/// use tilematch_solver::utils::column_from_str;
///
/// let column = column_from_str("GB..").unwrap();
/// assert_eq!(column.tiles(), &[Tile::Green, Tile::Blue, Tile::Empty, Tile::Empty]);
/// assert!(column_from_str("GX").is_err());
/// ```
pub fn column_from_str(s: &str) -> Result<Column> {
    column_on_line(s, 0)
}

fn column_on_line(s: &str, line: usize) -> Result<Column> {
    let tiles = s
        .chars()
        .enumerate()
        .map(|(i, c)| tile_at(c, line, i))
        .collect::<Result<Vec<_>>>()?;
    Ok(Column::new(tiles))
}

fn push_column(columns: &mut Vec<Column>, column: Column, line: usize) -> Result<()> {
    if let Some(first) = columns.first() {
        if first.len() != column.len() {
            return Err(parse_error(
                line,
                format!("Column has {} tiles, expected {}", column.len(), first.len()),
            ));
        }
    }
    columns.push(column);
    Ok(())
}

/// Parses one column per string slice; every column must have the same height.
///
/// # Returns
/// * `Ok(Vec<Column>)` in the given order.
/// * `Err(PuzzleError::Parse)` on an unrecognized character or a column whose
///   height differs from the first one.
pub fn columns_from_str_array(s: &[&str]) -> Result<Vec<Column>> {
    let mut columns = Vec::with_capacity(s.len());
    for (i, column_str) in s.iter().enumerate() {
        push_column(&mut columns, column_on_line(column_str, i)?, i)?;
    }
    Ok(columns)
}

fn row_match_on_line(s: &str, line: usize) -> Result<RowMatch> {
    let tiles = s
        .chars()
        .enumerate()
        .map(|(i, c)| tile_at(c, line, i))
        .collect::<Result<Vec<_>>>()?;
    let row_match = match tiles.as_slice() {
        [single] => RowMatch::single(*single),
        [first, second] => RowMatch::pair(*first, *second),
        _ => {
            return Err(parse_error(
                line,
                format!("Row match needs 1 or 2 colors, found {}", tiles.len()),
            ))
        }
    };
    row_match.map_err(|e| parse_error(line, e.to_string()))
}

/// Parses one row target per string slice, row 0 first.
///
/// Each entry holds one color (`"R"`) or two distinct colors (`"RB"`).
///
/// # Examples
/// ```
/// use tilematch_solver::engine::Tile;
/// use tilematch_solver::utils::row_matches_from_str_array;
///
/// let matches = row_matches_from_str_array(&["G", "PB"]).unwrap();
/// assert!(matches.get(1).unwrap().contains(Tile::Blue));
/// assert!(row_matches_from_str_array(&["RR"]).is_err());
/// ```
pub fn row_matches_from_str_array(s: &[&str]) -> Result<RowMatches> {
    let values = s
        .iter()
        .enumerate()
        .map(|(i, row_str)| row_match_on_line(row_str, i))
        .collect::<Result<Vec<_>>>()?;
    Ok(RowMatches::new(values))
}

/// Parses a whole board: column lines, a `--` line, then row-match lines.
///
/// Lines are trimmed and blank lines are skipped. Line numbers in errors are
/// 1-based positions in `s`.
pub fn board_from_str(s: &str) -> Result<(Vec<Column>, RowMatches)> {
    let mut columns = Vec::new();
    let mut matches = Vec::new();
    let mut in_matches = false;

    for (i, line) in s.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == BOARD_SEPARATOR {
            if in_matches {
                return Err(parse_error(line_no, "Duplicate separator".to_string()));
            }
            in_matches = true;
            continue;
        }

        if in_matches {
            matches.push(row_match_on_line(line, line_no)?);
        } else {
            push_column(&mut columns, column_on_line(line, line_no)?, line_no)?;
        }
    }

    if !in_matches {
        return Err(parse_error(
            s.lines().count(),
            format!("Missing '{}' separator before row matches", BOARD_SEPARATOR),
        ));
    }
    Ok((columns, RowMatches::new(matches)))
}
