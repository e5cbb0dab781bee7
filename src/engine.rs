//! Core puzzle model.
//!
//! This module defines the puzzle's fundamental components:
//! - `Tile`: the content of a single cell.
//! - `RowMatch` / `RowMatches`: the target color(s) each row is scored against.
//! - `Column`: one vertical lane of tiles, mutated only by bumping a token in.
//! - `Puzzle`: the board itself, with its token budget, scoring and duplication.
//!
//! Columns are stored bottom-up: index 0 of a column is row 0 of the board.
use crate::config::PuzzleConfig;
use crate::error::{PuzzleError, Result};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Arc;

/// Represents the content of one cell of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Nothing in this cell.
    Empty,
    /// A token placed by bumping the column.
    Token,
    /// Represents a red tile.
    Red,
    /// Represents a green tile.
    Green,
    /// Represents a blue tile.
    Blue,
    /// Represents a purple tile.
    Purple,
}

impl Tile {
    /// The four colored tiles, the only values random generation produces.
    pub const COLORS: [Tile; 4] = [Tile::Red, Tile::Green, Tile::Blue, Tile::Purple];

    /// Draws one of the four colors uniformly.
    pub fn random(rng: &mut impl Rng) -> Tile {
        Tile::COLORS[rng.gen_range(0..Tile::COLORS.len())]
    }

    /// Draws two distinct colors, resampling the second until it differs from the first.
    pub fn random_pair(rng: &mut impl Rng) -> (Tile, Tile) {
        let first = Tile::random(rng);
        let mut second = Tile::random(rng);
        while second == first {
            second = Tile::random(rng);
        }
        (first, second)
    }

    /// Returns `true` for the four colored tiles.
    pub fn is_color(&self) -> bool {
        !matches!(self, Tile::Empty | Tile::Token)
    }

    /// Converts the tile to its character representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilematch_solver::engine::Tile;
    /// assert_eq!(Tile::Red.to_char(), 'R');
    /// assert_eq!(Tile::Empty.to_char(), '.');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Token => 'T',
            Tile::Red => 'R',
            Tile::Green => 'G',
            Tile::Blue => 'B',
            Tile::Purple => 'P',
        }
    }

    /// Inverse of [`Tile::to_char`]. Returns `None` for unknown characters.
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Tile::Empty),
            'T' => Some(Tile::Token),
            'R' => Some(Tile::Red),
            'G' => Some(Tile::Green),
            'B' => Some(Tile::Blue),
            'P' => Some(Tile::Purple),
            _ => None,
        }
    }
}

/// Target pattern a single row is scored against: one color, or two distinct colors.
///
/// The constructors guarantee that targets are colors and that a pair never
/// repeats a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowMatch {
    first: Tile,
    second: Option<Tile>,
}

impl RowMatch {
    /// A row target satisfied by a single color.
    pub fn single(tile: Tile) -> Result<Self> {
        if !tile.is_color() {
            return Err(PuzzleError::InvalidArgument(format!(
                "row match target must be a color, got {:?}",
                tile
            )));
        }
        Ok(RowMatch {
            first: tile,
            second: None,
        })
    }

    /// A row target satisfied by either of two distinct colors.
    pub fn pair(first: Tile, second: Tile) -> Result<Self> {
        if !first.is_color() || !second.is_color() {
            return Err(PuzzleError::InvalidArgument(format!(
                "row match targets must be colors, got {:?} and {:?}",
                first, second
            )));
        }
        if first == second {
            return Err(PuzzleError::InvalidArgument(format!(
                "row match pair repeats {:?}",
                first
            )));
        }
        Ok(RowMatch {
            first,
            second: Some(second),
        })
    }

    /// Single or pair on a fair coin flip; pairs always hold two distinct colors.
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            RowMatch {
                first: Tile::random(rng),
                second: None,
            }
        } else {
            let (first, second) = Tile::random_pair(rng);
            RowMatch {
                first,
                second: Some(second),
            }
        }
    }

    /// Returns `true` if `tile` is one of this row's targets.
    pub fn contains(&self, tile: Tile) -> bool {
        tile == self.first || self.second == Some(tile)
    }

    pub fn first(&self) -> Tile {
        self.first
    }

    pub fn second(&self) -> Option<Tile> {
        self.second
    }

    pub fn is_pair(&self) -> bool {
        self.second.is_some()
    }
}

/// The row targets of a board, one per row, frozen after creation.
///
/// Cloning shares the underlying storage, which is never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowMatches {
    values: Arc<[RowMatch]>,
}

impl RowMatches {
    pub fn new(values: Vec<RowMatch>) -> Self {
        RowMatches {
            values: values.into(),
        }
    }

    /// Generates `count` independent row targets.
    pub fn random(count: usize, rng: &mut impl Rng) -> Self {
        RowMatches::new((0..count).map(|_| RowMatch::random(rng)).collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the target of row `row`, if the row exists.
    pub fn get(&self, row: usize) -> Option<&RowMatch> {
        self.values.get(row)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RowMatch> {
        self.values.iter()
    }
}

/// One vertical lane of the board.
///
/// A column keeps its current tiles alongside an immutable snapshot of the
/// tiles it was created with. Only [`Column::bump`] changes the current
/// tiles, and it never changes their count.
///
/// Equality compares the current tiles only.
#[derive(Clone, Debug)]
pub struct Column {
    tiles: Vec<Tile>,
    original: Arc<[Tile]>,
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for Column {}

impl Column {
    /// Creates a column from bottom-up tile values; the snapshot equals `tiles`.
    pub fn new(tiles: Vec<Tile>) -> Self {
        Column {
            original: Arc::from(tiles.as_slice()),
            tiles,
        }
    }

    /// Creates a column of `height` empty tiles.
    pub fn generate_empty(height: usize) -> Self {
        Column::new(vec![Tile::Empty; height])
    }

    /// Creates a column of `height` random colors with no empty cells.
    pub fn generate_random_full(height: usize, rng: &mut impl Rng) -> Self {
        Column::new((0..height).map(|_| Tile::random(rng)).collect())
    }

    /// Creates a column whose random colored prefix has a random depth.
    ///
    /// The column is filled with `height` random colors, then every cell at
    /// index `r` or above is emptied, where `r` is drawn uniformly from
    /// `[1, up_to]`. With `up_to == 0` the column is entirely empty.
    ///
    /// # Arguments
    /// * `height`: Number of cells in the column.
    /// * `up_to`: Upper bound for the depth of the colored prefix.
    /// * `rng`: Source of randomness.
    ///
    /// # Returns
    /// * `Ok(Column)` with exactly `height` tiles.
    /// * `Err(PuzzleError::InvalidArgument)` if `up_to > height`.
    pub fn generate_random(height: usize, up_to: usize, rng: &mut impl Rng) -> Result<Self> {
        if up_to > height {
            return Err(PuzzleError::InvalidArgument(format!(
                "up_to '{}' must be equal or less than height '{}'",
                up_to, height
            )));
        }
        if up_to == 0 {
            return Ok(Column::generate_empty(height));
        }

        let Column { mut tiles, .. } = Column::generate_random_full(height, rng);
        let depth = rng.gen_range(1..=up_to);
        tiles[depth..].fill(Tile::Empty);
        Ok(Column::new(tiles))
    }

    /// Inserts a token at the bottom of the column.
    ///
    /// Existing tiles move up by one and the topmost tile drops off, so the
    /// height of the column is unchanged.
    pub fn bump(&mut self) -> &mut Self {
        if self.tiles.is_empty() {
            return self;
        }
        self.tiles.rotate_right(1);
        self.tiles[0] = Tile::Token;
        self
    }

    /// Returns an independent copy built from the current or the original tiles.
    ///
    /// The copy's own snapshot is the tiles it was built from.
    pub fn duplicate(&self, use_original: bool) -> Column {
        if use_original {
            Column {
                tiles: self.original.to_vec(),
                original: Arc::clone(&self.original),
            }
        } else {
            Column::new(self.tiles.clone())
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index).copied()
    }

    /// Current tiles, bottom first.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tiles as they were when this column was created.
    pub fn original(&self) -> &[Tile] {
        &self.original
    }

    pub fn contains_token(&self) -> bool {
        self.tiles.contains(&Tile::Token)
    }
}

/// A tile-matching board with a token budget.
///
/// The score is never stored; it is recomputed from the current columns on
/// every call to [`Puzzle::score`].
///
/// # Examples
/// ```
/// use tilematch_solver::config::PuzzleConfig;
/// use tilematch_solver::engine::Puzzle;
///
/// let mut puzzle = Puzzle::with_seed(PuzzleConfig::new(4, 6).with_starting_tokens(2), 7).unwrap();
/// assert_eq!(puzzle.tokens_available(), 2);
///
/// // Three bumps requested, only two tokens to spend.
/// let spent = puzzle.bump_column(&[0, 1, 3]).unwrap();
/// assert_eq!(spent, 2);
/// assert_eq!(puzzle.tokens_available(), 0);
///
/// // A reset copy starts again from the columns the puzzle was built with.
/// let fresh = puzzle.duplicate_original();
/// assert_eq!(fresh.tokens_available(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Puzzle {
    width: usize,
    length: usize,
    up_to: usize,
    starting_tokens: u32,
    used_tokens: u32,
    columns: Vec<Column>,
    row_matches: RowMatches,
}

impl Puzzle {
    /// Builds a puzzle from `config`, drawing any missing parts from `rng`.
    ///
    /// Preset columns are copied by their current values, and those values
    /// become the puzzle's original snapshot.
    ///
    /// # Returns
    /// * `Err(PuzzleError::InvalidArgument)` if the dimensions are zero, `up_to`
    ///   exceeds `length`, or presets do not fit the dimensions.
    /// * `Err(PuzzleError::InvariantViolation)` if a preset column already holds a token.
    pub fn new(config: PuzzleConfig, rng: &mut impl Rng) -> Result<Self> {
        let PuzzleConfig {
            width,
            length,
            up_to,
            starting_tokens,
            row_matches,
            columns,
        } = config;

        if width == 0 || length == 0 {
            return Err(PuzzleError::InvalidArgument(format!(
                "puzzle dimensions must be positive, got {}x{}",
                width, length
            )));
        }
        let up_to = up_to.unwrap_or(length);
        if up_to > length {
            return Err(PuzzleError::InvalidArgument(format!(
                "up_to '{}' must be equal or less than length '{}'",
                up_to, length
            )));
        }

        let columns: Vec<Column> = match columns {
            Some(columns) => {
                if columns.len() != width {
                    return Err(PuzzleError::InvalidArgument(format!(
                        "expected {} columns, got {}",
                        width,
                        columns.len()
                    )));
                }
                if let Some((i, column)) = columns.iter().enumerate().find(|(_, c)| c.len() != length) {
                    return Err(PuzzleError::InvalidArgument(format!(
                        "column {} has {} tiles, expected {}",
                        i,
                        column.len(),
                        length
                    )));
                }
                columns.iter().map(|c| c.duplicate(false)).collect()
            }
            None => (0..width)
                .map(|_| Column::generate_random(length, up_to, rng))
                .collect::<Result<Vec<_>>>()?,
        };

        let row_matches = match row_matches {
            Some(row_matches) if row_matches.len() != length => {
                return Err(PuzzleError::InvalidArgument(format!(
                    "expected {} row matches, got {}",
                    length,
                    row_matches.len()
                )));
            }
            Some(row_matches) => row_matches,
            None => RowMatches::random(length, rng),
        };

        if let Some(i) = columns.iter().position(Column::contains_token) {
            return Err(PuzzleError::InvariantViolation(format!(
                "column {} holds a token before any token was spent",
                i
            )));
        }

        let puzzle = Puzzle::assemble(width, length, up_to, starting_tokens, columns, row_matches)?;
        debug!("built {}", puzzle);
        Ok(puzzle)
    }

    /// Builds a puzzle from `config` using a `SmallRng` seeded with `seed`.
    pub fn with_seed(config: PuzzleConfig, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        Puzzle::new(config, &mut rng)
    }

    fn assemble(
        width: usize,
        length: usize,
        up_to: usize,
        starting_tokens: u32,
        columns: Vec<Column>,
        row_matches: RowMatches,
    ) -> Result<Self> {
        let puzzle = Puzzle {
            width,
            length,
            up_to,
            starting_tokens,
            used_tokens: 0,
            columns,
            row_matches,
        };
        if puzzle.tokens_available() != puzzle.starting_tokens {
            return Err(PuzzleError::InvariantViolation(format!(
                "new puzzle has {} of {} tokens available",
                puzzle.tokens_available(),
                puzzle.starting_tokens
            )));
        }
        Ok(puzzle)
    }

    fn duplicate_from(&self, use_original: bool) -> Puzzle {
        Puzzle {
            width: self.width,
            length: self.length,
            up_to: self.up_to,
            starting_tokens: self.starting_tokens,
            used_tokens: 0,
            columns: self.columns.iter().map(|c| c.duplicate(use_original)).collect(),
            row_matches: self.row_matches.clone(),
        }
    }

    /// Copy seeded from the current columns, with a full token budget.
    pub fn duplicate(&self) -> Puzzle {
        self.duplicate_from(false)
    }

    /// Copy seeded from the original columns, discarding every bump so far.
    pub fn duplicate_original(&self) -> Puzzle {
        self.duplicate_from(true)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn up_to(&self) -> usize {
        self.up_to
    }

    pub fn area(&self) -> usize {
        self.width * self.length
    }

    pub fn starting_tokens(&self) -> u32 {
        self.starting_tokens
    }

    pub fn used_tokens(&self) -> u32 {
        self.used_tokens
    }

    pub fn tokens_available(&self) -> u32 {
        self.starting_tokens - self.used_tokens
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn row_matches(&self) -> &RowMatches {
        &self.row_matches
    }

    /// Spends one token per index, bumping that column, until the budget runs out.
    ///
    /// Indices may repeat. Indices left over once the budget is exhausted are
    /// ignored.
    ///
    /// # Returns
    /// * `Ok(spent)` with the number of tokens actually spent.
    /// * `Err(PuzzleError::ColumnOutOfRange)` if any index is not a column; in
    ///   that case no column is bumped.
    pub fn bump_column(&mut self, indices: &[usize]) -> Result<u32> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.width) {
            return Err(PuzzleError::ColumnOutOfRange {
                index,
                width: self.width,
            });
        }

        let mut spent = 0;
        for &index in indices {
            if self.tokens_available() == 0 {
                break;
            }
            self.columns[index].bump();
            self.used_tokens += 1;
            spent += 1;
        }
        Ok(spent)
    }

    /// Row-major view of the board: `reorder()[row][column]`.
    pub fn reorder(&self) -> Vec<Vec<Tile>> {
        (0..self.length)
            .map(|row| self.columns.iter().map(|column| column.tiles()[row]).collect())
            .collect()
    }

    /// Returns `true` if the tile at (`row`, `column`) satisfies that row's target.
    ///
    /// # Panics
    /// Panics if `row` or `column` are outside the board.
    pub fn matches_at(&self, row: usize, column: usize) -> bool {
        let tile = self.columns[column].tiles()[row];
        self.row_matches.values[row].contains(tile)
    }

    /// Number of tiles that satisfy their row's target.
    pub fn score(&self) -> u32 {
        self.reorder()
            .iter()
            .zip(self.row_matches.iter())
            .map(|(row, row_match)| row.iter().filter(|&&tile| row_match.contains(tile)).count() as u32)
            .sum()
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Puzzle [width: {}, length: {}, area: {}, up_to: {}, starting_tokens: {}]",
            self.width,
            self.length,
            self.area(),
            self.up_to,
            self.starting_tokens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{columns_from_str_array, row_matches_from_str_array};
    use proptest::prelude::any;
    use proptest::{prop_assert, prop_assert_eq, proptest};

    fn sample_puzzle(starting_tokens: u32) -> Puzzle {
        let columns = columns_from_str_array(&["GBB..", "RP...", "GP...", "RGB..", "PPB.."]).unwrap();
        let row_matches = row_matches_from_str_array(&["G", "PG", "B", "R", "RB"]).unwrap();
        let config = PuzzleConfig::new(5, 5)
            .with_up_to(3)
            .with_starting_tokens(starting_tokens)
            .with_columns(columns)
            .with_row_matches(row_matches);
        Puzzle::with_seed(config, 0).unwrap()
    }

    #[test]
    fn test_tile_random_is_color() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..200 {
            assert!(Tile::random(&mut rng).is_color());
        }
    }

    #[test]
    fn test_tile_random_reaches_every_color() {
        let mut rng = SmallRng::seed_from_u64(7);
        let drawn: Vec<Tile> = (0..400).map(|_| Tile::random(&mut rng)).collect();
        for color in Tile::COLORS {
            assert!(drawn.contains(&color), "{:?} never drawn", color);
        }
    }

    #[test]
    fn test_tile_random_pair_distinct() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..200 {
            let (a, b) = Tile::random_pair(&mut rng);
            assert_ne!(a, b);
            assert!(a.is_color() && b.is_color());
        }
    }

    #[test]
    fn test_tile_char_round_trip() {
        for tile in [Tile::Empty, Tile::Token, Tile::Red, Tile::Green, Tile::Blue, Tile::Purple] {
            assert_eq!(Tile::from_char(tile.to_char()), Some(tile));
        }
        assert_eq!(Tile::from_char('x'), None);
    }

    #[test]
    fn test_row_match_contains() {
        let single = RowMatch::single(Tile::Red).unwrap();
        assert!(single.contains(Tile::Red));
        assert!(!single.contains(Tile::Blue));
        assert!(!single.contains(Tile::Empty));

        let pair = RowMatch::pair(Tile::Green, Tile::Purple).unwrap();
        assert!(pair.contains(Tile::Green));
        assert!(pair.contains(Tile::Purple));
        assert!(!pair.contains(Tile::Token));
    }

    #[test]
    fn test_row_match_rejects_bad_targets() {
        assert!(matches!(
            RowMatch::pair(Tile::Blue, Tile::Blue),
            Err(PuzzleError::InvalidArgument(_))
        ));
        assert!(RowMatch::single(Tile::Token).is_err());
        assert!(RowMatch::pair(Tile::Empty, Tile::Red).is_err());
    }

    #[test]
    fn test_row_matches_random_pairs_are_distinct() {
        let mut rng = SmallRng::seed_from_u64(3);
        let matches = RowMatches::random(100, &mut rng);
        assert_eq!(matches.len(), 100);
        assert!(matches.iter().any(RowMatch::is_pair));
        assert!(matches.iter().any(|m| !m.is_pair()));
        for m in matches.iter() {
            assert!(m.first().is_color());
            if let Some(second) = m.second() {
                assert_ne!(m.first(), second);
            }
        }
    }

    #[test]
    fn test_pair_order_does_not_change_score() {
        let columns = columns_from_str_array(&["RG", "GB"]).unwrap();
        let forward = RowMatches::new(vec![
            RowMatch::pair(Tile::Red, Tile::Green).unwrap(),
            RowMatch::pair(Tile::Green, Tile::Blue).unwrap(),
        ]);
        let backward = RowMatches::new(vec![
            RowMatch::pair(Tile::Green, Tile::Red).unwrap(),
            RowMatch::pair(Tile::Blue, Tile::Green).unwrap(),
        ]);
        let a = Puzzle::with_seed(
            PuzzleConfig::new(2, 2).with_columns(columns.clone()).with_row_matches(forward),
            0,
        )
        .unwrap();
        let b = Puzzle::with_seed(
            PuzzleConfig::new(2, 2).with_columns(columns).with_row_matches(backward),
            0,
        )
        .unwrap();
        assert_eq!(a.score(), 4);
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn test_generate_random_rejects_large_up_to() {
        let mut rng = SmallRng::seed_from_u64(4);
        let result = Column::generate_random(3, 4, &mut rng);
        assert!(matches!(result, Err(PuzzleError::InvalidArgument(_))));
    }

    #[test]
    fn test_generate_random_zero_up_to_is_empty() {
        let mut rng = SmallRng::seed_from_u64(5);
        let column = Column::generate_random(6, 0, &mut rng).unwrap();
        assert_eq!(column.len(), 6);
        assert!(column.tiles().iter().all(|&t| t == Tile::Empty));
    }

    #[test]
    fn test_generate_random_full_has_no_empty() {
        let mut rng = SmallRng::seed_from_u64(6);
        let column = Column::generate_random_full(8, &mut rng);
        assert!(column.tiles().iter().all(Tile::is_color));
    }

    proptest! {
        #[test]
        fn prop_generate_random_prefix(height in 0usize..20, up_to_seed in 0usize..20, seed in any::<u64>()) {
            let up_to = up_to_seed.min(height);
            let mut rng = SmallRng::seed_from_u64(seed);
            let column = Column::generate_random(height, up_to, &mut rng).unwrap();
            prop_assert_eq!(column.len(), height);

            let depth = column.tiles().iter().take_while(|t| t.is_color()).count();
            prop_assert!(column.tiles()[depth..].iter().all(|&t| t == Tile::Empty));
            if up_to == 0 {
                prop_assert_eq!(depth, 0);
            } else {
                prop_assert!(depth >= 1 && depth <= up_to);
            }
        }

        #[test]
        fn prop_bump_never_exceeds_budget(
            starting_tokens in 0u32..6,
            indices in proptest::collection::vec(0usize..5, 0..12),
        ) {
            let mut puzzle = sample_puzzle(starting_tokens);
            let spent = puzzle.bump_column(&indices).unwrap();
            let expected = (indices.len() as u32).min(starting_tokens);
            prop_assert_eq!(spent, expected);
            prop_assert_eq!(puzzle.used_tokens(), expected);
            prop_assert!(puzzle.used_tokens() <= puzzle.starting_tokens());
        }
    }

    #[test]
    fn test_column_bump_keeps_height() {
        let mut column = Column::new(vec![Tile::Red, Tile::Green, Tile::Empty]);
        column.bump();
        assert_eq!(column.tiles(), &[Tile::Token, Tile::Red, Tile::Green]);
        column.bump();
        assert_eq!(column.tiles(), &[Tile::Token, Tile::Token, Tile::Red]);
        assert_eq!(column.original(), &[Tile::Red, Tile::Green, Tile::Empty]);

        let mut empty = Column::new(Vec::new());
        empty.bump();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_column_duplicate_is_independent() {
        let mut source = Column::new(vec![Tile::Blue, Tile::Empty]);
        source.bump();

        let mut current = source.duplicate(false);
        let original = source.duplicate(true);
        assert_eq!(current.tiles(), &[Tile::Token, Tile::Blue]);
        assert_eq!(current.original(), current.tiles());
        assert_eq!(original.tiles(), &[Tile::Blue, Tile::Empty]);

        current.bump();
        assert_eq!(source.tiles(), &[Tile::Token, Tile::Blue]);
        source.bump();
        assert_eq!(current.tiles(), &[Tile::Token, Tile::Token]);
        assert_eq!(original.tiles(), &[Tile::Blue, Tile::Empty]);
    }

    #[test]
    fn test_new_random_puzzle() {
        let puzzle = Puzzle::with_seed(PuzzleConfig::new(5, 10), 514514).unwrap();
        assert_eq!(puzzle.columns().len(), 5);
        assert!(puzzle.columns().iter().all(|c| c.len() == 10));
        assert_eq!(puzzle.row_matches().len(), 10);
        assert_eq!(puzzle.up_to(), 10);
        assert_eq!(puzzle.area(), 50);
        assert_eq!(puzzle.tokens_available(), puzzle.starting_tokens());
        assert_eq!(puzzle.used_tokens(), 0);
        assert!(puzzle.columns().iter().all(|c| !c.contains_token()));
        // Every random column has at least one colored tile at the bottom.
        assert!(puzzle.columns().iter().all(|c| c.tiles()[0].is_color()));
    }

    #[test]
    fn test_new_random_puzzle_determinism() {
        let a = Puzzle::with_seed(PuzzleConfig::new(4, 7), 123).unwrap();
        let b = Puzzle::with_seed(PuzzleConfig::new(4, 7), 123).unwrap();
        assert_eq!(a.columns(), b.columns());
        assert_eq!(a.row_matches(), b.row_matches());
    }

    #[test]
    fn test_new_puzzle_rejects_bad_config() {
        let err = |config| Puzzle::with_seed(config, 0).unwrap_err();

        assert!(matches!(err(PuzzleConfig::new(0, 5)), PuzzleError::InvalidArgument(_)));
        assert!(matches!(err(PuzzleConfig::new(5, 0)), PuzzleError::InvalidArgument(_)));
        assert!(matches!(
            err(PuzzleConfig::new(2, 3).with_up_to(4)),
            PuzzleError::InvalidArgument(_)
        ));

        let columns = columns_from_str_array(&["RG.", "B.."]).unwrap();
        assert!(matches!(
            err(PuzzleConfig::new(3, 3).with_columns(columns.clone())),
            PuzzleError::InvalidArgument(_)
        ));
        assert!(matches!(
            err(PuzzleConfig::new(2, 4).with_columns(columns.clone())),
            PuzzleError::InvalidArgument(_)
        ));

        let short_matches = row_matches_from_str_array(&["R", "G"]).unwrap();
        assert!(matches!(
            err(PuzzleConfig::new(2, 3).with_columns(columns).with_row_matches(short_matches)),
            PuzzleError::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_new_puzzle_rejects_preset_tokens() {
        let columns = columns_from_str_array(&["TR", "GB"]).unwrap();
        let result = Puzzle::with_seed(PuzzleConfig::new(2, 2).with_columns(columns), 0);
        assert!(matches!(result, Err(PuzzleError::InvariantViolation(_))));
    }

    #[test]
    fn test_reorder_transposes() {
        let puzzle = sample_puzzle(2);
        let rows = puzzle.reorder();
        assert_eq!(rows.len(), 5);
        assert_eq!(
            rows[0],
            vec![Tile::Green, Tile::Red, Tile::Green, Tile::Red, Tile::Purple]
        );
        assert_eq!(
            rows[2],
            vec![Tile::Blue, Tile::Empty, Tile::Empty, Tile::Blue, Tile::Blue]
        );
        assert!(rows[4].iter().all(|&t| t == Tile::Empty));
    }

    #[test]
    fn test_score_and_bumps() {
        let mut puzzle = sample_puzzle(2);
        assert_eq!(puzzle.score(), 9);
        assert_eq!(puzzle.score(), 9);

        assert_eq!(puzzle.bump_column(&[2]).unwrap(), 1);
        assert_eq!(puzzle.score(), 8);

        assert_eq!(puzzle.bump_column(&[4]).unwrap(), 1);
        assert_eq!(puzzle.score(), 7);
        assert_eq!(puzzle.tokens_available(), 0);

        // Budget exhausted: silently ignored.
        let before = puzzle.columns().to_vec();
        assert_eq!(puzzle.bump_column(&[0, 1]).unwrap(), 0);
        assert_eq!(puzzle.columns(), before.as_slice());
        assert_eq!(puzzle.used_tokens(), 2);
    }

    #[test]
    fn test_bump_column_out_of_range_mutates_nothing() {
        let mut puzzle = sample_puzzle(5);
        let result = puzzle.bump_column(&[0, 5]);
        assert_eq!(result, Err(PuzzleError::ColumnOutOfRange { index: 5, width: 5 }));
        assert_eq!(puzzle.used_tokens(), 0);
        assert!(!puzzle.columns()[0].contains_token());
    }

    #[test]
    fn test_bump_same_column_repeatedly() {
        let mut puzzle = sample_puzzle(5);
        assert_eq!(puzzle.bump_column(&[1, 1, 1]).unwrap(), 3);
        assert_eq!(
            puzzle.column(1).unwrap().tiles(),
            &[Tile::Token, Tile::Token, Tile::Token, Tile::Red, Tile::Purple]
        );
    }

    #[test]
    fn test_matches_at() {
        let puzzle = sample_puzzle(2);
        assert!(puzzle.matches_at(0, 0));
        assert!(!puzzle.matches_at(0, 1));
        assert!(puzzle.matches_at(1, 3));
        assert!(!puzzle.matches_at(3, 0));
    }

    #[test]
    fn test_column_equality_ignores_snapshot() {
        let mut column = Column::new(vec![Tile::Green, Tile::Purple, Tile::Empty]);
        column.bump();
        let copy = column.duplicate(false);
        assert_eq!(copy, column);
        assert_ne!(copy.original(), column.original());
        assert_ne!(column.duplicate(true), column);
    }

    #[test]
    fn test_column_duplicate_original_shares_snapshot() {
        let mut column = Column::new(vec![Tile::Red, Tile::Blue, Tile::Empty]);
        column.bump();
        let reset = column.duplicate(true);
        assert_eq!(reset.tiles(), &[Tile::Red, Tile::Blue, Tile::Empty]);
        assert!(Arc::ptr_eq(&reset.original, &column.original));
    }

    #[test]
    fn test_duplicate_keeps_bumps_and_resets_budget() {
        let mut puzzle = sample_puzzle(2);
        puzzle.bump_column(&[2]).unwrap();

        let mut copy = puzzle.duplicate();
        assert_eq!(copy.used_tokens(), 0);
        assert_eq!(copy.tokens_available(), 2);
        assert_eq!(copy.columns(), puzzle.columns());
        assert_eq!(copy.score(), puzzle.score());

        copy.bump_column(&[0]).unwrap();
        assert!(!puzzle.columns()[0].contains_token());
        puzzle.bump_column(&[3]).unwrap();
        assert!(!copy.columns()[3].contains_token());

        // The copy's own snapshot is the bumped state it was made from.
        let reset = copy.duplicate_original();
        assert!(reset.columns()[2].contains_token());
        assert!(!reset.columns()[0].contains_token());
    }

    #[test]
    fn test_duplicate_original_discards_bumps() {
        let mut puzzle = sample_puzzle(3);
        let baseline = puzzle.score();
        puzzle.bump_column(&[2, 4]).unwrap();

        let mut fresh = puzzle.duplicate_original();
        assert_eq!(fresh.score(), baseline);
        assert_eq!(fresh.tokens_available(), fresh.starting_tokens());
        assert!(fresh.columns().iter().all(|c| !c.contains_token()));
        assert_eq!(fresh.row_matches(), puzzle.row_matches());

        fresh.bump_column(&[0, 0, 0]).unwrap();
        assert!(!puzzle.columns()[0].contains_token());
        assert_eq!(puzzle.used_tokens(), 2);
    }

    #[test]
    fn test_display_summary() {
        let puzzle = sample_puzzle(2);
        assert_eq!(
            puzzle.to_string(),
            "Puzzle [width: 5, length: 5, area: 25, up_to: 3, starting_tokens: 2]"
        );
    }
}
