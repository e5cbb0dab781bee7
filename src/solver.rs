use crate::engine::Puzzle;
use crate::error::{PuzzleError, Result};
use itertools::Itertools;
use log::{debug, trace};
use rayon::prelude::*;

/// Largest number of tokens a single combination spends.
pub const MAX_COMBINATION_SIZE: usize = 4;

/// One candidate explored by the solver.
#[derive(Clone, Debug)]
pub struct Trial {
    /// Column indices bumped, one token each, in order.
    pub combination: Vec<usize>,
    /// Score of `puzzle` after the bumps.
    pub score: u32,
    /// The puzzle the bumps were applied to.
    pub puzzle: Puzzle,
}

/// All combinations-with-replacement of `0..width`, sizes 1 through
/// `MAX_COMBINATION_SIZE`, ordered by size and then lexicographically.
///
/// # Examples
/// ```
/// use tilematch_solver::solver::possibilities;
///
/// let combinations = possibilities(2);
/// assert_eq!(combinations[..5], [vec![0], vec![1], vec![0, 0], vec![0, 1], vec![1, 1]]);
/// assert_eq!(combinations.len(), 14);
/// ```
pub fn possibilities(width: usize) -> Vec<Vec<usize>> {
    (1..=MAX_COMBINATION_SIZE)
        .flat_map(|size| (0..width).combinations_with_replacement(size))
        .collect()
}

fn binomial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result.checked_mul(u128::from(n - i))? / u128::from(i + 1);
    }
    u64::try_from(result).ok()
}

fn sum_multisets(width: usize, sizes: impl Iterator<Item = usize>) -> u64 {
    let width = width as u64;
    sizes
        .map(|k| {
            if width == 0 {
                return Some(0);
            }
            binomial(width + k as u64 - 1, k as u64)
        })
        .try_fold(0u64, |total, count| total.checked_add(count?))
        .unwrap_or(u64::MAX)
}

/// Closed-form length of [`possibilities`]: `sum C(width + k - 1, k)` for
/// `k` in `1..=MAX_COMBINATION_SIZE`.
pub fn possibility_count(width: usize) -> u64 {
    sum_multisets(width, 1..=MAX_COMBINATION_SIZE)
}

/// Combinations-with-replacement of `0..width` for every size from 1 to `width`.
///
/// This differs from [`possibility_count`] whenever `width != 4`. Saturates at
/// `u64::MAX`.
pub fn total_token_combinations(width: usize) -> u64 {
    sum_multisets(width, 1..=width)
}

fn run_trial(baseline: &Puzzle, combination: Vec<usize>) -> Result<Trial> {
    let mut puzzle = baseline.duplicate_original();
    if puzzle.tokens_available() != puzzle.starting_tokens() {
        return Err(PuzzleError::InternalConsistency(format!(
            "trial for {:?} starts with {} of {} tokens",
            combination,
            puzzle.tokens_available(),
            puzzle.starting_tokens()
        )));
    }

    puzzle.bump_column(&combination)?;
    let score = puzzle.score();
    trace!("combination {:?} scored {}", combination, score);
    Ok(Trial {
        combination,
        score,
        puzzle,
    })
}

/// Brute-force search for the token placement with the highest score.
///
/// Every combination from [`possibilities`] is applied to a fresh copy of the
/// baseline puzzle's original columns. The baseline itself is never mutated.
///
/// # Examples
/// ```
/// use tilematch_solver::config::PuzzleConfig;
/// use tilematch_solver::engine::Puzzle;
/// use tilematch_solver::solver::Solver;
///
/// let puzzle = Puzzle::with_seed(PuzzleConfig::new(3, 5), 42).unwrap();
/// let mut solver = Solver::new(&puzzle);
/// let best = solver.solve().unwrap();
///
/// assert!(best >= puzzle.score());
/// assert_eq!(solver.processed_puzzles().len(), 34);
/// ```
#[derive(Clone, Debug)]
pub struct Solver<'a> {
    puzzle: &'a Puzzle,
    target_score: Option<u32>,
    baseline_score: u32,
    highest_score: u32,
    highest_score_puzzle: Option<Puzzle>,
    best_combination: Option<Vec<usize>>,
    processed_puzzles: Vec<Trial>,
}

impl<'a> Solver<'a> {
    pub fn new(puzzle: &'a Puzzle) -> Self {
        let baseline_score = puzzle.score();
        Solver {
            puzzle,
            target_score: None,
            baseline_score,
            highest_score: baseline_score,
            highest_score_puzzle: None,
            best_combination: None,
            processed_puzzles: Vec::new(),
        }
    }

    /// Stops the sweep after the first trial scoring at least `target_score`.
    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.target_score = Some(target_score);
        self
    }

    pub fn puzzle(&self) -> &'a Puzzle {
        self.puzzle
    }

    /// Tokens available on the baseline puzzle.
    pub fn tokens(&self) -> u32 {
        self.puzzle.tokens_available()
    }

    pub fn possibilities(&self) -> Vec<Vec<usize>> {
        possibilities(self.puzzle.width())
    }

    pub fn possibility_count(&self) -> u64 {
        possibility_count(self.puzzle.width())
    }

    pub fn total_token_combinations(&self) -> u64 {
        total_token_combinations(self.puzzle.width())
    }

    /// Score of the baseline puzzle before any bump.
    pub fn baseline_score(&self) -> u32 {
        self.baseline_score
    }

    pub fn highest_score(&self) -> u32 {
        self.highest_score
    }

    /// The bumped puzzle that produced [`Solver::highest_score`], if any trial
    /// beat the baseline.
    pub fn highest_score_puzzle(&self) -> Option<&Puzzle> {
        self.highest_score_puzzle.as_ref()
    }

    pub fn best_combination(&self) -> Option<&[usize]> {
        self.best_combination.as_deref()
    }

    /// Every trial explored by the last sweep, in enumeration order.
    pub fn processed_puzzles(&self) -> &[Trial] {
        &self.processed_puzzles
    }

    fn reset(&mut self) {
        self.highest_score = self.baseline_score;
        self.highest_score_puzzle = None;
        self.best_combination = None;
        self.processed_puzzles.clear();
    }

    /// Records `trial` and returns `true` once the target score is reached.
    fn record(&mut self, trial: Trial) -> bool {
        if trial.score > self.highest_score {
            debug!(
                "new best score {} (was {}) with combination {:?}",
                trial.score, self.highest_score, trial.combination
            );
            self.highest_score = trial.score;
            self.highest_score_puzzle = Some(trial.puzzle.clone());
            self.best_combination = Some(trial.combination.clone());
        }
        let reached = self.target_score.is_some_and(|target| trial.score >= target);
        self.processed_puzzles.push(trial);
        reached
    }

    /// Runs every combination in order and returns the highest score found.
    ///
    /// # Returns
    /// * `Ok(score)`, never lower than the baseline score.
    /// * `Err(PuzzleError::InternalConsistency)` if a trial copy did not start
    ///   with its full token budget.
    pub fn solve(&mut self) -> Result<u32> {
        self.reset();
        let combinations = self.possibilities();
        debug!(
            "solving {} combinations over {} columns, baseline score {}",
            combinations.len(),
            self.puzzle.width(),
            self.baseline_score
        );

        for combination in combinations {
            let trial = run_trial(self.puzzle, combination)?;
            if self.record(trial) {
                debug!("target score reached");
                break;
            }
        }

        debug!(
            "explored {} trials, highest score {}",
            self.processed_puzzles.len(),
            self.highest_score
        );
        Ok(self.highest_score)
    }

    /// Same result as [`Solver::solve`], with trials evaluated on the rayon pool.
    ///
    /// Each worker scores its own copy of the baseline; the best score is then
    /// picked in enumeration order, so ties and the target score resolve
    /// exactly as in the sequential sweep.
    pub fn solve_parallel(&mut self) -> Result<u32> {
        self.reset();
        let puzzle = self.puzzle;
        let combinations = self.possibilities();
        debug!(
            "solving {} combinations over {} columns in parallel, baseline score {}",
            combinations.len(),
            puzzle.width(),
            self.baseline_score
        );

        let trials: Vec<Result<Trial>> = combinations
            .into_par_iter()
            .map(|combination| run_trial(puzzle, combination))
            .collect();

        for trial in trials {
            if self.record(trial?) {
                debug!("target score reached");
                break;
            }
        }

        debug!(
            "explored {} trials, highest score {}",
            self.processed_puzzles.len(),
            self.highest_score
        );
        Ok(self.highest_score)
    }
}
