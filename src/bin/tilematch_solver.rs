use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use tilematch_solver::config::{
    PuzzleConfig, DEFAULT_LENGTH, DEFAULT_STARTING_TOKENS, DEFAULT_WIDTH,
};
use tilematch_solver::engine::Puzzle;
use tilematch_solver::render::render;
use tilematch_solver::solver::Solver;
use tilematch_solver::utils::board_from_str;

const SEPARATOR: &str = " - - - - -";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of columns
    #[clap(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Number of rows
    #[clap(short, long, default_value_t = DEFAULT_LENGTH)]
    length: usize,

    /// Upper bound for the depth of each random column (defaults to the number of rows)
    #[clap(short, long)]
    up_to: Option<usize>,

    /// Token budget of the puzzle
    #[clap(short, long, default_value_t = DEFAULT_STARTING_TOKENS)]
    tokens: u32,

    /// Seed for random generation; a random seed is used when omitted
    #[clap(short, long)]
    seed: Option<u64>,

    /// Path to a board file (column lines, a `--` line, then one row target per line).
    /// Width and length are taken from the file.
    #[clap(short, long)]
    board_file: Option<PathBuf>,

    /// Evaluate the combinations on all cores
    #[clap(short, long)]
    parallel: bool,

    /// Stop searching once a combination reaches this score
    #[clap(long)]
    target_score: Option<u32>,

    /// Number of explored combinations to print
    #[clap(long, default_value_t = 5)]
    show_trials: usize,
}

fn read_board_file(path: &PathBuf) -> anyhow::Result<PuzzleConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let (columns, row_matches) = board_from_str(&content)
        .with_context(|| format!("Invalid board format in {}", path.display()))?;

    let Some(first) = columns.first() else {
        bail!("Board file {} has no columns", path.display());
    };
    Ok(PuzzleConfig::new(columns.len(), first.len())
        .with_columns(columns)
        .with_row_matches(row_matches))
}

fn build_config(args: &Args) -> anyhow::Result<PuzzleConfig> {
    let config = match &args.board_file {
        Some(path) => read_board_file(path)?,
        None => PuzzleConfig::new(args.width, args.length),
    };
    let config = config.with_starting_tokens(args.tokens);
    Ok(match args.up_to {
        Some(up_to) => config.with_up_to(up_to),
        None => config,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = build_config(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("generating puzzle with seed {}", seed);
    let puzzle = Puzzle::with_seed(config, seed)?;

    println!("{}", puzzle);
    println!("{}", SEPARATOR.repeat(8));
    println!("Tokens available : {}", puzzle.tokens_available());
    println!("{}", render(&puzzle));
    println!("{}", SEPARATOR.repeat(8));
    println!("Original Score : {}", puzzle.score());

    let mut solver = Solver::new(&puzzle);
    if let Some(target) = args.target_score {
        solver = solver.with_target_score(target);
    }
    if args.parallel {
        solver.solve_parallel()?;
    } else {
        solver.solve()?;
    }

    for (i, trial) in solver.processed_puzzles().iter().take(args.show_trials).enumerate() {
        println!("{}", SEPARATOR.repeat(8));
        println!("{}", render(&trial.puzzle));
        println!("Combinations: {:?}", trial.combination);
        println!("Score {}: {}", i + 1, trial.score);
    }

    println!("{}", SEPARATOR.repeat(8));
    println!("Total Combinations: {}", solver.total_token_combinations());
    println!("Explored Combinations: {}", solver.processed_puzzles().len());
    println!("Highest Score: {}", solver.highest_score());
    println!("{}", SEPARATOR.repeat(8));

    match solver.highest_score_puzzle() {
        Some(best) => {
            println!("Best combination: {:?}", solver.best_combination().unwrap_or_default());
            println!("{}", render(best));
        }
        None => println!("No combination beats the original score."),
    }
    Ok(())
}
