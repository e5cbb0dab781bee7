use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tilematch_solver::config::PuzzleConfig;
use tilematch_solver::engine::{Puzzle, RowMatches};
use tilematch_solver::render::render;
use tilematch_solver::utils::columns_from_str_array;

const SEPARATOR: &str = " - - - - -";
const WIDTH: usize = 5;
const LENGTH: usize = 5;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Bumps columns of a fixed 5x5 board and prints each step", long_about = None)]
struct Args {
    /// Seed for the random row targets
    #[clap(short, long)]
    seed: Option<u64>,
}

fn print_step(puzzle: &Puzzle, label: &str) {
    println!("{}", render(puzzle));
    println!("{} : {}", label, puzzle.score());
    println!("{}", SEPARATOR.repeat(8));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let columns = columns_from_str_array(&["GBB..", "RP...", "GP...", "RGB..", "PPB.."])?;
    let base = PuzzleConfig::new(WIDTH, LENGTH)
        .with_up_to(3)
        .with_starting_tokens(2)
        .with_columns(columns);

    let row_matches = RowMatches::random(LENGTH, &mut rng);
    let mut puzzle = Puzzle::new(base.clone().with_row_matches(row_matches), &mut rng)?;

    println!("{}", puzzle);
    println!("{}", SEPARATOR.repeat(8));
    print_step(&puzzle, "Original Score");

    println!("Bumping Column 2");
    puzzle.bump_column(&[2])?;
    print_step(&puzzle, "New Score");

    println!("Bumping Column 4");
    puzzle.bump_column(&[4])?;
    print_step(&puzzle, "New Score");

    let mut new_puzzle = Puzzle::new(base, &mut rng)?;
    println!("{:^80}", "- - - New Puzzle - - -");
    println!("{}", new_puzzle);
    println!("{}", SEPARATOR.repeat(8));
    print_step(&new_puzzle, "Original Score");

    println!("Bumping Columns 1 & 3");
    new_puzzle.bump_column(&[1, 3])?;
    print_step(&new_puzzle, "New Score");

    Ok(())
}
