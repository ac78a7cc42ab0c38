use clap::Parser;
use log::LevelFilter;
use mahjong_engine::config::SolverConfig;
use mahjong_engine::engine::{Board, Pair};
use mahjong_engine::greedy::find_greedy_solution;
use mahjong_engine::layout::Difficulty;
use mahjong_engine::logging::{init_log, parse_level};
use mahjong_engine::solver::{ExactOutcome, SolveLimits, SolveTermination};
use mahjong_engine::utils::{board_from_lines, board_to_lines, random_seed};
use mahjong_engine::worker::spawn_exact_solve;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Deal or load a mahjong solitaire board and find a removal plan", long_about = None)]
struct Args {
    /// Preset layout to deal
    #[clap(short, long, value_enum, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,

    /// Deal seed (random if omitted)
    #[clap(short, long)]
    seed: Option<u32>,

    /// Board file with one `x y z face` line per tile (overrides --difficulty)
    #[clap(short, long)]
    board_file: Option<PathBuf>,

    /// Run the exact solver instead of the greedy one
    #[clap(short, long)]
    exact: bool,

    /// Time limit for the exact solver, in milliseconds (0 = none)
    #[clap(short, long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// State limit for the exact solver (0 = none)
    #[clap(long, default_value_t = 0)]
    node_budget: u64,

    /// Attempts for the greedy solver
    #[clap(long, default_value_t = SolverConfig::DEFAULT_GREEDY_TRIES)]
    tries: usize,

    /// Write the starting board to this file in `x y z face` format
    #[clap(long)]
    save_board: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[clap(long, default_value = "warn", value_parser = parse_level)]
    log_level: LevelFilter,

    /// Write the log to this file instead of stderr
    #[clap(long)]
    log_file: Option<String>,
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    let lines: Vec<&str> = content.lines().collect();
    board_from_lines(&lines).map_err(|e| format!("Invalid board format: {}", e))
}

fn print_plan(board: &Board, plan: &[Pair]) {
    println!("Moves ({}):", plan.len());
    if plan.is_empty() {
        println!("  No moves needed.");
    }
    for (i, &(a, b)) in plan.iter().enumerate() {
        let face = board
            .tile(a)
            .map(|t| t.face.to_string())
            .unwrap_or_default();
        println!("  Move {:>2}: {:>3} + {:<3} {}", i + 1, a, b, face);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_log(args.log_level, args.log_file.as_deref()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let seed = args.seed.unwrap_or_else(random_seed);
    let board = match &args.board_file {
        Some(path) => read_board_file(path).map(|board| {
            println!("Loaded board from {}\n", path.display());
            board
        }),
        None => Board::deal(args.difficulty, seed)
            .map(|board| {
                println!("Dealt {} layout with seed {}\n", args.difficulty, seed);
                board
            })
            .map_err(|e| format!("Cannot deal {} layout: {}", args.difficulty, e)),
    };
    let board = match board {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Initial board ({} tiles, * = free):\n{}", board.tile_count(), board);
    println!("Available pairs: {}\n", board.available_pairs().len());

    if let Some(path) = &args.save_board {
        let mut text = board_to_lines(&board).join("\n");
        text.push('\n');
        if let Err(e) = fs::write(path, text) {
            eprintln!("Failed to write {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        println!("Board saved to {}\n", path.display());
    }

    let config = SolverConfig {
        greedy_tries: args.tries,
        exact_limits: SolveLimits::new(
            (args.timeout_ms > 0).then_some(args.timeout_ms),
            (args.node_budget > 0).then_some(args.node_budget),
        ),
        ..SolverConfig::default()
    };

    if args.exact {
        println!(
            "Searching exhaustively (time limit: {:?} ms, state limit: {:?})...\n",
            config.exact_limits.time_budget_ms, config.exact_limits.node_budget
        );
        let search = spawn_exact_solve(board.clone(), config.exact_limits);
        let Some(report) = search.wait() else {
            eprintln!("Solver thread ended without a result");
            return ExitCode::FAILURE;
        };
        println!(
            "Explored {} states ({} remembered) in {:?}\n",
            report.nodes, report.visited_states, report.elapsed
        );
        match report.outcome {
            ExactOutcome::Solved(plan) => {
                println!("Solution found:\n");
                print_plan(&board, &plan);
            }
            ExactOutcome::Unsolvable => {
                println!("Board cannot be cleared.");
                return ExitCode::from(2);
            }
            ExactOutcome::Aborted(SolveTermination::TimeBudget) => {
                println!("Time limit reached; solvability unknown.");
                return ExitCode::from(3);
            }
            ExactOutcome::Aborted(SolveTermination::NodeBudget) => {
                println!("State limit reached; solvability unknown.");
                return ExitCode::from(3);
            }
            ExactOutcome::Aborted(other) => {
                println!("Search stopped ({:?}); solvability unknown.", other);
                return ExitCode::from(3);
            }
        }
    } else {
        println!("Searching greedily ({} attempts)...\n", config.greedy_tries);
        let mut rng = SmallRng::seed_from_u64(u64::from(seed));
        match find_greedy_solution(&board, config.greedy_tries, &mut rng) {
            Ok(plan) => {
                println!("Solution found:\n");
                print_plan(&board, &plan);
            }
            Err(e) => {
                println!("{}. The board may still be solvable; try --exact.", e);
                return ExitCode::from(3);
            }
        }
    }
    ExitCode::SUCCESS
}
