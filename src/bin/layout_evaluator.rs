use clap::Parser;
use log::LevelFilter;
use mahjong_engine::config::SolverConfig;
use mahjong_engine::engine::Board;
use mahjong_engine::greedy::find_greedy_solution;
use mahjong_engine::layout::Difficulty;
use mahjong_engine::logging::{init_log, parse_level};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Measure how often the greedy solver clears dealt boards", long_about = None)]
struct Args {
    /// Number of seeds to deal per layout
    #[clap(short, long, default_value_t = 20)]
    boards: u32,

    /// First seed; seeds run from here upwards
    #[clap(short, long, default_value_t = 0)]
    start_seed: u32,

    /// Greedy attempts per board
    #[clap(short, long, default_value_t = SolverConfig::DEFAULT_GREEDY_TRIES)]
    tries: usize,

    /// Log level (off, error, warn, info, debug, trace)
    #[clap(long, default_value = "off", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_log(args.log_level, None) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    println!("Starting layout evaluation for {} boards per layout...", args.boards);

    for difficulty in Difficulty::ALL {
        println!("\n--- Layout: {} ({} slots) ---", difficulty, difficulty.coords().len());

        let mut solved = 0u32;
        let mut dealt = 0u32;
        let started = Instant::now();

        for offset in 0..args.boards {
            let seed = args.start_seed.wrapping_add(offset);
            let board = match Board::deal(difficulty, seed) {
                Ok(board) => board,
                Err(e) => {
                    println!("  Skipped: {}", e);
                    break;
                }
            };
            dealt += 1;

            let mut rng = SmallRng::seed_from_u64(u64::from(seed));
            let found = find_greedy_solution(&board, args.tries, &mut rng).is_ok();
            if found {
                solved += 1;
            }
            println!(
                "  Seed {:<8} free pairs: {:<3} greedy: {}",
                seed,
                board.available_pairs().len(),
                if found { "cleared" } else { "exhausted" }
            );
        }

        if dealt > 0 {
            println!(
                "  Cleared {}/{} boards ({:.1}%) in {:?}",
                solved,
                dealt,
                100.0 * f64::from(solved) / f64::from(dealt),
                started.elapsed()
            );
        }
    }

    println!("\n--- Evaluation Complete ---");
    ExitCode::SUCCESS
}
