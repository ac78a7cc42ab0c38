use clap::Parser;
use log::LevelFilter;
use mahjong_engine::config::SolverConfig;
use mahjong_engine::engine::BoardStatus;
use mahjong_engine::game::{Game, Selection};
use mahjong_engine::layout::Difficulty;
use mahjong_engine::logging::{init_log, parse_level};
use mahjong_engine::utils::{parse_seed_input, random_seed};
use std::io::{self, Write};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play mahjong solitaire in the terminal", long_about = None)]
struct Args {
    /// Preset layout to deal
    #[clap(short, long, value_enum, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,

    /// Deal seed (random if omitted)
    #[clap(short, long)]
    seed: Option<u32>,

    /// Attempts the `c` command gets to find a plan
    #[clap(long, default_value_t = SolverConfig::DEFAULT_GREEDY_TRIES)]
    tries: usize,

    /// Attempts a shuffle gets to find a solvable arrangement
    #[clap(long, default_value_t = SolverConfig::DEFAULT_SHUFFLE_TRIES)]
    shuffle_tries: usize,

    /// Log level (off, error, warn, info, debug, trace)
    #[clap(long, default_value = "off", value_parser = parse_level)]
    log_level: LevelFilter,
}

const HELP: &str = "Commands: 'a b' remove pair, 's n' select tile, 'h' hint, 'x' shuffle, \
'u' undo, 'p' list pairs, 'c' check for a plan, 'b' show board, 'n [seed]' new game, 'q' quit";

fn show_board(game: &Game) {
    println!("Free tiles are marked with *:");
    print!("{}", game.board());
}

fn start_game(difficulty: Difficulty, seed: u32, config: SolverConfig) -> Option<Game> {
    match Game::new(difficulty, seed) {
        Ok(game) => {
            println!("New {} game with seed {}", difficulty, seed);
            Some(game.with_config(config))
        }
        Err(e) => {
            eprintln!("Cannot deal {} layout: {}", difficulty, e);
            None
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_log(args.log_level, None) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let config = SolverConfig {
        greedy_tries: args.tries,
        shuffle_tries: args.shuffle_tries,
        ..SolverConfig::default()
    };
    println!("Welcome to Mahjong Solitaire!");
    let seed = args.seed.unwrap_or_else(random_seed);
    let Some(mut game) = start_game(args.difficulty, seed, config) else {
        return ExitCode::FAILURE;
    };
    println!("{}", HELP);
    show_board(&game);

    loop {
        println!("---------------------");
        println!(
            "Moves: {}, Score: {}, Pairs left: {}, Available pairs: {}",
            game.moves(),
            game.score(),
            game.pairs_left(),
            game.available_pair_count()
        );

        match game.status() {
            BoardStatus::Cleared => {
                println!("🎉 You Win! 🎉");
                println!("Final Score: {}", game.score());
                break;
            }
            BoardStatus::Stuck => {
                println!("No more moves! Try 'x' to shuffle or 'u' to undo.");
            }
            BoardStatus::InPlay { .. } => {}
        }

        print!("> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["q"] => {
                println!("Thanks for playing!");
                break;
            }
            ["b"] => show_board(&game),
            ["n", rest @ ..] => match parse_seed_input(&rest.concat()) {
                Ok(seed) => {
                    let seed = seed.unwrap_or_else(random_seed);
                    if let Some(next) = start_game(args.difficulty, seed, config) {
                        game = next;
                        show_board(&game);
                    }
                }
                Err(e) => println!("{}", e),
            },
            ["c"] => match game.find_plan() {
                Ok(plan) => println!("The board can still be cleared in {} moves.", plan.len()),
                Err(e) => println!("{}. It may still be clearable.", e),
            },
            ["p"] => {
                let pairs = game.board().available_pairs();
                if pairs.is_empty() {
                    println!("No available pairs.");
                }
                for (a, b) in pairs {
                    let face = game.board().tile(a).map(|t| t.face.to_string()).unwrap_or_default();
                    println!("  {:>3} + {:<3} {}", a, b, face);
                }
            }
            ["h"] => match game.hint() {
                Some((a, b)) => println!("Hint: try {} and {}.", a, b),
                None => println!("No available pairs for a hint."),
            },
            ["x"] => match game.shuffle() {
                Ok(()) => {
                    println!("Tiles shuffled!");
                    show_board(&game);
                }
                Err(e) => println!("{}", e),
            },
            ["u"] => {
                if game.undo() {
                    println!("Move undone.");
                } else {
                    println!("Nothing to undo.");
                }
            }
            ["s", n] => match n.parse::<usize>() {
                Ok(slot) => match game.select(slot) {
                    Selection::Blocked(s) => println!("Tile {} is not free.", s),
                    Selection::Selected(s) => println!("Selected {}.", s),
                    Selection::Deselected(s) => println!("Deselected {}.", s),
                    Selection::Reselected { previous, current } => {
                        println!("{} and {} do not match; selected {}.", previous, current, current)
                    }
                    Selection::Matched((a, b)) => println!("Removed {} and {}.", a, b),
                },
                Err(_) => println!("Invalid slot '{}'.", n),
            },
            [a, b] => match (a.parse::<usize>(), b.parse::<usize>()) {
                (Ok(a), Ok(b)) => match game.remove_pair(a, b) {
                    Ok(()) => println!("Removed {} and {}.", a, b),
                    Err(e) => println!("Invalid move: {}.", e),
                },
                _ => println!("Invalid input. {}", HELP),
            },
            _ => println!("Invalid input. {}", HELP),
        }
    }
    ExitCode::SUCCESS
}
