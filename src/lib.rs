//! # Mahjong Solitaire Engine
//!
//! This library provides the board logic of mahjong solitaire: preset
//! layouts, free-tile rules, seeded deals, and two solvers.
//!
//! It is used by three binaries:
//! - `mahjong_player`: interactive play from the command line.
//! - `mahjong_solver`: deals or loads a board and prints a removal plan.
//! - `layout_evaluator`: deals many seeds and reports how often the greedy
//!   solver clears them.
//!
//! ## Modules
//! - `layout`: the easy/normal/hard cell lists and `Difficulty`.
//! - `engine`: `Slot` relations, `Occupancy`, `Tile`, `Board`, and the
//!   `is_free_slot` / `available_pairs` queries everything else builds on.
//! - `deck`: tile faces, match keys and the seeded deal (`generate_board`).
//! - `rng`: the `Mulberry32` generator behind reproducible deals.
//! - `solver`: exact memoized backtracking (`solve_exact`).
//! - `greedy`: randomized greedy plans and the solvable re-shuffle.
//! - `worker`: exact solving on a background thread with cancellation.
//! - `game`: one game session with score, hint, shuffle and undo.
//! - `config`: solver and scoring knobs.
//! - `error`: error types.
//! - `logging`: log4rs setup for the binaries.
//! - `utils`: the `x y z face` board text format and seed parsing.

pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod game;
pub mod greedy;
pub mod layout;
pub mod logging;
pub mod rng;
pub mod solver;
pub mod utils;
pub mod worker;
