//! Tunable knobs for solving and scoring.
//!
//! The binaries fill these from command-line flags; the library only ever
//! reads them.

use crate::solver::SolveLimits;

/// Attempt limits for the randomized solver and the exact solver's limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Attempts for a plain greedy solve.
    pub greedy_tries: usize,
    /// Attempts the shuffle action gets to find a plan.
    pub shuffle_tries: usize,
    pub exact_limits: SolveLimits,
}

impl SolverConfig {
    pub const DEFAULT_GREEDY_TRIES: usize = 300;
    pub const DEFAULT_SHUFFLE_TRIES: usize = 400;

    pub const fn new(greedy_tries: usize, shuffle_tries: usize, exact_limits: SolveLimits) -> Self {
        Self {
            greedy_tries,
            shuffle_tries,
            exact_limits,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_GREEDY_TRIES,
            Self::DEFAULT_SHUFFLE_TRIES,
            SolveLimits::unbounded(),
        )
    }
}

/// Points awarded and deducted during a game. The score never drops below 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    pub match_reward: u32,
    pub hint_penalty: u32,
    pub shuffle_penalty: u32,
}

impl ScoreRules {
    pub const fn new(match_reward: u32, hint_penalty: u32, shuffle_penalty: u32) -> Self {
        Self {
            match_reward,
            hint_penalty,
            shuffle_penalty,
        }
    }
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self::new(100, 50, 100)
    }
}
