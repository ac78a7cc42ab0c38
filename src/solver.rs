//! Exact solver: depth-first search over occupancy states.
//!
//! The search removes pairs until the board is empty or stuck. Visited
//! occupancies are remembered as failures: the rest of the game from a given
//! occupancy depends only on that occupancy, so a state that failed once
//! fails again. Match keys with the fewest available pairs are tried first.
//!
//! The search is exponential in the worst case. Callers on an interactive
//! path should pass limits or a cancel flag, or use `worker::spawn_exact_solve`.
use crate::deck::MatchKey;
use crate::engine::{group_available_pairs, Board, Occupancy, Pair, Slot};
use log::{debug, info};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// How often (in expanded nodes) the clock is read.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Optional bounds on an exact search. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveLimits {
    pub time_budget_ms: Option<u64>,
    pub node_budget: Option<u64>,
}

impl SolveLimits {
    pub const fn new(time_budget_ms: Option<u64>, node_budget: Option<u64>) -> Self {
        Self {
            time_budget_ms,
            node_budget,
        }
    }

    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub const fn time_budget(ms: u64) -> Self {
        Self::new(Some(ms), None)
    }
}

/// Why a search stopped before exhausting the state space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveTermination {
    TimeBudget,
    NodeBudget,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExactOutcome {
    /// Pairs whose removal, in order, clears the board.
    Solved(Vec<Pair>),
    /// Every reachable state was explored; the board cannot be cleared.
    Unsolvable,
    /// The search was stopped; nothing is known about solvability.
    Aborted(SolveTermination),
}

/// Result of an exact search along with its cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactReport {
    pub outcome: ExactOutcome,
    /// Number of states expanded.
    pub nodes: u64,
    /// Number of distinct occupancies remembered.
    pub visited_states: usize,
    pub elapsed: Duration,
}

impl ExactReport {
    pub fn plan(&self) -> Option<&[Pair]> {
        match &self.outcome {
            ExactOutcome::Solved(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, ExactOutcome::Solved(_))
    }
}

struct SearchContext<'a> {
    slots: &'a [Slot],
    keys: Vec<Option<MatchKey>>,
    visited: HashSet<Occupancy>,
    path: Vec<Pair>,
    nodes: u64,
    limits: SolveLimits,
    started: Instant,
    canceled: Option<&'a AtomicBool>,
}

impl<'a> SearchContext<'a> {
    fn check_limits(&self) -> Result<(), SolveTermination> {
        if let Some(flag) = self.canceled {
            if flag.load(Ordering::Relaxed) {
                return Err(SolveTermination::Canceled);
            }
        }
        if let Some(budget) = self.limits.node_budget {
            if self.nodes >= budget {
                return Err(SolveTermination::NodeBudget);
            }
        }
        if let Some(ms) = self.limits.time_budget_ms {
            if self.nodes % CLOCK_CHECK_INTERVAL == 0
                && self.started.elapsed() >= Duration::from_millis(ms)
            {
                return Err(SolveTermination::TimeBudget);
            }
        }
        Ok(())
    }

    /// Returns `Ok(true)` once `self.path` clears the board.
    fn search(&mut self, occupied: Occupancy) -> Result<bool, SolveTermination> {
        if occupied.is_empty() {
            return Ok(true);
        }
        if !self.visited.insert(occupied) {
            return Ok(false);
        }
        self.nodes += 1;
        self.check_limits()?;

        let mut groups: Vec<Vec<Pair>> = group_available_pairs(&occupied, &self.keys, self.slots)
            .into_values()
            .collect();
        if groups.is_empty() {
            return Ok(false);
        }
        // Most constrained key first; the sort is stable so ties keep key order.
        groups.sort_by_key(|pairs| pairs.len());

        for pairs in groups {
            for (a, b) in pairs {
                let mut next = occupied;
                next.remove(a);
                next.remove(b);
                self.path.push((a, b));
                if self.search(next)? {
                    return Ok(true);
                }
                self.path.pop();
            }
        }
        Ok(false)
    }
}

/// Searches for a full removal plan for `board`.
///
/// The board itself is not modified; the search works on its own copy of the
/// occupancy. `canceled` is polled at every expanded state.
///
/// # Examples
/// ```
/// use mahjong_engine::deck::Face;
/// use mahjong_engine::engine::{compute_relations, Board, Tile};
/// use mahjong_engine::layout::SlotCoord;
/// use mahjong_engine::solver::{solve_exact, SolveLimits};
///
/// let coords: Vec<SlotCoord> = (0..4).map(|i| SlotCoord::new(i * 4, 0, 0)).collect();
/// let faces = [Face::Bamboo(1), Face::Circle(2), Face::Bamboo(1), Face::Circle(2)];
/// let tiles = faces.iter().enumerate().map(|(i, &f)| Tile::new(i, f));
/// let board = Board::from_tiles(compute_relations(&coords).into(), tiles).unwrap();
///
/// let report = solve_exact(&board, SolveLimits::unbounded(), None);
/// assert_eq!(report.plan().map(|p| p.len()), Some(2));
/// ```
pub fn solve_exact(board: &Board, limits: SolveLimits, canceled: Option<&AtomicBool>) -> ExactReport {
    let mut ctx = SearchContext {
        slots: board.slots(),
        keys: board.match_keys(),
        visited: HashSet::new(),
        path: Vec::new(),
        nodes: 0,
        limits,
        started: Instant::now(),
        canceled,
    };

    let outcome = match ctx.search(board.occupancy()) {
        Ok(true) => ExactOutcome::Solved(std::mem::take(&mut ctx.path)),
        Ok(false) => ExactOutcome::Unsolvable,
        Err(termination) => {
            debug!("exact search stopped: {:?}", termination);
            ExactOutcome::Aborted(termination)
        }
    };

    let report = ExactReport {
        outcome,
        nodes: ctx.nodes,
        visited_states: ctx.visited.len(),
        elapsed: ctx.started.elapsed(),
    };
    info!(
        "exact search on {} tiles: {} after {} nodes in {:?}",
        board.tile_count(),
        match &report.outcome {
            ExactOutcome::Solved(_) => "solved",
            ExactOutcome::Unsolvable => "unsolvable",
            ExactOutcome::Aborted(_) => "aborted",
        },
        report.nodes,
        report.elapsed
    );
    report
}
