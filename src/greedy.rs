//! Randomized greedy solver and the re-shuffle built on it.
//!
//! Instead of searching exhaustively, an attempt keeps removing a uniformly
//! random available pair until the board is empty or stuck. Attempts are
//! cheap and independent, so a few hundred of them find a plan for almost
//! every dealable board. Running out of attempts says nothing definite about
//! solvability.
use crate::deck::{Face, MatchKey};
use crate::engine::{available_pairs, Board, Occupancy, Pair, Slot, Tile};
use crate::error::ShuffleError;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::fmt;

/// No plan was found within the attempt limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyExhausted {
    pub attempts: usize,
}

impl fmt::Display for GreedyExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No removal plan found in {} attempts", self.attempts)
    }
}

impl std::error::Error for GreedyExhausted {}

/// Runs up to `tries` randomized playouts over `keys`.
///
/// Each attempt draws from its own `SmallRng`, seeded from `rng`, so retries
/// never replay the same sequence.
fn greedy_plan<K: Ord + Copy, R: Rng + ?Sized>(
    occupied: Occupancy,
    keys: &[Option<K>],
    slots: &[Slot],
    tries: usize,
    rng: &mut R,
) -> Result<Vec<Pair>, GreedyExhausted> {
    if occupied.is_empty() {
        return Ok(Vec::new());
    }

    for attempt in 0..tries {
        let mut attempt_rng = SmallRng::seed_from_u64(rng.gen());
        let mut current = occupied;
        let mut plan = Vec::with_capacity(occupied.len() / 2);

        while !current.is_empty() {
            let pairs = available_pairs(&current, keys, slots);
            if pairs.is_empty() {
                break;
            }
            let (a, b) = pairs[attempt_rng.gen_range(0..pairs.len())];
            current.remove(a);
            current.remove(b);
            plan.push((a, b));
        }

        if current.is_empty() {
            debug!("greedy plan found on attempt {}", attempt + 1);
            return Ok(plan);
        }
        debug!(
            "greedy attempt {} stuck with {} tiles left",
            attempt + 1,
            current.len()
        );
    }

    Err(GreedyExhausted { attempts: tries })
}

/// Tries to build a plan that clears `board`, within `tries` attempts.
///
/// A board with no tiles yields an empty plan right away. Any returned plan
/// clears the board when replayed from its current state.
///
/// # Examples
/// ```
/// use mahjong_engine::engine::Board;
/// use mahjong_engine::greedy::find_greedy_solution;
/// use mahjong_engine::layout::Difficulty;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let board = Board::deal(Difficulty::Normal, 42).unwrap();
/// let mut rng = SmallRng::seed_from_u64(1);
/// if let Ok(plan) = find_greedy_solution(&board, 300, &mut rng) {
///     assert!(board.replay(&plan).unwrap().is_cleared());
/// }
/// ```
pub fn find_greedy_solution<R: Rng + ?Sized>(
    board: &Board,
    tries: usize,
    rng: &mut R,
) -> Result<Vec<Pair>, GreedyExhausted> {
    let result = greedy_plan(
        board.occupancy(),
        &board.match_keys(),
        board.slots(),
        tries,
        rng,
    );
    if let Err(e) = &result {
        warn!("{} for a board of {} tiles", e, board.tile_count());
    }
    result
}

/// Like [`find_greedy_solution`] but ignoring faces: any two free tiles pair.
///
/// The plan only depends on the geometry, so it exists even for a stuck
/// board as long as the layout itself can be taken apart two tiles at a time.
pub fn find_layout_plan<R: Rng + ?Sized>(
    board: &Board,
    tries: usize,
    rng: &mut R,
) -> Result<Vec<Pair>, GreedyExhausted> {
    let keys: Vec<Option<()>> = board
        .match_keys()
        .into_iter()
        .map(|key| key.map(|_| ()))
        .collect();
    greedy_plan(board.occupancy(), &keys, board.slots(), tries, rng)
}

/// Reassigns the board's faces pairwise along `plan`.
///
/// For each planned pair, a match key with at least two faces left is chosen
/// uniformly and two of its faces go onto the pair's slots. The result can be
/// cleared by replaying `plan`.
///
/// # Errors
/// `ShuffleError::Incomplete` if the plan does not cover every tile, or the
/// face inventory runs out of pairs before the plan ends.
pub fn reassign_faces<R: Rng + ?Sized>(
    board: &Board,
    plan: &[Pair],
    rng: &mut R,
) -> Result<Board, ShuffleError> {
    let mut inventory: BTreeMap<MatchKey, Vec<Face>> = BTreeMap::new();
    for tile in board.tiles() {
        inventory.entry(tile.match_key).or_default().push(tile.face);
    }

    let mut tiles = Vec::with_capacity(board.tile_count());
    for &(a, b) in plan {
        let keys: Vec<MatchKey> = inventory
            .iter()
            .filter(|(_, faces)| faces.len() >= 2)
            .map(|(&key, _)| key)
            .collect();
        if keys.is_empty() {
            break;
        }
        let key = keys[rng.gen_range(0..keys.len())];
        let faces = inventory.get_mut(&key).ok_or(ShuffleError::Incomplete {
            assigned: tiles.len(),
            tiles: board.tile_count(),
        })?;
        if let (Some(first), Some(second)) = (faces.pop(), faces.pop()) {
            tiles.push(Tile::new(a, first));
            tiles.push(Tile::new(b, second));
        }
    }

    if tiles.len() != board.tile_count() {
        return Err(ShuffleError::Incomplete {
            assigned: tiles.len(),
            tiles: board.tile_count(),
        });
    }
    board.with_tiles(tiles).map_err(|_| ShuffleError::Incomplete {
        assigned: 0,
        tiles: board.tile_count(),
    })
}

/// Shuffles the faces of `board` into an arrangement that can be cleared.
///
/// A plan is first searched over the real faces; if none turns up (always
/// the case on a stuck board) a face-blind plan is used instead. Faces are
/// then dealt pairwise along the plan, so the new board is solvable by
/// construction. The face multiset is preserved.
pub fn reshuffle<R: Rng + ?Sized>(
    board: &Board,
    tries: usize,
    rng: &mut R,
) -> Result<Board, ShuffleError> {
    if board.is_cleared() {
        return Err(ShuffleError::EmptyBoard);
    }

    let plan = match greedy_plan(
        board.occupancy(),
        &board.match_keys(),
        board.slots(),
        tries,
        rng,
    ) {
        Ok(plan) => plan,
        Err(_) => {
            debug!("no plan over current faces, falling back to layout plan");
            find_layout_plan(board, tries, rng)
                .map_err(|e| ShuffleError::NoPlan { attempts: e.attempts })?
        }
    };

    let shuffled = reassign_faces(board, &plan, rng)?;
    info!("reshuffled {} tiles along a {}-step plan", shuffled.tile_count(), plan.len());
    Ok(shuffled)
}
