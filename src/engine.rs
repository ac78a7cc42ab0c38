//! Core board model for mahjong solitaire.
//!
//! This module defines the pieces every other part of the crate works on:
//! - `Slot`: a cell of the layout plus the slots that cover or flank it.
//! - `Occupancy`: a compact, hashable set of occupied slot indices.
//! - `Tile`: a face sitting in a slot.
//! - `Board`: the live tiles over an immutable, shared slot list.
//!
//! It also holds the two queries the game and both solvers are built on:
//! `is_free_slot` and `available_pairs`.
use crate::deck::{generate_board, Face, MatchKey};
use crate::error::{BoardError, MoveError};
use crate::layout::{Difficulty, SlotCoord};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Two slot indices removed together, lower index first.
pub type Pair = (usize, usize);

/// Largest number of slots an `Occupancy` can track.
pub const MAX_SLOTS: usize = 256;

const WORDS: usize = MAX_SLOTS / 64;

/// A layout cell together with its blocking relations.
///
/// The relation lists hold slot indices in ascending order. They are derived
/// once from the coordinates by [`compute_relations`] and never change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub pos: SlotCoord,
    /// Slots one layer up whose footprint overlaps this one.
    pub above: Vec<usize>,
    /// Slots directly to the left on the same layer.
    pub left_blocking: Vec<usize>,
    /// Slots directly to the right on the same layer.
    pub right_blocking: Vec<usize>,
}

fn ranges_overlap(a: i32, b: i32) -> bool {
    !(b + 2 <= a || b >= a + 2)
}

/// Derives above/left/right relations for every slot of a layout.
///
/// Tiles occupy a 2x2 footprint. `b` is above `a` when it sits exactly one
/// layer higher and the footprints overlap. `b` blocks `a` on the left or
/// right when it shares the layer, the rows overlap, and it is exactly one
/// tile width away. The cost is quadratic in the slot count, which is fine
/// for a once-per-game computation.
///
/// # Examples
/// ```
/// use mahjong_engine::engine::compute_relations;
/// use mahjong_engine::layout::SlotCoord;
///
/// let slots = compute_relations(&[
///     SlotCoord::new(0, 0, 0),
///     SlotCoord::new(2, 0, 0),
///     SlotCoord::new(1, 1, 1),
/// ]);
/// assert_eq!(slots[0].right_blocking, vec![1]);
/// assert_eq!(slots[1].left_blocking, vec![0]);
/// assert_eq!(slots[0].above, vec![2]);
/// assert_eq!(slots[1].above, vec![2]);
/// ```
pub fn compute_relations(coords: &[SlotCoord]) -> Vec<Slot> {
    coords
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let mut slot = Slot {
                pos: *a,
                above: Vec::new(),
                left_blocking: Vec::new(),
                right_blocking: Vec::new(),
            };
            for (j, b) in coords.iter().enumerate() {
                if i == j {
                    continue;
                }
                if b.z == a.z + 1 && ranges_overlap(a.x, b.x) && ranges_overlap(a.y, b.y) {
                    slot.above.push(j);
                }
                if b.z == a.z && ranges_overlap(a.y, b.y) {
                    if b.x == a.x - 2 {
                        slot.left_blocking.push(j);
                    }
                    if b.x == a.x + 2 {
                        slot.right_blocking.push(j);
                    }
                }
            }
            slot
        })
        .collect()
}

/// The set of occupied slots, one bit per slot index.
///
/// This is the working state of both solvers. It is `Copy` and `Hash`, so a
/// snapshot can be stored directly in a visited set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Occupancy {
    words: [u64; WORDS],
}

impl Occupancy {
    pub fn new() -> Self {
        Occupancy::default()
    }

    /// # Panics
    /// Panics if `slot >= MAX_SLOTS`.
    pub fn contains(&self, slot: usize) -> bool {
        self.words[slot / 64] & (1u64 << (slot % 64)) != 0
    }

    pub fn insert(&mut self, slot: usize) {
        self.words[slot / 64] |= 1u64 << (slot % 64);
    }

    pub fn remove(&mut self, slot: usize) {
        self.words[slot / 64] &= !(1u64 << (slot % 64));
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Occupied slot indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_SLOTS).filter(move |&slot| self.contains(slot))
    }
}

impl FromIterator<usize> for Occupancy {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut occupied = Occupancy::new();
        for slot in iter {
            occupied.insert(slot);
        }
        occupied
    }
}

/// Returns whether the tile in `slot` can be selected.
///
/// A slot is free when it is occupied, nothing above it is occupied, and it
/// is not flanked on both sides. A tile blocked on only one side is free.
pub fn is_free_slot(slot: usize, occupied: &Occupancy, slots: &[Slot]) -> bool {
    if !occupied.contains(slot) {
        return false;
    }
    let s = &slots[slot];
    if s.above.iter().any(|&i| occupied.contains(i)) {
        return false;
    }
    let left_blocked = s.left_blocking.iter().any(|&i| occupied.contains(i));
    let right_blocked = s.right_blocking.iter().any(|&i| occupied.contains(i));
    !left_blocked || !right_blocked
}

/// Lists every pair of free slots whose tiles share a key.
///
/// Free slots are grouped by key and every 2-combination inside a group is
/// emitted, lower slot first. Groups come out in key order, so the result is
/// deterministic. `keys[i]` is the key of the tile in slot `i`; slots with no
/// key, or past the end of `keys`, are skipped. The solvers use real match keys; the shuffle uses `()` to
/// pair slots regardless of face.
pub fn available_pairs<K: Ord + Copy>(
    occupied: &Occupancy,
    keys: &[Option<K>],
    slots: &[Slot],
) -> Vec<Pair> {
    group_available_pairs(occupied, keys, slots)
        .into_values()
        .flatten()
        .collect()
}

/// Same as [`available_pairs`], keeping the pairs grouped by key.
pub fn group_available_pairs<K: Ord + Copy>(
    occupied: &Occupancy,
    keys: &[Option<K>],
    slots: &[Slot],
) -> BTreeMap<K, Vec<Pair>> {
    let mut free_by_key: BTreeMap<K, Vec<usize>> = BTreeMap::new();
    for slot in 0..slots.len() {
        if !is_free_slot(slot, occupied, slots) {
            continue;
        }
        if let Some(key) = keys.get(slot).copied().flatten() {
            free_by_key.entry(key).or_default().push(slot);
        }
    }

    free_by_key
        .into_iter()
        .filter(|(_, free)| free.len() >= 2)
        .map(|(key, free)| {
            let mut pairs = Vec::with_capacity(free.len() * (free.len() - 1) / 2);
            for (i, &a) in free.iter().enumerate() {
                for &b in &free[i + 1..] {
                    pairs.push((a, b));
                }
            }
            (key, pairs)
        })
        .collect()
}

/// A tile placed in a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub slot: usize,
    pub face: Face,
    pub match_key: MatchKey,
}

impl Tile {
    /// Creates a tile, deriving its match key from the face.
    pub fn new(slot: usize, face: Face) -> Self {
        Tile {
            slot,
            face,
            match_key: face.match_key(),
        }
    }
}

/// Where a board stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardStatus {
    /// Every tile has been removed.
    Cleared,
    /// Tiles remain but no pair can be removed.
    Stuck,
    /// At least one pair can be removed.
    InPlay { available_pairs: usize },
}

/// The live tiles of one game over its immutable slots.
///
/// Tiles are stored by slot index next to an `Occupancy` that mirrors them;
/// every mutation updates both, so each occupied slot holds exactly one tile.
/// The slots are shared through an `Arc`, so cloning a board for a solver or
/// a worker thread copies only the tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    slots: Arc<[Slot]>,
    tiles: Vec<Option<Tile>>,
    occupied: Occupancy,
}

impl Board {
    /// Builds a board from precomputed slots and a tile list.
    ///
    /// # Errors
    /// Fails if the layout is larger than [`MAX_SLOTS`], a tile names a slot
    /// outside the layout, or two tiles share a slot.
    pub fn from_tiles(
        slots: Arc<[Slot]>,
        tiles: impl IntoIterator<Item = Tile>,
    ) -> Result<Self, BoardError> {
        if slots.len() > MAX_SLOTS {
            return Err(BoardError::TooManySlots {
                slots: slots.len(),
                max: MAX_SLOTS,
            });
        }
        let mut by_slot = vec![None; slots.len()];
        let mut occupied = Occupancy::new();
        for tile in tiles {
            if tile.slot >= slots.len() {
                return Err(BoardError::SlotOutOfRange {
                    slot: tile.slot,
                    slots: slots.len(),
                });
            }
            if by_slot[tile.slot].is_some() {
                return Err(BoardError::DuplicateSlot { slot: tile.slot });
            }
            by_slot[tile.slot] = Some(tile);
            occupied.insert(tile.slot);
        }
        Ok(Board {
            slots,
            tiles: by_slot,
            occupied,
        })
    }

    /// Deals a new board on a preset layout with [`generate_board`].
    ///
    /// # Errors
    /// `BoardError::TooManySlots` if the layout exceeds [`MAX_SLOTS`].
    pub fn deal(difficulty: Difficulty, seed: u32) -> Result<Self, BoardError> {
        let slots: Arc<[Slot]> = compute_relations(difficulty.coords()).into();
        if slots.len() > MAX_SLOTS {
            return Err(BoardError::TooManySlots {
                slots: slots.len(),
                max: MAX_SLOTS,
            });
        }
        let tiles = generate_board(&slots, seed);
        Board::from_tiles(slots, tiles)
    }

    /// Returns a board with the same slots and a different tile list.
    pub fn with_tiles(&self, tiles: impl IntoIterator<Item = Tile>) -> Result<Self, BoardError> {
        Board::from_tiles(Arc::clone(&self.slots), tiles)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn tile(&self, slot: usize) -> Option<&Tile> {
        self.tiles.get(slot).and_then(Option::as_ref)
    }

    /// Present tiles in slot order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().flatten()
    }

    pub fn occupancy(&self) -> Occupancy {
        self.occupied
    }

    /// Match key per slot, `None` where the slot is empty.
    pub fn match_keys(&self) -> Vec<Option<MatchKey>> {
        self.tiles.iter().map(|t| t.map(|t| t.match_key)).collect()
    }

    pub fn tile_count(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn is_free(&self, slot: usize) -> bool {
        slot < self.slots.len() && is_free_slot(slot, &self.occupied, &self.slots)
    }

    pub fn free_slots(&self) -> Vec<usize> {
        (0..self.slots.len()).filter(|&s| self.is_free(s)).collect()
    }

    pub fn available_pairs(&self) -> Vec<Pair> {
        available_pairs(&self.occupied, &self.match_keys(), &self.slots)
    }

    pub fn status(&self) -> BoardStatus {
        if self.is_cleared() {
            return BoardStatus::Cleared;
        }
        match self.available_pairs().len() {
            0 => BoardStatus::Stuck,
            n => BoardStatus::InPlay { available_pairs: n },
        }
    }

    /// Checks that `a` and `b` could be removed together right now.
    pub fn check_pair(&self, a: usize, b: usize) -> Result<(), MoveError> {
        if a == b {
            return Err(MoveError::SameSlot { slot: a });
        }
        let mut keys = [None, None];
        for (key, slot) in keys.iter_mut().zip([a, b]) {
            if slot >= self.slots.len() {
                return Err(MoveError::SlotOutOfRange { slot });
            }
            let tile = self.tile(slot).ok_or(MoveError::EmptySlot { slot })?;
            if !self.is_free(slot) {
                return Err(MoveError::NotFree { slot });
            }
            *key = Some(tile.match_key);
        }
        if keys[0] != keys[1] {
            return Err(MoveError::Mismatch { a, b });
        }
        Ok(())
    }

    /// Removes a matching pair of free tiles and returns them.
    pub fn remove_pair(&mut self, a: usize, b: usize) -> Result<[Tile; 2], MoveError> {
        self.check_pair(a, b)?;
        Ok([self.take(a), self.take(b)])
    }

    fn take(&mut self, slot: usize) -> Tile {
        self.occupied.remove(slot);
        self.tiles[slot]
            .take()
            .expect("slot was checked to hold a tile")
    }

    /// Puts previously removed tiles back into their slots.
    ///
    /// # Errors
    /// Nothing is restored if a tile's slot is out of range, already
    /// occupied, or named twice.
    pub fn restore(&mut self, tiles: &[Tile]) -> Result<(), BoardError> {
        for (i, tile) in tiles.iter().enumerate() {
            if tile.slot >= self.slots.len() {
                return Err(BoardError::SlotOutOfRange {
                    slot: tile.slot,
                    slots: self.slots.len(),
                });
            }
            if self.occupied.contains(tile.slot) || tiles[..i].iter().any(|t| t.slot == tile.slot) {
                return Err(BoardError::DuplicateSlot { slot: tile.slot });
            }
        }
        for tile in tiles {
            self.tiles[tile.slot] = Some(*tile);
            self.occupied.insert(tile.slot);
        }
        Ok(())
    }

    /// Applies a removal plan to a copy of the board.
    ///
    /// Every step is validated like a player move, which makes this the check
    /// used to confirm that a solver's plan really clears the board.
    pub fn replay(&self, plan: &[Pair]) -> Result<Board, MoveError> {
        let mut board = self.clone();
        for &(a, b) in plan {
            board.remove_pair(a, b)?;
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    /// Lists the present tiles, one per line, marking the free ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in self.tiles() {
            let pos = self.slots[tile.slot].pos;
            write!(
                f,
                "{:>3}: {:<12} ({:>2},{:>2},{})",
                tile.slot,
                tile.face.to_string(),
                pos.x,
                pos.y,
                pos.z
            )?;
            if self.is_free(tile.slot) {
                f.write_str(" *")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Dragon, Wind};

    fn flat_slots(n: i32) -> Arc<[Slot]> {
        let coords: Vec<SlotCoord> = (0..n).map(|i| SlotCoord::new(i * 4, 0, 0)).collect();
        compute_relations(&coords).into()
    }

    fn board_of(slots: Arc<[Slot]>, faces: &[Face]) -> Board {
        let tiles = faces.iter().enumerate().map(|(i, &f)| Tile::new(i, f));
        Board::from_tiles(slots, tiles).unwrap()
    }

    #[test]
    fn test_relations_easy_apex() {
        let slots = compute_relations(Difficulty::Easy.coords());
        // The apex (12,4,4) straddles the four slots of layer 3.
        for i in 62..=65 {
            assert_eq!(slots[i].above, vec![66], "slot {}", i);
        }
        assert_eq!(slots[62].right_blocking, vec![63]);
        assert!(slots[62].left_blocking.is_empty());
        assert!(slots[66].above.is_empty());
        assert!(slots[66].left_blocking.is_empty());
        assert!(slots[66].right_blocking.is_empty());
    }

    #[test]
    fn test_relations_edge_rows() {
        let slots = compute_relations(Difficulty::Easy.coords());
        assert_eq!(slots[0].right_blocking, vec![1]);
        assert!(slots[0].left_blocking.is_empty());
        assert_eq!(slots[5].left_blocking, vec![4]);
        // (7,2,0) is covered by (7,2,1); (5,2,0) is not.
        assert_eq!(slots[7].above, vec![36]);
        assert!(slots[6].above.is_empty());

        let normal = compute_relations(Difficulty::Normal.coords());
        assert_eq!(normal[0].right_blocking, vec![1]);
        assert_eq!(normal[1].left_blocking, vec![0]);
        assert_eq!(normal[148].right_blocking, vec![149]);
        assert_eq!(normal[149].left_blocking, vec![148]);
    }

    #[test]
    fn test_relations_half_offset_rows() {
        // (2,1) sits half a tile down, so its rows overlap both (0,0) and (0,2).
        let slots = compute_relations(&[
            SlotCoord::new(0, 0, 0),
            SlotCoord::new(0, 2, 0),
            SlotCoord::new(2, 1, 0),
            SlotCoord::new(2, 4, 0),
        ]);
        assert_eq!(slots[2].left_blocking, vec![0, 1]);
        assert_eq!(slots[0].right_blocking, vec![2]);
        assert_eq!(slots[1].right_blocking, vec![2]);
        // y ranges [2,4) and [4,6) do not overlap.
        assert!(slots[3].left_blocking.is_empty());
    }

    #[test]
    fn test_relations_above_matches_brute_force() {
        for difficulty in Difficulty::ALL {
            let coords = difficulty.coords();
            let slots = compute_relations(coords);
            for (i, a) in coords.iter().enumerate() {
                let expected: Vec<usize> = coords
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| {
                        b.z == a.z + 1 && (b.x - a.x).abs() < 2 && (b.y - a.y).abs() < 2
                    })
                    .map(|(j, _)| j)
                    .collect();
                assert_eq!(slots[i].above, expected, "{} slot {}", difficulty, i);
            }
        }
    }

    #[test]
    fn test_initial_free_counts() {
        let expected = [(Difficulty::Easy, 21), (Difficulty::Normal, 42), (Difficulty::Hard, 36)];
        for (difficulty, count) in expected {
            let slots = compute_relations(difficulty.coords());
            let occupied: Occupancy = (0..slots.len()).collect();
            let free = (0..slots.len())
                .filter(|&i| is_free_slot(i, &occupied, &slots))
                .count();
            assert_eq!(free, count, "{}", difficulty);
        }
    }

    #[test]
    fn test_is_free_slot_rules() {
        let slots = compute_relations(Difficulty::Easy.coords());
        let mut occupied: Occupancy = (0..slots.len()).collect();

        // Flanked on both sides.
        assert!(!is_free_slot(1, &occupied, &slots));
        // Edge of a row.
        assert!(is_free_slot(0, &occupied, &slots));
        // Covered.
        assert!(!is_free_slot(62, &occupied, &slots));

        occupied.remove(0);
        assert!(!is_free_slot(0, &occupied, &slots), "empty slot is never free");
        assert!(is_free_slot(1, &occupied, &slots), "one open side is enough");

        occupied.remove(66);
        assert!(is_free_slot(62, &occupied, &slots));
        assert!(is_free_slot(63, &occupied, &slots));
    }

    #[test]
    fn test_occupancy_bits() {
        let mut occ = Occupancy::new();
        assert!(occ.is_empty());
        occ.insert(0);
        occ.insert(63);
        occ.insert(64);
        occ.insert(255);
        assert_eq!(occ.len(), 4);
        assert_eq!(occ.iter().collect::<Vec<_>>(), vec![0, 63, 64, 255]);
        occ.remove(63);
        assert!(!occ.contains(63));
        assert!(occ.contains(64));

        let same: Occupancy = [0, 64, 255].into_iter().collect();
        assert_eq!(occ, same);
    }

    #[test]
    fn test_available_pairs_flat_four() {
        let board = board_of(
            flat_slots(4),
            &[Face::Bamboo(1), Face::Circle(2), Face::Bamboo(1), Face::Circle(2)],
        );
        let pairs = board.available_pairs();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&(0, 2)));
        assert!(pairs.contains(&(1, 3)));
    }

    #[test]
    fn test_available_pairs_all_combinations() {
        let board = board_of(flat_slots(4), &[Face::Flower(1); 4]);
        let pairs = board.available_pairs();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_available_pairs_only_free_matching_slots() {
        let board = Board::deal(Difficulty::Normal, 99).unwrap();
        let pairs = board.available_pairs();
        for &(a, b) in &pairs {
            assert!(a < b);
            assert!(board.is_free(a) && board.is_free(b));
            assert_eq!(board.tile(a).unwrap().match_key, board.tile(b).unwrap().match_key);
        }
        let free = board.free_slots();
        for (i, &a) in free.iter().enumerate() {
            for &b in &free[i + 1..] {
                let same = board.tile(a).unwrap().match_key == board.tile(b).unwrap().match_key;
                assert_eq!(same, pairs.contains(&(a, b)));
            }
        }
    }

    #[test]
    fn test_available_pairs_stuck() {
        let coords = [SlotCoord::new(0, 0, 0), SlotCoord::new(0, 0, 1)];
        let slots: Arc<[Slot]> = compute_relations(&coords).into();
        let board = board_of(slots, &[Face::Wind(Wind::East), Face::Dragon(Dragon::Red)]);
        assert!(board.available_pairs().is_empty());
        assert_eq!(board.status(), BoardStatus::Stuck);
        assert!(!board.is_free(0));
        assert!(board.is_free(1));
    }

    #[test]
    fn test_from_tiles_validation() {
        let slots = flat_slots(2);
        let dup = [Tile::new(0, Face::Bamboo(1)), Tile::new(0, Face::Bamboo(1))];
        assert_eq!(
            Board::from_tiles(slots.clone(), dup),
            Err(BoardError::DuplicateSlot { slot: 0 })
        );
        let out = [Tile::new(5, Face::Bamboo(1))];
        assert_eq!(
            Board::from_tiles(slots, out),
            Err(BoardError::SlotOutOfRange { slot: 5, slots: 2 })
        );
    }

    #[test]
    fn test_remove_pair_errors() {
        let coords = [
            SlotCoord::new(0, 0, 0),
            SlotCoord::new(2, 0, 0),
            SlotCoord::new(4, 0, 0),
            SlotCoord::new(10, 0, 0),
        ];
        let slots: Arc<[Slot]> = compute_relations(&coords).into();
        let mut board = board_of(
            slots,
            &[Face::Bamboo(1), Face::Bamboo(1), Face::Bamboo(2), Face::Bamboo(1)],
        );
        assert_eq!(board.remove_pair(0, 0), Err(MoveError::SameSlot { slot: 0 }));
        assert_eq!(board.remove_pair(0, 9), Err(MoveError::SlotOutOfRange { slot: 9 }));
        assert_eq!(board.remove_pair(1, 3), Err(MoveError::NotFree { slot: 1 }));
        assert_eq!(board.remove_pair(0, 2), Err(MoveError::Mismatch { a: 0, b: 2 }));

        let removed = board.remove_pair(0, 3).unwrap();
        assert_eq!(removed[0].slot, 0);
        assert_eq!(board.tile_count(), 2);
        assert_eq!(board.remove_pair(0, 1), Err(MoveError::EmptySlot { slot: 0 }));

        board.restore(&removed).unwrap();
        assert_eq!(board.tile_count(), 4);
        assert!(board.is_free(0));
    }

    #[test]
    fn test_restore_rejects_bad_tiles() {
        let mut board = board_of(flat_slots(4), &[Face::Bamboo(1); 4]);
        let removed = board.remove_pair(0, 1).unwrap();
        let before = board.clone();

        assert_eq!(
            board.restore(&[Tile::new(2, Face::Bamboo(1))]),
            Err(BoardError::DuplicateSlot { slot: 2 })
        );
        assert_eq!(
            board.restore(&[removed[0], Tile::new(9, Face::Bamboo(1))]),
            Err(BoardError::SlotOutOfRange { slot: 9, slots: 4 })
        );
        assert_eq!(
            board.restore(&[removed[0], removed[0]]),
            Err(BoardError::DuplicateSlot { slot: 0 })
        );
        assert_eq!(board, before, "a rejected restore changes nothing");

        board.restore(&removed).unwrap();
        assert_eq!(board.tile_count(), 4);
    }

    #[test]
    fn test_pairs_with_short_key_list() {
        let slots = flat_slots(4);
        let occupied: Occupancy = (0..4).collect();
        let keys = [Some(1u8), Some(1u8)];
        assert_eq!(available_pairs(&occupied, &keys, &slots), vec![(0, 1)]);
        assert!(available_pairs::<u8>(&occupied, &[], &slots).is_empty());
    }

    #[test]
    fn test_status_and_replay() {
        let board = board_of(
            flat_slots(4),
            &[Face::Bamboo(1), Face::Circle(2), Face::Bamboo(1), Face::Circle(2)],
        );
        assert_eq!(board.status(), BoardStatus::InPlay { available_pairs: 2 });
        let done = board.replay(&[(0, 2), (1, 3)]).unwrap();
        assert!(done.is_cleared());
        assert_eq!(done.status(), BoardStatus::Cleared);
        assert_eq!(board.tile_count(), 4, "replay works on a copy");
        assert!(board.replay(&[(0, 1)]).is_err());
    }

    #[test]
    fn test_deal_every_layout() {
        let easy = Board::deal(Difficulty::Easy, 1).unwrap();
        assert_eq!(easy.tile_count(), 66);
        assert!(easy.tile(66).is_none(), "odd layout leaves its last slot empty");
        // With the apex gone the four tiles under it open up.
        assert_eq!(easy.free_slots().len(), 24);

        let hard = Board::deal(Difficulty::Hard, 1).unwrap();
        assert_eq!(hard.tile_count(), 122);
        assert_eq!(hard.free_slots().len(), 36);

        assert_eq!(Board::deal(Difficulty::Normal, 1).unwrap().tile_count(), 150);
    }

    #[test]
    fn test_display_marks_free_tiles() {
        let board = board_of(flat_slots(2), &[Face::Bamboo(3), Face::Flower(2)]);
        let text = board.to_string();
        assert!(text.contains("bamboo-3"));
        assert!(text.contains("flower-2"));
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|l| l.ends_with('*')));
    }
}
