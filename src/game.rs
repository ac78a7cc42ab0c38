//! A single game session: board, score, selection, hint and undo history.
//!
//! `Game` owns everything about one game, so several games (or tests) can run
//! side by side. Randomness for hints and shuffles comes from the game's own
//! `SmallRng`, seeded from the deal seed, which makes a session reproducible.
use crate::config::{ScoreRules, SolverConfig};
use crate::engine::{Board, BoardStatus, Pair, Tile};
use crate::error::{BoardError, MoveError, ShuffleError};
use crate::greedy::{find_greedy_solution, reshuffle, GreedyExhausted};
use crate::layout::Difficulty;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// What a click on a slot did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The slot is empty or not free; nothing changed.
    Blocked(usize),
    Selected(usize),
    /// The selected slot was clicked again.
    Deselected(usize),
    /// The selection moved to a tile that does not match the previous one.
    Reselected { previous: usize, current: usize },
    /// The two tiles matched and were removed.
    Matched(Pair),
}

#[derive(Clone, Debug)]
struct UndoEntry {
    tiles: [Tile; 2],
    score: u32,
    moves: u32,
}

/// Manages the state of one game.
///
/// # Examples
/// ```
/// use mahjong_engine::game::Game;
/// use mahjong_engine::layout::Difficulty;
///
/// let mut game = Game::new(Difficulty::Normal, 1234).unwrap();
/// let (a, b) = game.board().available_pairs()[0];
/// game.remove_pair(a, b).unwrap();
/// assert_eq!(game.score(), 100);
/// assert!(game.undo());
/// assert_eq!(game.score(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    difficulty: Option<Difficulty>,
    seed: u32,
    score: u32,
    moves: u32,
    selected: Option<usize>,
    hint: Option<Pair>,
    history: Vec<UndoEntry>,
    rules: ScoreRules,
    config: SolverConfig,
    rng: SmallRng,
}

impl Game {
    /// Deals a new game on a preset layout.
    pub fn new(difficulty: Difficulty, seed: u32) -> Result<Self, BoardError> {
        let board = Board::deal(difficulty, seed)?;
        info!("new {} game, seed {}", difficulty, seed);
        let mut game = Game::with_board(board, seed);
        game.difficulty = Some(difficulty);
        Ok(game)
    }

    /// Starts a game on an existing board. `seed` drives hints and shuffles.
    pub fn with_board(board: Board, seed: u32) -> Self {
        Game {
            board,
            difficulty: None,
            seed,
            score: 0,
            moves: 0,
            selected: None,
            hint: None,
            history: Vec::new(),
            rules: ScoreRules::default(),
            config: SolverConfig::default(),
            rng: SmallRng::seed_from_u64(u64::from(seed)),
        }
    }

    pub fn with_rules(mut self, rules: ScoreRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of pairs removed so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The hint currently shown, if any.
    pub fn hint_pair(&self) -> Option<Pair> {
        self.hint
    }

    /// Pairs still on the board, i.e. half the tile count.
    pub fn pairs_left(&self) -> usize {
        self.board.tile_count() / 2
    }

    pub fn available_pair_count(&self) -> usize {
        self.board.available_pairs().len()
    }

    pub fn status(&self) -> BoardStatus {
        self.board.status()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Handles a click on `slot`.
    ///
    /// Clicking a free tile selects it, clicking it again deselects it, and
    /// clicking a second free tile either removes both (same match key) or
    /// moves the selection there.
    pub fn select(&mut self, slot: usize) -> Selection {
        if !self.board.is_free(slot) {
            return Selection::Blocked(slot);
        }
        match self.selected {
            None => {
                self.selected = Some(slot);
                Selection::Selected(slot)
            }
            Some(previous) if previous == slot => {
                self.selected = None;
                Selection::Deselected(slot)
            }
            Some(previous) => match self.remove_pair(previous, slot) {
                Ok(()) => Selection::Matched((previous.min(slot), previous.max(slot))),
                Err(_) => {
                    self.selected = Some(slot);
                    Selection::Reselected {
                        previous,
                        current: slot,
                    }
                }
            },
        }
    }

    /// Removes a matching pair of free tiles, scoring it and recording undo.
    pub fn remove_pair(&mut self, a: usize, b: usize) -> Result<(), MoveError> {
        let score_before = self.score;
        let tiles = self.board.remove_pair(a, b)?;
        self.history.push(UndoEntry {
            tiles,
            score: score_before,
            moves: self.moves,
        });
        self.score += self.rules.match_reward;
        self.moves += 1;
        self.selected = None;
        if let Some((h1, h2)) = self.hint {
            if [h1, h2].iter().any(|h| *h == a || *h == b) {
                self.hint = None;
            }
        }
        debug!("removed pair ({}, {}), {} tiles left", a, b, self.board.tile_count());

        match self.board.status() {
            BoardStatus::Cleared => info!("board cleared with score {}", self.score),
            BoardStatus::Stuck => info!("no more moves with {} tiles left", self.board.tile_count()),
            BoardStatus::InPlay { .. } => {}
        }
        Ok(())
    }

    /// Returns a removable pair to show the player.
    ///
    /// While the previous hint is still on the board it is returned again at
    /// no cost. Otherwise a random available pair becomes the new hint and the
    /// hint penalty is charged. Returns `None` when no pair is available.
    pub fn hint(&mut self) -> Option<Pair> {
        if let Some((a, b)) = self.hint {
            if self.board.tile(a).is_some() && self.board.tile(b).is_some() {
                return Some((a, b));
            }
            self.hint = None;
        }

        let pairs = self.board.available_pairs();
        if pairs.is_empty() {
            return None;
        }
        let pair = pairs[self.rng.gen_range(0..pairs.len())];
        self.hint = Some(pair);
        self.score = self.score.saturating_sub(self.rules.hint_penalty);
        Some(pair)
    }

    /// Looks for a plan that clears the board from here, within the
    /// configured greedy attempts. Score and board are unchanged.
    pub fn find_plan(&mut self) -> Result<Vec<Pair>, GreedyExhausted> {
        find_greedy_solution(&self.board, self.config.greedy_tries, &mut self.rng)
    }

    /// Reassigns the remaining faces so the board can be cleared again.
    ///
    /// On failure the board, score and hint are left untouched.
    pub fn shuffle(&mut self) -> Result<(), ShuffleError> {
        let shuffled = reshuffle(&self.board, self.config.shuffle_tries, &mut self.rng)?;
        self.board = shuffled;
        self.hint = None;
        self.selected = None;
        self.score = self.score.saturating_sub(self.rules.shuffle_penalty);
        Ok(())
    }

    /// Puts the last removed pair back and restores score and move count.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        if let Err(e) = self.board.restore(&entry.tiles) {
            warn!("cannot undo: {}", e);
            self.history.push(entry);
            return false;
        }
        self.score = entry.score;
        self.moves = entry.moves;
        self.selected = None;
        self.hint = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Dragon, Face, Wind};
    use crate::engine::compute_relations;
    use crate::layout::SlotCoord;
    use crate::solver::SolveLimits;

    fn game_from(coords: &[SlotCoord], faces: &[Face]) -> Game {
        let tiles = faces.iter().enumerate().map(|(i, &f)| Tile::new(i, f));
        let board = Board::from_tiles(compute_relations(coords).into(), tiles).unwrap();
        Game::with_board(board, 42)
    }

    fn flat(n: i32) -> Vec<SlotCoord> {
        (0..n).map(|i| SlotCoord::new(i * 4, 0, 0)).collect()
    }

    fn four_tile_game() -> Game {
        game_from(
            &flat(4),
            &[Face::Bamboo(1), Face::Circle(2), Face::Bamboo(1), Face::Circle(2)],
        )
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(Difficulty::Normal, 7).unwrap();
        assert_eq!(game.difficulty(), Some(Difficulty::Normal));
        assert_eq!(game.seed(), 7);
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.pairs_left(), 75);
        assert!(!game.can_undo());

        let easy = Game::new(Difficulty::Easy, 7).unwrap();
        assert_eq!(easy.pairs_left(), 33);
    }

    #[test]
    fn test_select_flow() {
        let mut game = four_tile_game();
        assert_eq!(game.select(0), Selection::Selected(0));
        assert_eq!(game.select(0), Selection::Deselected(0));
        assert_eq!(game.select(0), Selection::Selected(0));
        assert_eq!(game.select(1), Selection::Reselected { previous: 0, current: 1 });
        assert_eq!(game.selected(), Some(1));
        assert_eq!(game.select(3), Selection::Matched((1, 3)));
        assert_eq!(game.selected(), None);
        assert_eq!(game.score(), 100);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.select(1), Selection::Blocked(1));
    }

    #[test]
    fn test_select_blocked_tile() {
        let coords = [SlotCoord::new(0, 0, 0), SlotCoord::new(0, 0, 1)];
        let mut game = game_from(&coords, &[Face::Wind(Wind::East), Face::Dragon(Dragon::Red)]);
        assert_eq!(game.select(0), Selection::Blocked(0));
        assert_eq!(game.select(9), Selection::Blocked(9));
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_win_status() {
        let mut game = four_tile_game();
        assert_eq!(game.available_pair_count(), 2);
        game.remove_pair(0, 2).unwrap();
        game.remove_pair(1, 3).unwrap();
        assert_eq!(game.status(), BoardStatus::Cleared);
        assert_eq!(game.score(), 200);
        assert_eq!(game.pairs_left(), 0);
    }

    #[test]
    fn test_remove_pair_rejects_mismatch() {
        let mut game = four_tile_game();
        assert_eq!(game.remove_pair(0, 1), Err(MoveError::Mismatch { a: 0, b: 1 }));
        assert_eq!(game.score(), 0);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_undo_restores_state() {
        let mut game = four_tile_game();
        assert!(!game.undo());
        game.remove_pair(0, 2).unwrap();
        game.remove_pair(1, 3).unwrap();
        assert!(game.undo());
        assert_eq!(game.score(), 100);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.board().tile_count(), 2);
        assert!(game.undo());
        assert_eq!(game.score(), 0);
        assert_eq!(game.board().tile_count(), 4);
        assert_eq!(game.board().tile(0).unwrap().face, Face::Bamboo(1));
        assert!(!game.undo());
    }

    #[test]
    fn test_hint_penalty_and_persistence() {
        let mut game = four_tile_game();
        game.remove_pair(0, 2).unwrap();
        assert_eq!(game.score(), 100);

        let hint = game.hint().unwrap();
        assert_eq!(hint, (1, 3));
        assert_eq!(game.score(), 50);
        // Same hint again is free.
        assert_eq!(game.hint(), Some((1, 3)));
        assert_eq!(game.score(), 50);
        assert_eq!(game.hint_pair(), Some((1, 3)));

        // Removing a hinted tile clears the hint.
        game.remove_pair(1, 3).unwrap();
        assert_eq!(game.hint_pair(), None);
        assert_eq!(game.hint(), None);
    }

    #[test]
    fn test_hint_score_floor() {
        let mut game = four_tile_game();
        assert!(game.hint().is_some());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_hint_is_a_valid_pair() {
        let mut game = Game::new(Difficulty::Normal, 31).unwrap();
        if let Some((a, b)) = game.hint() {
            assert!(game.board().check_pair(a, b).is_ok());
        }
    }

    #[test]
    fn test_shuffle_penalty_and_undo_stack() {
        let mut game = Game::new(Difficulty::Normal, 8).unwrap();
        let (a, b) = game.board().available_pairs()[0];
        game.remove_pair(a, b).unwrap();
        game.hint();
        let before = game.board().tile_count();

        game.shuffle().unwrap();
        assert_eq!(game.board().tile_count(), before);
        assert_eq!(game.score(), 0, "100 - 50 hint - 100 shuffle floors at 0");
        assert_eq!(game.hint_pair(), None);
        assert!(game.can_undo());
    }

    #[test]
    fn test_shuffle_stuck_game() {
        let coords = [
            SlotCoord::new(0, 0, 0),
            SlotCoord::new(0, 0, 1),
            SlotCoord::new(10, 0, 0),
            SlotCoord::new(10, 0, 1),
        ];
        let mut game = game_from(
            &coords,
            &[Face::Bamboo(1), Face::Circle(1), Face::Circle(1), Face::Bamboo(1)],
        );
        assert_eq!(game.status(), BoardStatus::Stuck);
        game.shuffle().unwrap();
        assert_eq!(game.status(), BoardStatus::InPlay { available_pairs: 1 });
    }

    #[test]
    fn test_shuffle_empty_board_fails() {
        let mut game = four_tile_game();
        game.remove_pair(0, 2).unwrap();
        game.remove_pair(1, 3).unwrap();
        assert_eq!(game.shuffle(), Err(ShuffleError::EmptyBoard));
        assert_eq!(game.score(), 200);
    }

    #[test]
    fn test_custom_rules() {
        let mut game = four_tile_game().with_rules(ScoreRules::new(10, 1, 5));
        game.remove_pair(0, 2).unwrap();
        assert_eq!(game.score(), 10);
        game.hint();
        assert_eq!(game.score(), 9);
    }

    #[test]
    fn test_find_plan_uses_configured_tries() {
        let mut game = four_tile_game();
        let plan = game.find_plan().unwrap();
        assert!(game.board().replay(&plan).unwrap().is_cleared());
        assert_eq!(game.score(), 0);

        let coords = [SlotCoord::new(0, 0, 0), SlotCoord::new(0, 0, 1)];
        let mut stuck = game_from(&coords, &[Face::Wind(Wind::East), Face::Dragon(Dragon::Red)])
            .with_config(SolverConfig::new(7, 3, SolveLimits::unbounded()));
        assert_eq!(stuck.find_plan(), Err(GreedyExhausted { attempts: 7 }));
    }

    #[test]
    fn test_shuffle_uses_configured_tries() {
        // A stack of three beside a single tile. Even ignoring faces, the only
        // first move strands the bottom of the stack under its middle tile.
        let coords = [
            SlotCoord::new(0, 0, 0),
            SlotCoord::new(0, 0, 1),
            SlotCoord::new(0, 0, 2),
            SlotCoord::new(10, 0, 0),
        ];
        let mut game = game_from(
            &coords,
            &[Face::Bamboo(1), Face::Circle(1), Face::Bamboo(1), Face::Circle(1)],
        )
        .with_config(SolverConfig::new(1, 5, SolveLimits::unbounded()));
        assert_eq!(game.shuffle(), Err(ShuffleError::NoPlan { attempts: 5 }));
    }

    #[test]
    fn test_sessions_are_reproducible() {
        let mut a = Game::new(Difficulty::Normal, 500).unwrap();
        let mut b = Game::new(Difficulty::Normal, 500).unwrap();
        assert_eq!(a.hint(), b.hint());
        a.shuffle().unwrap();
        b.shuffle().unwrap();
        assert_eq!(a.board(), b.board());
    }
}
