//! Error types for board construction, moves and shuffles.

use std::fmt;

/// Errors raised while building a board from a layout, a tile list or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The layout has more slots than an occupancy set can track.
    TooManySlots { slots: usize, max: usize },

    /// A tile refers to a slot index the layout does not have.
    SlotOutOfRange { slot: usize, slots: usize },

    /// Two tiles claim the same slot, or two lines describe the same cell.
    DuplicateSlot { slot: usize },

    /// A line of a board description could not be parsed (1-based line).
    Parse { line: usize, message: String },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::TooManySlots { slots, max } => {
                write!(f, "Layout has {} slots, at most {} are supported", slots, max)
            }
            BoardError::SlotOutOfRange { slot, slots } => write!(
                f,
                "Slot {} is out of range for a layout of {} slots",
                slot, slots
            ),
            BoardError::DuplicateSlot { slot } => write!(f, "Slot {} is used twice", slot),
            BoardError::Parse { line, message } => write!(f, "Line {}: {}", line, message),
        }
    }
}

impl std::error::Error for BoardError {}

/// Reasons a pair of slots cannot be removed from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    SameSlot { slot: usize },
    SlotOutOfRange { slot: usize },
    EmptySlot { slot: usize },
    /// The slot is covered, or blocked on both sides.
    NotFree { slot: usize },
    /// The two tiles do not share a match key.
    Mismatch { a: usize, b: usize },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::SameSlot { slot } => write!(f, "Cannot pair slot {} with itself", slot),
            MoveError::SlotOutOfRange { slot } => write!(f, "Slot {} does not exist", slot),
            MoveError::EmptySlot { slot } => write!(f, "Slot {} holds no tile", slot),
            MoveError::NotFree { slot } => write!(f, "Tile at slot {} is not free", slot),
            MoveError::Mismatch { a, b } => {
                write!(f, "Tiles at slots {} and {} do not match", a, b)
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Reasons a shuffle left the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleError {
    EmptyBoard,
    /// No removal plan was found within the attempt limit. This is not a
    /// proof that the layout cannot be cleared.
    NoPlan { attempts: usize },
    /// The plan did not cover every tile, so the old faces were kept.
    Incomplete { assigned: usize, tiles: usize },
}

impl fmt::Display for ShuffleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShuffleError::EmptyBoard => write!(f, "Nothing to shuffle, the board is empty"),
            ShuffleError::NoPlan { attempts } => write!(
                f,
                "Cannot shuffle, no solvable plan found in {} attempts",
                attempts
            ),
            ShuffleError::Incomplete { assigned, tiles } => write!(
                f,
                "Shuffle incomplete ({} of {} tiles assigned), keeping previous faces",
                assigned, tiles
            ),
        }
    }
}

impl std::error::Error for ShuffleError {}
