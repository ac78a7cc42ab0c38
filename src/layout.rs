//! Static board layouts.
//!
//! A layout is a fixed, ordered list of grid cells. Tiles are two units wide
//! and two units tall, so neighbouring tiles on a row differ by 2 in `x`, and
//! a tile on layer `z + 1` can straddle up to four tiles below it.

use std::fmt;
use std::str::FromStr;

/// Grid coordinates of a slot. `z` is the stacking layer, 0 at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl SlotCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        SlotCoord { x, y, z }
    }
}

const fn c(x: i32, y: i32, z: i32) -> SlotCoord {
    SlotCoord::new(x, y, z)
}

/// The preset layouts, named by difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Difficulty {
    /// Simple pyramid.
    Easy,
    /// Classic turtle.
    Normal,
    /// Extended pyramid.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Returns the layout's cells in slot-index order.
    pub fn coords(self) -> &'static [SlotCoord] {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Normal => &NORMAL,
            Difficulty::Hard => &HARD,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Unknown difficulty '{}'. Expected one of: easy, normal, hard",
                other
            )),
        }
    }
}

#[rustfmt::skip]
const EASY: [SlotCoord; 67] = [
    c(7, 0, 0), c(9, 0, 0), c(11, 0, 0), c(13, 0, 0), c(15, 0, 0), c(17, 0, 0),
    c(5, 2, 0), c(7, 2, 0), c(9, 2, 0), c(11, 2, 0), c(13, 2, 0), c(15, 2, 0), c(17, 2, 0), c(19, 2, 0),
    c(5, 4, 0), c(7, 4, 0), c(9, 4, 0), c(11, 4, 0), c(13, 4, 0), c(15, 4, 0), c(17, 4, 0), c(19, 4, 0),
    c(5, 6, 0), c(7, 6, 0), c(9, 6, 0), c(11, 6, 0), c(13, 6, 0), c(15, 6, 0), c(17, 6, 0), c(19, 6, 0),
    c(7, 8, 0), c(9, 8, 0), c(11, 8, 0), c(13, 8, 0), c(15, 8, 0), c(17, 8, 0),
    c(7, 2, 1), c(9, 2, 1), c(11, 2, 1), c(13, 2, 1), c(15, 2, 1), c(17, 2, 1),
    c(7, 4, 1), c(9, 4, 1), c(11, 4, 1), c(13, 4, 1), c(15, 4, 1), c(17, 4, 1),
    c(7, 6, 1), c(9, 6, 1), c(11, 6, 1), c(13, 6, 1), c(15, 6, 1), c(17, 6, 1),
    c(9, 3, 2), c(11, 3, 2), c(13, 3, 2), c(15, 3, 2),
    c(9, 5, 2), c(11, 5, 2), c(13, 5, 2), c(15, 5, 2),
    c(11, 3, 3), c(13, 3, 3),
    c(11, 5, 3), c(13, 5, 3),
    c(12, 4, 4),
];

#[rustfmt::skip]
const NORMAL: [SlotCoord; 150] = [
    c(0, 7, 0), c(2, 7, 0), c(28, 7, 0), c(30, 7, 0),
    c(4, 1, 0), c(6, 1, 0), c(8, 1, 0), c(10, 1, 0), c(12, 1, 0), c(14, 1, 0), c(16, 1, 0), c(18, 1, 0), c(20, 1, 0), c(22, 1, 0), c(24, 1, 0), c(26, 1, 0),
    c(6, 3, 0), c(8, 3, 0), c(10, 3, 0), c(12, 3, 0), c(14, 3, 0), c(16, 3, 0), c(18, 3, 0), c(20, 3, 0), c(22, 3, 0), c(24, 3, 0),
    c(6, 5, 0), c(8, 5, 0), c(10, 5, 0), c(12, 5, 0), c(14, 5, 0), c(16, 5, 0), c(18, 5, 0), c(20, 5, 0), c(22, 5, 0), c(24, 5, 0),
    c(6, 7, 0), c(8, 7, 0), c(10, 7, 0), c(12, 7, 0), c(14, 7, 0), c(16, 7, 0), c(18, 7, 0), c(20, 7, 0), c(22, 7, 0), c(24, 7, 0),
    c(6, 9, 0), c(8, 9, 0), c(10, 9, 0), c(12, 9, 0), c(14, 9, 0), c(16, 9, 0), c(18, 9, 0), c(20, 9, 0), c(22, 9, 0), c(24, 9, 0),
    c(6, 11, 0), c(8, 11, 0), c(10, 11, 0), c(12, 11, 0), c(14, 11, 0), c(16, 11, 0), c(18, 11, 0), c(20, 11, 0), c(22, 11, 0), c(24, 11, 0),
    c(4, 13, 0), c(6, 13, 0), c(8, 13, 0), c(10, 13, 0), c(12, 13, 0), c(14, 13, 0), c(16, 13, 0), c(18, 13, 0), c(20, 13, 0), c(22, 13, 0), c(24, 13, 0), c(26, 13, 0),
    c(8, 3, 1), c(10, 3, 1), c(12, 3, 1), c(14, 3, 1), c(16, 3, 1), c(18, 3, 1), c(20, 3, 1), c(22, 3, 1),
    c(8, 5, 1), c(10, 5, 1), c(12, 5, 1), c(14, 5, 1), c(16, 5, 1), c(18, 5, 1), c(20, 5, 1), c(22, 5, 1),
    c(8, 7, 1), c(10, 7, 1), c(12, 7, 1), c(14, 7, 1), c(16, 7, 1), c(18, 7, 1), c(20, 7, 1), c(22, 7, 1),
    c(8, 9, 1), c(10, 9, 1), c(12, 9, 1), c(14, 9, 1), c(16, 9, 1), c(18, 9, 1), c(20, 9, 1), c(22, 9, 1),
    c(8, 11, 1), c(10, 11, 1), c(12, 11, 1), c(14, 11, 1), c(16, 11, 1), c(18, 11, 1), c(20, 11, 1), c(22, 11, 1),
    c(10, 5, 2), c(12, 5, 2), c(14, 5, 2), c(16, 5, 2), c(18, 5, 2), c(20, 5, 2),
    c(10, 7, 2), c(12, 7, 2), c(14, 7, 2), c(16, 7, 2), c(18, 7, 2), c(20, 7, 2),
    c(10, 9, 2), c(12, 9, 2), c(14, 9, 2), c(16, 9, 2), c(18, 9, 2), c(20, 9, 2),
    c(12, 5, 3), c(14, 5, 3), c(16, 5, 3), c(18, 5, 3),
    c(12, 7, 3), c(14, 7, 3), c(16, 7, 3), c(18, 7, 3),
    c(12, 9, 3), c(14, 9, 3), c(16, 9, 3), c(18, 9, 3),
    c(14, 7, 4), c(16, 7, 4),
];

#[rustfmt::skip]
const HARD: [SlotCoord; 122] = [
    c(8, 0, 0), c(10, 0, 0), c(12, 0, 0), c(14, 0, 0), c(16, 0, 0), c(18, 0, 0), c(20, 0, 0), c(22, 0, 0),
    c(6, 2, 0), c(8, 2, 0), c(10, 2, 0), c(12, 2, 0), c(14, 2, 0), c(16, 2, 0), c(18, 2, 0), c(20, 2, 0), c(22, 2, 0), c(24, 2, 0),
    c(6, 4, 0), c(8, 4, 0), c(10, 4, 0), c(12, 4, 0), c(14, 4, 0), c(16, 4, 0), c(18, 4, 0), c(20, 4, 0), c(22, 4, 0), c(24, 4, 0),
    c(6, 6, 0), c(8, 6, 0), c(10, 6, 0), c(12, 6, 0), c(14, 6, 0), c(16, 6, 0), c(18, 6, 0), c(20, 6, 0), c(22, 6, 0), c(24, 6, 0),
    c(6, 8, 0), c(8, 8, 0), c(10, 8, 0), c(12, 8, 0), c(14, 8, 0), c(16, 8, 0), c(18, 8, 0), c(20, 8, 0), c(22, 8, 0), c(24, 8, 0),
    c(8, 10, 0), c(10, 10, 0), c(12, 10, 0), c(14, 10, 0), c(16, 10, 0), c(18, 10, 0), c(20, 10, 0), c(22, 10, 0),
    c(8, 2, 1), c(10, 2, 1), c(12, 2, 1), c(14, 2, 1), c(16, 2, 1), c(18, 2, 1), c(20, 2, 1), c(22, 2, 1),
    c(8, 4, 1), c(10, 4, 1), c(12, 4, 1), c(14, 4, 1), c(16, 4, 1), c(18, 4, 1), c(20, 4, 1), c(22, 4, 1),
    c(8, 6, 1), c(10, 6, 1), c(12, 6, 1), c(14, 6, 1), c(16, 6, 1), c(18, 6, 1), c(20, 6, 1), c(22, 6, 1),
    c(8, 8, 1), c(10, 8, 1), c(12, 8, 1), c(14, 8, 1), c(16, 8, 1), c(18, 8, 1), c(20, 8, 1), c(22, 8, 1),
    c(10, 3, 2), c(12, 3, 2), c(14, 3, 2), c(16, 3, 2), c(18, 3, 2), c(20, 3, 2),
    c(10, 5, 2), c(12, 5, 2), c(14, 5, 2), c(16, 5, 2), c(18, 5, 2), c(20, 5, 2),
    c(10, 7, 2), c(12, 7, 2), c(14, 7, 2), c(16, 7, 2), c(18, 7, 2), c(20, 7, 2),
    c(12, 3, 3), c(14, 3, 3), c(16, 3, 3), c(18, 3, 3),
    c(12, 5, 3), c(14, 5, 3), c(16, 5, 3), c(18, 5, 3),
    c(12, 7, 3), c(14, 7, 3), c(16, 7, 3), c(18, 7, 3),
    c(14, 4, 4), c(16, 4, 4),
    c(14, 6, 4), c(16, 6, 4),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(Difficulty::Easy.coords().len(), 67);
        assert_eq!(Difficulty::Normal.coords().len(), 150);
        assert_eq!(Difficulty::Hard.coords().len(), 122);
    }

    #[test]
    fn test_layout_cells_are_unique() {
        for difficulty in Difficulty::ALL {
            let coords = difficulty.coords();
            let unique: HashSet<_> = coords.iter().collect();
            assert_eq!(unique.len(), coords.len(), "duplicate cell in {}", difficulty);
        }
    }

    #[test]
    fn test_layouts_start_on_the_table() {
        for difficulty in Difficulty::ALL {
            let coords = difficulty.coords();
            assert_eq!(coords[0].z, 0);
            assert!(coords.iter().all(|p| p.z >= 0 && p.x >= 0 && p.y >= 0));
        }
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Normal".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        let err = "expert".parse::<Difficulty>().unwrap_err();
        assert!(err.contains("Unknown difficulty 'expert'"));
        assert_eq!(Difficulty::Easy.to_string(), "easy");
    }
}
