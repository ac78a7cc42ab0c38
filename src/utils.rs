use crate::deck::Face;
use crate::engine::{compute_relations, Board, Tile, MAX_SLOTS};
use crate::error::BoardError;
use crate::layout::SlotCoord;
use std::collections::HashSet;

/// Parses a board from lines of the form `x y z face`.
///
/// Each non-empty line describes one tile; its slot index is its position
/// among the tile lines. Text after `#` is ignored, so a line can carry a
/// comment. Relations are computed from the coordinates, so any layout can be
/// described this way, including ones the presets do not cover.
///
/// # Returns
/// * `Ok(Board)` with one tile per described slot.
/// * `Err(BoardError::Parse)` naming the 1-based line if a line does not have
///   four fields, a coordinate is not an integer, a face name is unknown, or
///   a cell is described twice.
/// * `Err(BoardError::TooManySlots)` if more than `MAX_SLOTS` tiles are given.
///
/// # Examples
/// ```
/// use mahjong_engine::utils::board_from_lines;
///
/// let board = board_from_lines(&[
///     "# a flat row of four",
///     "0 0 0 bamboo-1",
///     "2 0 0 circle-2",
///     "4 0 0 circle-2   # free on the right",
///     "6 0 0 bamboo-1",
/// ]).unwrap();
/// assert_eq!(board.tile_count(), 4);
/// assert_eq!(board.available_pairs(), vec![(0, 3)]);
///
/// assert!(board_from_lines(&["0 0 0 joker"]).is_err());
/// ```
pub fn board_from_lines(lines: &[&str]) -> Result<Board, BoardError> {
    let mut coords = Vec::new();
    let mut faces = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(BoardError::Parse {
                line: line_no,
                message: format!("Expected 'x y z face', found {} fields", fields.len()),
            });
        }

        let mut xyz = [0i32; 3];
        for (value, (field, axis)) in xyz.iter_mut().zip(fields.iter().zip(["x", "y", "z"])) {
            *value = field.parse::<i32>().map_err(|_| BoardError::Parse {
                line: line_no,
                message: format!("Invalid {} coordinate '{}'", axis, field),
            })?;
        }
        let coord = SlotCoord::new(xyz[0], xyz[1], xyz[2]);
        if !seen.insert(coord) {
            return Err(BoardError::Parse {
                line: line_no,
                message: format!("Cell ({}, {}, {}) is described twice", coord.x, coord.y, coord.z),
            });
        }

        let face = fields[3]
            .parse::<Face>()
            .map_err(|message| BoardError::Parse { line: line_no, message })?;

        coords.push(coord);
        faces.push(face);
    }

    if coords.len() > MAX_SLOTS {
        return Err(BoardError::TooManySlots {
            slots: coords.len(),
            max: MAX_SLOTS,
        });
    }

    let tiles = faces.into_iter().enumerate().map(|(slot, face)| Tile::new(slot, face));
    Board::from_tiles(compute_relations(&coords).into(), tiles)
}

/// Writes the present tiles of `board` in the format read by [`board_from_lines`].
///
/// Empty slots are skipped, so slot indices are renumbered when a partly
/// cleared board is written out and read back.
pub fn board_to_lines(board: &Board) -> Vec<String> {
    board
        .tiles()
        .map(|tile| {
            let pos = board.slots()[tile.slot].pos;
            format!("{} {} {} {}", pos.x, pos.y, pos.z, tile.face)
        })
        .collect()
}

/// Parses a seed typed by a user; `_` separators are allowed.
///
/// Returns `Ok(None)` for blank input so the caller can pick a random seed.
pub fn parse_seed_input(input: &str) -> Result<Option<u32>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let normalized = trimmed.replace('_', "");
    normalized
        .parse::<u32>()
        .map(Some)
        .map_err(|_| format!("Seed must be a whole number from 0 to {}.", u32::MAX))
}

/// A fresh seed in the same range the web game draws from.
pub fn random_seed() -> u32 {
    use rand::Rng;
    rand::thread_rng().gen_range(0..1_000_000)
}
