//! Tile faces, match keys and the seeded deal.

use crate::engine::{Slot, Tile};
use crate::rng::Mulberry32;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Number of tiles in the standard deck: 34 faces, four copies each.
pub const DECK_SIZE: usize = 136;

/// Copies of each standard face in the deck.
pub const COPIES_PER_FACE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Wind {
    East,
    South,
    West,
    North,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dragon {
    Red,
    Green,
    White,
}

/// The picture printed on a tile. Suit ranks run 1 to 9, flowers 1 to 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Face {
    Bamboo(u8),
    Character(u8),
    Circle(u8),
    Wind(Wind),
    Dragon(Dragon),
    Flower(u8),
}

/// What two tiles must share to be removed together.
///
/// Every standard face only matches itself. All flowers share one key, so
/// `flower-1` pairs with `flower-3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchKey {
    Face(Face),
    Flower,
}

impl Face {
    pub fn match_key(self) -> MatchKey {
        match self {
            Face::Flower(_) => MatchKey::Flower,
            face => MatchKey::Face(face),
        }
    }

    /// The 34 standard faces in deck order.
    pub fn standard() -> Vec<Face> {
        let mut faces = Vec::with_capacity(34);
        faces.extend((1..=9).map(Face::Bamboo));
        faces.extend((1..=9).map(Face::Character));
        faces.extend((1..=9).map(Face::Circle));
        faces.extend([Wind::East, Wind::South, Wind::West, Wind::North].map(Face::Wind));
        faces.extend([Dragon::Red, Dragon::Green, Dragon::White].map(Face::Dragon));
        faces
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Bamboo(n) => write!(f, "bamboo-{}", n),
            Face::Character(n) => write!(f, "char-{}", n),
            Face::Circle(n) => write!(f, "circle-{}", n),
            Face::Wind(w) => f.write_str(match w {
                Wind::East => "wind-east",
                Wind::South => "wind-south",
                Wind::West => "wind-west",
                Wind::North => "wind-north",
            }),
            Face::Dragon(d) => f.write_str(match d {
                Dragon::Red => "dragon-red",
                Dragon::Green => "dragon-green",
                Dragon::White => "dragon-white",
            }),
            Face::Flower(n) => write!(f, "flower-{}", n),
        }
    }
}

impl FromStr for Face {
    type Err = String;

    /// Parses the names produced by `Display`, e.g. `bamboo-3` or `wind-east`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once('-')
            .ok_or_else(|| format!("Unrecognized face '{}'", s))?;
        let rank = |max: u8| -> Result<u8, String> {
            match value.parse::<u8>() {
                Ok(n) if (1..=max).contains(&n) => Ok(n),
                _ => Err(format!("Unrecognized face '{}'", s)),
            }
        };
        let face = match (kind, value) {
            ("bamboo", _) => Face::Bamboo(rank(9)?),
            ("char", _) => Face::Character(rank(9)?),
            ("circle", _) => Face::Circle(rank(9)?),
            ("flower", _) => Face::Flower(rank(4)?),
            ("wind", "east") => Face::Wind(Wind::East),
            ("wind", "south") => Face::Wind(Wind::South),
            ("wind", "west") => Face::Wind(Wind::West),
            ("wind", "north") => Face::Wind(Wind::North),
            ("dragon", "red") => Face::Dragon(Dragon::Red),
            ("dragon", "green") => Face::Dragon(Dragon::Green),
            ("dragon", "white") => Face::Dragon(Dragon::White),
            _ => return Err(format!("Unrecognized face '{}'", s)),
        };
        Ok(face)
    }
}

/// Builds the unshuffled deck for a layout of `slot_count` slots.
///
/// Four consecutive copies of every standard face, followed by one flower per
/// slot beyond [`DECK_SIZE`], rotating through `flower-1` to `flower-4`.
pub fn build_deck(slot_count: usize) -> Vec<Face> {
    let mut deck = Vec::with_capacity(slot_count.max(DECK_SIZE));
    for face in Face::standard() {
        deck.extend(std::iter::repeat(face).take(COPIES_PER_FACE));
    }
    let extra = slot_count.saturating_sub(DECK_SIZE);
    deck.extend((0..extra).map(|i| Face::Flower((i % 4) as u8 + 1)));
    deck
}

/// Shuffles `deck` in place with a Fisher–Yates pass from the end.
pub fn shuffle_deck(deck: &mut [Face], rng: &mut Mulberry32) {
    for i in (1..deck.len()).rev() {
        let j = rng.next_index(i + 1);
        deck.swap(i, j);
    }
}

/// Evens out match key counts in `deck[..dealt]` using the faces after it.
///
/// Keys with an odd count in the dealt part are taken two at a time: the
/// last dealt tile of the second key is swapped for an undealt tile of the
/// first. Every key has an even total in the full deck, so an odd dealt count
/// always leaves an undealt copy to swap in.
fn balance_dealt_pairs(deck: &mut [Face], dealt: usize) {
    let (hand, rest) = deck.split_at_mut(dealt);
    let mut odd: Vec<MatchKey> = Vec::new();
    for face in hand.iter() {
        let key = face.match_key();
        match odd.iter().position(|&k| k == key) {
            Some(i) => {
                odd.remove(i);
            }
            None => odd.push(key),
        }
    }

    for keys in odd.chunks(2) {
        let &[keep, drop] = keys else {
            continue;
        };
        let spare = rest.iter().position(|f| f.match_key() == keep);
        let last = hand.iter().rposition(|f| f.match_key() == drop);
        if let (Some(spare), Some(last)) = (spare, last) {
            std::mem::swap(&mut hand[last], &mut rest[spare]);
        }
    }
}

/// Deals the tiles for a layout, deterministically for a given `seed`.
///
/// The deck is built by [`build_deck`], shuffled with [`Mulberry32`] seeded
/// with `seed`, and `deck[i]` goes to slot `i`. Nothing here checks that the
/// result can be cleared; that is the solvers' job.
///
/// A layout smaller than [`DECK_SIZE`] takes the front of the shuffled deck,
/// with a few tiles swapped against the undealt rest so that every match key
/// comes in pairs. When such a layout has an odd slot count its last slot
/// stays empty.
///
/// # Examples
/// ```
/// use mahjong_engine::deck::generate_board;
/// use mahjong_engine::engine::compute_relations;
/// use mahjong_engine::layout::Difficulty;
///
/// let slots = compute_relations(Difficulty::Normal.coords());
/// let first = generate_board(&slots, 7);
/// assert_eq!(first, generate_board(&slots, 7));
/// assert_eq!(first.len(), 150);
///
/// // 67 slots: 66 tiles, the apex stays empty.
/// let easy = compute_relations(Difficulty::Easy.coords());
/// assert_eq!(generate_board(&easy, 7).len(), 66);
/// ```
pub fn generate_board(slots: &[Slot], seed: u32) -> Vec<Tile> {
    let mut deck = build_deck(slots.len());
    let mut rng = Mulberry32::new(seed);
    shuffle_deck(&mut deck, &mut rng);

    if slots.len() < DECK_SIZE {
        let dealt = slots.len() & !1;
        balance_dealt_pairs(&mut deck, dealt);
        deck.truncate(dealt);
    }
    debug!(
        "dealt {} tiles ({} flowers) onto {} slots with seed {}",
        deck.len(),
        deck.len().saturating_sub(DECK_SIZE),
        slots.len(),
        seed
    );

    deck.into_iter()
        .enumerate()
        .map(|(slot, face)| Tile::new(slot, face))
        .collect()
}
