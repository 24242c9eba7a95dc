//! Easy positions: filled cells whose surroundings let a new word pass
//! through without brushing against other letters.

use common::{board::LetterTile, words::Direction};
use util::{
  grid::{Grid, Gridlike},
  pos::{Diff, Pos},
};

const N: u8 = 1 << 0;
const NE: u8 = 1 << 1;
const E: u8 = 1 << 2;
const SE: u8 = 1 << 3;
const S: u8 = 1 << 4;
const SW: u8 = 1 << 5;
const W: u8 = 1 << 6;
const NW: u8 = 1 << 7;

const NEIGHBORHOOD: [(u8, Diff); 8] = [
  (N, Diff { x: 0, y: -1 }),
  (NE, Diff { x: 1, y: -1 }),
  (E, Diff { x: 1, y: 0 }),
  (SE, Diff { x: 1, y: 1 }),
  (S, Diff { x: 0, y: 1 }),
  (SW, Diff { x: -1, y: 1 }),
  (W, Diff { x: -1, y: 0 }),
  (NW, Diff { x: -1, y: -1 }),
];

/// Exact 8-neighborhoods that count as easy, with the directions worth trying
/// through the cell. A lone neighbor suggests both extending its word away
/// from it and crossing it.
const EASY_PATTERNS: [(u8, &[Direction]); 6] = [
  (N | S, &[Direction::Across]),
  (E | W, &[Direction::Down]),
  (N, &[Direction::Down, Direction::Across]),
  (S, &[Direction::Down, Direction::Across]),
  (E, &[Direction::Across, Direction::Down]),
  (W, &[Direction::Across, Direction::Down]),
];

fn neighborhood<T: LetterTile>(grid: &Grid<T>, pos: Pos) -> u8 {
  NEIGHBORHOOD
    .iter()
    .filter(|(_, diff)| grid.get(pos + *diff).is_some_and(LetterTile::is_filled))
    .fold(0, |mask, (bit, _)| mask | bit)
}

/// Directions to try through `pos`, or `None` if it is empty or not easy.
pub fn easy_directions<T: LetterTile>(grid: &Grid<T>, pos: Pos) -> Option<&'static [Direction]> {
  if !grid.get(pos).is_some_and(LetterTile::is_filled) {
    return None;
  }
  let mask = neighborhood(grid, pos);
  EASY_PATTERNS
    .iter()
    .find(|(pattern, _)| *pattern == mask)
    .map(|(_, directions)| *directions)
}

/// Empty cells touching at least one letter along an edge, in board order.
pub fn frontier_cells<T: LetterTile>(grid: &Grid<T>) -> Vec<Pos> {
  grid
    .iter()
    .filter(|(pos, tile)| {
      !tile.is_filled()
        && pos
          .orthogonal_neighbors()
          .any(|neighbor| grid.get(neighbor).is_some_and(LetterTile::is_filled))
    })
    .map(|(pos, _)| pos)
    .collect()
}
