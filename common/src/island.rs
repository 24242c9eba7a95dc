use util::grid::{Grid, Gridlike};

use crate::board::LetterTile;

/// Whether the filled cells of `grid` form a single 4-connected "word
/// island". Only the presence of letters matters, not whether they spell
/// anything. An empty grid is not connected.
pub fn is_connected<T: LetterTile>(grid: &Grid<T>) -> bool {
  let total = grid.count(LetterTile::is_filled);
  let Some(root) = grid
    .iter()
    .find(|(_, tile)| tile.is_filled())
    .map(|(pos, _)| pos)
  else {
    return false;
  };

  let mut visited = Grid::<bool>::new();
  let mut stack = vec![root];
  let mut reached = 0;
  while let Some(pos) = stack.pop() {
    match visited.get_mut(pos) {
      Some(seen) if !*seen => *seen = true,
      _ => continue,
    }
    reached += 1;

    stack.extend(
      pos
        .orthogonal_neighbors()
        .filter(|&neighbor| grid.get(neighbor).is_some_and(LetterTile::is_filled)),
    );
  }

  reached == total
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use super::is_connected;
  use crate::board::Board;

  fn connected(layout: &str) -> bool {
    is_connected(Board::from_layout(layout).unwrap().cells())
  }

  #[gtest]
  fn test_empty_is_not_connected() {
    expect_false!(connected(
      "......
       ......
       ......
       ......
       ......
       ......"
    ));
  }

  #[gtest]
  fn test_single_letter() {
    expect_true!(connected(
      "......
       ......
       ...x..
       ......
       ......
       ......"
    ));
  }

  #[gtest]
  fn test_diagonal_is_not_connected() {
    expect_false!(connected(
      "......
       ..a...
       ...b..
       ......
       ......
       ......"
    ));
  }

  #[gtest]
  fn test_crossing_words() {
    expect_true!(connected(
      "house.
       o.....
       rivers
       s....a
       e....y
       ......"
    ));
  }

  #[gtest]
  fn test_two_islands() {
    expect_false!(connected(
      "cat...
       ......
       ......
       ...dog
       ......
       ......"
    ));
  }
}
