use util::{
  grid::{Gridlike, GRID_SIZE},
  pos::{Diff, Pos},
};

use crate::board::{Board, Validity};

/// Largest square cluster that can be scored. A 5x5 block needs 25 letters,
/// more than any rack holds.
pub const MAX_CLUSTER: u32 = 4;

fn window(origin: Pos, size: u32) -> impl Iterator<Item = Pos> {
  let size = size as i32;
  (0..size).flat_map(move |dy| (0..size).map(move |dx| origin + Diff { x: dx, y: dy }))
}

/// Scores each valid cell with the side length of the largest all-valid
/// square containing it. Expects a board already annotated by `validate`.
/// Cells outside every qualifying square keep no score.
pub fn score(board: &Board) -> Board {
  let mut scored = board.clone();
  let cells = scored.cells_mut();
  for pos in util::grid::positions() {
    if let Some(cell) = cells.get_mut(pos) {
      cell.score = None;
    }
  }

  for size in 1..=MAX_CLUSTER {
    for y in 0..=(GRID_SIZE - size) as i32 {
      for x in 0..=(GRID_SIZE - size) as i32 {
        let origin = Pos { x, y };
        let qualifies = window(origin, size).all(|pos| {
          board
            .cells()
            .get(pos)
            .is_some_and(|cell| cell.letter.is_some() && cell.validity == Validity::Valid)
        });
        if !qualifies {
          continue;
        }

        for pos in window(origin, size) {
          if let Some(cell) = cells.get_mut(pos) {
            cell.score = Some(size);
          }
        }
      }
    }
  }

  scored
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use std::collections::HashSet;

  use googletest::prelude::*;
  use util::{grid::Gridlike, pos::Pos};

  use super::score;
  use crate::{board::Board, validate::validate};

  fn scored(layout: &str, words: &[&str]) -> Board {
    let dict: HashSet<String> = words.iter().map(|word| word.to_string()).collect();
    score(&validate(&Board::from_layout(layout).unwrap(), &dict).board)
  }

  fn cell_score(board: &Board, row: i32, col: i32) -> Option<u32> {
    board.cells().get(Pos::row_col(row, col)).unwrap().score
  }

  #[gtest]
  fn test_two_by_two_block() {
    let board = scored(
      "......
       .at...
       .to...
       ......
       ......
       ......",
      &["at", "to"],
    );
    for (row, col) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
      expect_that!(cell_score(&board, row, col), some(eq(2)));
    }
    expect_that!(cell_score(&board, 0, 0), none());
    expect_that!(board.total_score(), eq(8));
  }

  #[gtest]
  fn test_single_valid_letter_scores_one() {
    let board = scored(
      "......
       ......
       .cat..
       ......
       ......
       ......",
      &["cat"],
    );
    expect_that!(cell_score(&board, 2, 1), some(eq(1)));
    expect_that!(board.total_score(), eq(3));
  }

  #[gtest]
  fn test_invalid_cells_are_unscored() {
    let board = scored(
      "......
       ......
       .xqz..
       ......
       ......
       ......",
      &[],
    );
    expect_that!(cell_score(&board, 2, 1), none());
    expect_that!(board.total_score(), eq(0));
  }

  #[gtest]
  fn test_larger_cluster_wins() {
    let board = scored(
      "abc...
       def...
       ghi...
       ......
       ......
       ......",
      &["abc", "def", "ghi", "adg", "beh", "cfi"],
    );
    expect_that!(cell_score(&board, 1, 1), some(eq(3)));
    expect_that!(cell_score(&board, 0, 0), some(eq(3)));
    expect_that!(board.total_score(), eq(27));
  }

  #[gtest]
  fn test_four_by_four() {
    let board = scored(
      "abcd..
       efgh..
       ijkl..
       mnop..
       ......
       ......",
      &[
        "abcd", "efgh", "ijkl", "mnop", "aeim", "bfjn", "cgko", "dhlp",
      ],
    );
    expect_that!(cell_score(&board, 3, 3), some(eq(4)));
    expect_that!(board.total_score(), eq(64));
  }
}
