use util::{
  grid::{Grid, Gridlike},
  pos::{Diff, Pos},
};

use crate::board::LetterTile;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
  Across,
  Down,
}

impl Direction {
  pub fn step(self) -> Diff {
    match self {
      Direction::Across => Diff::DX,
      Direction::Down => Diff::DY,
    }
  }
}

/// A run of two or more letters read along one line of the grid. Words are
/// derived from the grid on demand and never stored on it.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Word {
  pub text: String,
  pub pos: Pos,
  pub direction: Direction,
}

impl Word {
  pub fn len(&self) -> usize {
    self.text.chars().count()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
    let step = self.direction.step();
    (0..self.len() as i32).map(move |idx| self.pos + idx * step)
  }
}

/// Scans every row of `grid` left to right, returning `(start, text)` for each
/// maximal run of at least two letters. Text is lowercased.
fn row_runs<T: LetterTile, G: Gridlike<T>>(grid: G) -> Vec<(Pos, String)> {
  let mut runs = Vec::new();
  for y in 0..grid.height() {
    let mut current: Option<(Pos, String)> = None;
    for (x, tile) in grid.iter_row(y).enumerate() {
      let Some(c) = tile.letter().map(|c| c.to_ascii_lowercase()) else {
        runs.extend(current.take());
        continue;
      };
      if let Some((_, text)) = current.as_mut() {
        text.push(c);
      } else {
        current = Some((Pos { x: x as i32, y: y as i32 }, c.to_string()));
      }
    }
    runs.extend(current);
  }

  runs.retain(|(_, text)| text.chars().count() > 1);
  runs
}

pub fn across_words<T: LetterTile>(grid: &Grid<T>) -> impl Iterator<Item = Word> {
  row_runs(grid)
    .into_iter()
    .map(|(pos, text)| Word { text, pos, direction: Direction::Across })
}

pub fn down_words<T: LetterTile>(grid: &Grid<T>) -> impl Iterator<Item = Word> {
  row_runs(grid.transpose())
    .into_iter()
    .map(|(pos, text)| Word { text, pos: pos.transpose(), direction: Direction::Down })
}

/// All across words followed by all down words. A cell shared by an across
/// and a down word appears in both.
pub fn words_in<T: LetterTile>(grid: &Grid<T>) -> Vec<Word> {
  across_words(grid).chain(down_words(grid)).collect()
}
