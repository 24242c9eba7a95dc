use util::grid::Grid;
use word_dict::WordSet;

use crate::{
  board::{Board, LetterTile, Validity},
  words::{words_in, Word},
};

/// A copy of the validated board with every cell's `Validity` filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
  pub board: Board,
  pub all_valid: bool,
}

/// True when every run of two or more letters on `grid` is in `words`.
pub fn all_words_valid<T: LetterTile>(grid: &Grid<T>, words: &impl WordSet) -> bool {
  words_in(grid).iter().all(|word| words.contains(&word.text))
}

pub fn invalid_words<T: LetterTile>(grid: &Grid<T>, words: &impl WordSet) -> Vec<Word> {
  words_in(grid)
    .into_iter()
    .filter(|word| !words.contains(&word.text))
    .collect()
}

/// Annotates every cell from the letters alone, ignoring any validity already
/// on `board`. A filled cell is `Valid` if at least one of the words through
/// it is real, even when the word in the other direction is not.
pub fn validate(board: &Board, words: &impl WordSet) -> Validation {
  let (real, fake): (Vec<_>, Vec<_>) = words_in(board.cells())
    .into_iter()
    .partition(|word| words.contains(&word.text));

  let mut annotated = board.clone();
  let cells = annotated.cells_mut();
  for pos in util::grid::positions() {
    if let Some(cell) = cells.get_mut(pos) {
      cell.validity = if cell.is_filled() {
        Validity::Invalid
      } else {
        Validity::Empty
      };
    }
  }

  for pos in real.iter().flat_map(Word::positions) {
    if let Some(cell) = cells.get_mut(pos) {
      cell.validity = Validity::Valid;
    }
  }
  for pos in fake.iter().flat_map(Word::positions) {
    if let Some(cell) = cells.get_mut(pos) {
      if cell.validity != Validity::Valid {
        cell.validity = Validity::Invalid;
      }
    }
  }

  Validation { board: annotated, all_valid: fake.is_empty() }
}
