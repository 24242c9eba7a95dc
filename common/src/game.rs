use std::fmt::Display;

use itertools::Itertools;
use tracing::{debug, info};
use util::{
  error::{GridError, GridResult},
  pos::Pos,
};
use word_dict::WordSet;

use crate::{
  board::{Board, ChangeReason, Letter},
  island::is_connected,
  score::score,
  validate::{invalid_words, validate},
};

/// Why a board cannot be submitted yet. These are shown to the player, they
/// are not failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advisory {
  NotEnoughLetters { placed: usize, required: usize },
  NotConnected,
  InvalidWords(Vec<String>),
}

impl Display for Advisory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Advisory::NotEnoughLetters { placed, required } => {
        write!(f, "Only {placed} of {required} letters placed")
      }
      Advisory::NotConnected => write!(f, "Board is not fully connected"),
      Advisory::InvalidWords(words) => write!(f, "Not words: {}", words.join(", ")),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
  /// Validated and scored copy of the player's board.
  pub board: Board,
  pub all_valid: bool,
  pub connected: bool,
  pub letters_placed: usize,
  pub total_score: u32,
  pub advisories: Vec<Advisory>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinishOutcome {
  Finished { score: u32 },
  Rejected(Vec<Advisory>),
}

/// One player's session over a day's rack: letters move between the rack and
/// the board until a successful `finish` freezes the board.
#[derive(Clone, Debug)]
pub struct Game {
  board: Board,
  rack: Vec<Letter>,
  game_over: bool,
}

impl Game {
  pub fn new(rack: Vec<Letter>) -> Self {
    Self { board: Board::new(), rack, game_over: false }
  }

  pub fn board(&self) -> &Board {
    &self.board
  }

  pub fn rack(&self) -> &[Letter] {
    &self.rack
  }

  pub fn is_game_over(&self) -> bool {
    self.game_over
  }

  fn total_letters(&self) -> usize {
    self.rack.len() + self.board.letter_count()
  }

  fn ensure_playing(&self) -> GridResult {
    if self.game_over {
      return Err(GridError::Internal("Game is already finished".to_owned()).into());
    }
    Ok(())
  }

  /// Puts letter `letter_id` at `pos`, taking it from the rack or from its
  /// current cell. A letter already at `pos` goes back to the rack.
  pub fn place(&mut self, letter_id: u32, pos: Pos) -> GridResult {
    self.ensure_playing()?;
    self.board.cell(pos)?;

    let on_rack = self.rack.iter().position(|letter| letter.id == letter_id);
    let (letter, reason) = if let Some(idx) = on_rack {
      (self.rack.remove(idx), ChangeReason::Placed)
    } else if let Some(from) = self.board.position_of(letter_id) {
      if from == pos {
        return Ok(());
      }
      let letter = self
        .board
        .take(from, ChangeReason::Moved)?
        .ok_or_else(|| GridError::Internal(format!("Letter {letter_id} vanished from {from}")))?;
      (letter, ChangeReason::Moved)
    } else {
      return Err(GridError::Internal(format!("Unknown letter id {letter_id}")).into());
    };

    if let Some(displaced) = self.board.place(pos, letter, reason)? {
      self.rack.push(displaced);
    }
    Ok(())
  }

  /// Returns the letter at `pos`, if any, to the rack.
  pub fn remove(&mut self, pos: Pos) -> GridResult<Option<Letter>> {
    self.ensure_playing()?;
    let taken = self.board.take(pos, ChangeReason::Removed)?;
    self.rack.extend(taken);
    Ok(taken)
  }

  pub fn evaluate(&self, words: &impl WordSet) -> Evaluation {
    let validation = validate(&self.board, words);
    let board = score(&validation.board);
    let connected = is_connected(board.cells());
    let letters_placed = board.letter_count();
    let required = self.total_letters();

    let mut advisories = Vec::new();
    if letters_placed < required {
      advisories.push(Advisory::NotEnoughLetters { placed: letters_placed, required });
    }
    if !connected {
      advisories.push(Advisory::NotConnected);
    }
    if !validation.all_valid {
      advisories.push(Advisory::InvalidWords(
        invalid_words(board.cells(), words)
          .into_iter()
          .map(|word| word.text)
          .unique()
          .collect(),
      ));
    }

    Evaluation {
      total_score: board.total_score(),
      board,
      all_valid: validation.all_valid,
      connected,
      letters_placed,
      advisories,
    }
  }

  /// Submits the board. With no advisories outstanding the scored board is
  /// frozen and the game ends; otherwise nothing changes.
  pub fn finish(&mut self, words: &impl WordSet) -> GridResult<FinishOutcome> {
    self.ensure_playing()?;
    let evaluation = self.evaluate(words);
    if !evaluation.advisories.is_empty() {
      debug!(advisories = evaluation.advisories.len(), "Finish rejected");
      return Ok(FinishOutcome::Rejected(evaluation.advisories));
    }

    info!(score = evaluation.total_score, "Game finished");
    self.board = evaluation.board;
    self.game_over = true;
    Ok(FinishOutcome::Finished { score: evaluation.total_score })
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use std::collections::HashSet;

  use googletest::prelude::*;
  use util::pos::Pos;

  use super::{Advisory, FinishOutcome, Game};
  use crate::board::{ChangeReason, Letter};

  fn rack(text: &str) -> Vec<Letter> {
    text
      .chars()
      .enumerate()
      .map(|(id, ch)| Letter { id: id as u32, ch })
      .collect()
  }

  fn words(list: &[&str]) -> HashSet<String> {
    list.iter().map(|word| word.to_string()).collect()
  }

  #[gtest]
  fn test_place_moves_letter_off_rack() {
    let mut game = Game::new(rack("cat"));
    game.place(1, Pos::row_col(0, 1)).unwrap();
    expect_that!(game.rack().len(), eq(2));
    expect_that!(game.board().letter_at(Pos::row_col(0, 1)), some(eq('a')));
    expect_that!(
      game.board().cell(Pos::row_col(0, 1)).unwrap().change,
      eq(ChangeReason::Placed)
    );
  }

  #[gtest]
  fn test_place_over_letter_returns_it() {
    let mut game = Game::new(rack("cat"));
    game.place(0, Pos::row_col(0, 0)).unwrap();
    game.place(2, Pos::row_col(0, 0)).unwrap();
    expect_that!(game.board().letter_at(Pos::row_col(0, 0)), some(eq('t')));
    expect_that!(
      game.rack().iter().map(|letter| letter.ch).collect::<Vec<_>>(),
      unordered_elements_are![eq(&'a'), eq(&'c')]
    );
  }

  #[gtest]
  fn test_move_on_board() {
    let mut game = Game::new(rack("cat"));
    game.place(0, Pos::row_col(0, 0)).unwrap();
    game.place(0, Pos::row_col(3, 3)).unwrap();
    expect_that!(game.board().letter_at(Pos::row_col(0, 0)), none());
    expect_that!(game.board().letter_at(Pos::row_col(3, 3)), some(eq('c')));
    expect_that!(game.rack().len(), eq(2));
  }

  #[gtest]
  fn test_remove() {
    let mut game = Game::new(rack("cat"));
    game.place(2, Pos::row_col(1, 1)).unwrap();
    expect_that!(game.remove(Pos::row_col(1, 1)).unwrap(), some(eq(Letter { id: 2, ch: 't' })));
    expect_that!(game.remove(Pos::row_col(1, 1)).unwrap(), none());
    expect_that!(game.rack().len(), eq(3));
  }

  #[gtest]
  fn test_bad_requests() {
    let mut game = Game::new(rack("cat"));
    expect_that!(game.place(7, Pos::row_col(0, 0)), err(anything()));
    expect_that!(game.place(0, Pos::row_col(0, 6)), err(anything()));
    expect_that!(game.rack().len(), eq(3));
  }

  #[gtest]
  fn test_advisories() {
    let mut game = Game::new(rack("catdo"));
    game.place(0, Pos::row_col(0, 0)).unwrap();
    game.place(1, Pos::row_col(0, 1)).unwrap();
    game.place(3, Pos::row_col(3, 0)).unwrap();
    game.place(4, Pos::row_col(3, 1)).unwrap();

    let evaluation = game.evaluate(&words(&["cat", "do"]));
    expect_that!(
      evaluation.advisories,
      unordered_elements_are![
        eq(&Advisory::NotEnoughLetters { placed: 4, required: 5 }),
        eq(&Advisory::NotConnected),
        eq(&Advisory::InvalidWords(vec!["ca".to_owned()])),
      ]
    );
    expect_false!(evaluation.all_valid);
    expect_false!(evaluation.connected);
  }

  #[gtest]
  fn test_finish() {
    let dict = words(&["cat", "at"]);
    let mut game = Game::new(rack("cat"));
    game.place(0, Pos::row_col(2, 1)).unwrap();
    game.place(1, Pos::row_col(2, 2)).unwrap();

    expect_true!(matches!(game.finish(&dict).unwrap(), FinishOutcome::Rejected(_)));
    expect_false!(game.is_game_over());

    game.place(2, Pos::row_col(2, 3)).unwrap();
    expect_that!(game.finish(&dict).unwrap(), eq(&FinishOutcome::Finished { score: 3 }));
    expect_true!(game.is_game_over());
    expect_that!(game.board().total_score(), eq(3));

    expect_that!(game.finish(&dict), err(anything()));
    expect_that!(game.remove(Pos::row_col(2, 1)), err(anything()));
  }
}
