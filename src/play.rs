use common::{
  board::{Board, Letter},
  game::{FinishOutcome, Game},
};
use itertools::Itertools;
use util::{
  error::{GridError, GridResult},
  grid::{Gridlike, GRID_SIZE},
};
use word_dict::WordSet;

/// Replays a submitted layout as a session over `rack`, placing a matching
/// rack letter on every filled cell.
pub fn play_layout(layout: &Board, rack: Vec<Letter>) -> GridResult<Game> {
  let mut game = Game::new(rack);
  for (pos, ch) in layout
    .cells()
    .iter()
    .filter_map(|(pos, cell)| cell.letter.map(|letter| (pos, letter.ch)))
  {
    let id = game
      .rack()
      .iter()
      .find(|letter| letter.ch == ch)
      .map(|letter| letter.id)
      .ok_or_else(|| {
        GridError::Parse(format!("'{ch}' at {pos} is not left in today's letters"))
      })?;
    game.place(id, pos)?;
  }
  Ok(game)
}

/// Human-readable report of a submitted board: the board, each cell's score,
/// and either the final score or what is still missing.
pub fn score_report(game: &mut Game, words: &impl WordSet) -> GridResult<String> {
  let evaluation = game.evaluate(words);
  let scores = (0..GRID_SIZE)
    .map(|y| {
      evaluation
        .board
        .cells()
        .iter_row(y)
        .map(|cell| cell.score.map_or('.', |score| char::from_digit(score, 10).unwrap_or('?')))
        .collect::<String>()
    })
    .join("\n");

  let summary = match game.finish(words)? {
    FinishOutcome::Finished { score } => format!("Score: {score}"),
    FinishOutcome::Rejected(advisories) => advisories.iter().join("\n"),
  };
  Ok(format!("{}\n{scores}\n\n{summary}", evaluation.board))
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use std::collections::HashSet;

  use board_gen::generator::generate_solution;
  use common::board::{Board, Letter};
  use googletest::prelude::*;
  use word_dict::Dictionary;

  use super::{play_layout, score_report};

  fn rack(text: &str) -> Vec<Letter> {
    text
      .chars()
      .enumerate()
      .map(|(id, ch)| Letter { id: id as u32, ch })
      .collect()
  }

  #[gtest]
  fn test_full_board_scores() {
    let layout = Board::from_layout(
      "......
       .at...
       .to...
       ......
       ......
       ......",
    )
    .unwrap();
    let words: HashSet<String> = ["at", "to"].into_iter().map(str::to_owned).collect();

    let mut game = play_layout(&layout, rack("otta")).unwrap();
    expect_that!(game.rack().len(), eq(0));

    let report = score_report(&mut game, &words).unwrap();
    expect_that!(report, contains_substring("Score: 8"));
    expect_that!(report, contains_substring(".22..."));
    expect_true!(game.is_game_over());
  }

  #[gtest]
  fn test_incomplete_board_is_rejected() {
    let layout = Board::from_layout(
      "at....
       ......
       ......
       ......
       ......
       ......",
    )
    .unwrap();
    let words: HashSet<String> = ["at"].into_iter().map(str::to_owned).collect();

    let mut game = play_layout(&layout, rack("tax")).unwrap();
    let report = score_report(&mut game, &words).unwrap();
    expect_that!(report, contains_substring("Only 2 of 3 letters placed"));
    expect_false!(game.is_game_over());
  }

  #[gtest]
  fn test_letter_not_in_rack() {
    let layout = Board::from_layout(
      "zz....
       ......
       ......
       ......
       ......
       ......",
    )
    .unwrap();
    expect_that!(play_layout(&layout, rack("z")).map(|_| ()), err(anything()));
  }

  #[gtest]
  fn test_daily_solution_scores() {
    let dict = Dictionary::bundled();
    let solution = generate_solution(&dict, "612025").unwrap();

    let mut game = play_layout(solution.board(), solution.shuffled_rack()).unwrap();
    let report = score_report(&mut game, &dict).unwrap();
    expect_that!(report, contains_substring("Score: "));
    expect_true!(game.is_game_over());
  }
}
