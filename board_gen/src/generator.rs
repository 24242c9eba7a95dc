use common::{
  board::{Board, Letter, LETTER_BUDGET},
  island::is_connected,
  validate::all_words_valid,
  words::Direction,
};
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};
use util::{
  error::{GridError, GridResult},
  grid::{Grid, GRID_SIZE},
  pos::Pos,
};
use word_dict::Dictionary;

use crate::{
  easy::{easy_directions, frontier_cells},
  fit::{fit_word, place_word},
  seed::SeededRng,
};

/// Ordinary growth passes run after the first, long-word pass.
pub const MAX_GROWTH_PASSES: usize = 10;
/// Generation attempts per seed before giving up.
pub const MAX_ATTEMPTS: usize = 8;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// A finished day's board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
  seed: String,
  board: Board,
}

impl Solution {
  pub fn seed(&self) -> &str {
    &self.seed
  }

  pub fn board(&self) -> &Board {
    &self.board
  }

  /// The solution's letters in board order.
  pub fn letters(&self) -> Vec<Letter> {
    self.board.letters()
  }

  /// The letters in a fresh random order. Unlike the board this is not tied
  /// to the seed, so every session sees its own rack.
  pub fn shuffled_rack(&self) -> Vec<Letter> {
    let mut rack = self.letters();
    rack.shuffle(&mut rand::rng());
    rack
  }
}

/// Builds one board from one seed. Each instance owns its RNG, so the same
/// seed and dictionary always produce the same grid.
pub struct SolutionGenerator<'a> {
  dict: &'a Dictionary,
  rng: SeededRng,
  grid: Grid<Option<char>>,
}

impl<'a> SolutionGenerator<'a> {
  pub fn new(dict: &'a Dictionary, seed: &str) -> Self {
    Self {
      dict,
      rng: SeededRng::from_seed_str(seed),
      grid: Grid::new(),
    }
  }

  fn letter_count(&self) -> usize {
    self.grid.count(Option::is_some)
  }

  fn place_first_word(&mut self) -> GridResult {
    let len = self.rng.uniform_int(5, 6);
    let words = self.dict.words_of_length(len as usize);
    let word = self
      .rng
      .uniform_index(words.len())
      .and_then(|idx| words.get(idx))
      .ok_or_else(|| GridError::Dictionary(format!("No {len}-letter words available")))?;
    let row = self.rng.uniform_int(0, GRID_SIZE as i32 - 1);
    let col = self.rng.uniform_int(0, GRID_SIZE as i32 - len);

    debug!(word, row, col, "Placing first word");
    place_word(&mut self.grid, Pos::row_col(row, col), Direction::Across, word)
  }

  /// Visits every letter in random order, fitting a word through each one
  /// still easy on the current grid. Returns whether anything was placed.
  fn grow(&mut self, prefer_long: bool) -> GridResult<bool> {
    let mut letters: Vec<Pos> = self
      .grid
      .iter()
      .filter(|(_, tile)| tile.is_some())
      .map(|(pos, _)| pos)
      .collect();
    self.rng.shuffle(&mut letters);

    let mut progress = false;
    for pos in letters {
      let Some(directions) = easy_directions(&self.grid, pos) else {
        continue;
      };
      for &direction in directions {
        let fitted = fit_word(&self.grid, pos, direction, prefer_long, self.dict, &mut self.rng)?;
        if let Some(next) = fitted {
          self.grid = next;
          progress = true;
          break;
        }
      }
    }
    Ok(progress)
  }

  /// Places single letters next to the board until the budget is spent, each
  /// one keeping every word in the lenient set.
  fn fill(&mut self) -> GridResult {
    while self.letter_count() < LETTER_BUDGET {
      let mut cells = frontier_cells(&self.grid);
      self.rng.shuffle(&mut cells);
      if !self.place_filler(&cells)? {
        return Err(
          GridError::IterationCap(format!(
            "No legal filler letter with {} letters placed",
            self.letter_count()
          ))
          .into(),
        );
      }
    }
    Ok(())
  }

  fn place_filler(&mut self, cells: &[Pos]) -> GridResult<bool> {
    let mut alphabet: Vec<char> = ALPHABET.chars().collect();
    for &pos in cells {
      self.rng.shuffle(&mut alphabet);
      for &ch in &alphabet {
        self.grid.set(pos, Some(ch))?;
        if all_words_valid(&self.grid, self.dict.lenient()) {
          return Ok(true);
        }
      }
      self.grid.set(pos, None)?;
    }
    Ok(false)
  }

  pub fn generate(mut self) -> GridResult<Grid<Option<char>>> {
    self.place_first_word()?;
    self.grow(true)?;
    for pass in 0..MAX_GROWTH_PASSES {
      if !self.grow(false)? {
        debug!(pass, letters = self.letter_count(), "Growth stalled");
        break;
      }
    }

    debug!(letters = self.letter_count(), "Filling remaining budget");
    self.fill()?;
    Ok(self.grid)
  }
}

fn check_complete(grid: &Grid<Option<char>>, dict: &Dictionary) -> GridResult {
  let letters = grid.count(Option::is_some);
  if letters != LETTER_BUDGET {
    return Err(
      GridError::Internal(format!("Generated {letters} letters, expected {LETTER_BUDGET}")).into(),
    );
  }
  if !all_words_valid(grid, dict.lenient()) {
    return Err(GridError::Internal("Generated board has invalid words".to_owned()).into());
  }
  if !is_connected(grid) {
    return Err(GridError::Internal("Generated board is not connected".to_owned()).into());
  }
  Ok(())
}

/// Generates the board for `seed`. An attempt that runs past an iteration cap
/// is retried with the seed suffixed by the attempt number; any other error
/// ends generation.
pub fn generate_solution(dict: &Dictionary, seed: &str) -> GridResult<Solution> {
  dict.ensure_generation_ready()?;

  let mut last_err = None;
  for attempt in 0..MAX_ATTEMPTS {
    let attempt_seed = if attempt == 0 {
      seed.to_owned()
    } else {
      format!("{seed}#{attempt}")
    };

    match SolutionGenerator::new(dict, &attempt_seed).generate() {
      Ok(grid) => {
        check_complete(&grid, dict)?;
        let board = Board::from_chars(&grid);
        info!(seed, attempt, "Generated solution\n{board}");
        return Ok(Solution { seed: seed.to_owned(), board });
      }
      Err(err) if GridError::is_iteration_cap(err.as_ref()) => {
        warn!(seed = attempt_seed, "Generation attempt failed: {err}");
        last_err = Some(err);
      }
      Err(err) => return Err(err),
    }
  }

  Err(last_err.unwrap_or_else(|| {
    GridError::Internal(format!("No attempts made for {seed}")).into()
  }))
}
