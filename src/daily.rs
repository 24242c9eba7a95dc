use std::{
  fs::{self, File},
  io::Write,
  path::Path,
};

use bitcode::{Decode, Encode};
use board_gen::generator::{generate_solution, Solution};
use chrono::{Local, NaiveDate, Utc};
use common::board::{Board, Letter};
use rand::seq::SliceRandom;
use tracing::{info, warn};
use util::{
  error::{GridError, GridResult},
  grid::Grid,
};
use word_dict::Dictionary;

/// Today's calendar day, from the local clock or pinned to UTC.
pub fn today(utc: bool) -> NaiveDate {
  if utc {
    Utc::now().date_naive()
  } else {
    Local::now().date_naive()
  }
}

/// The day's generated solution as stored in the cache file.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct DailyPuzzle {
  seed: String,
  solution: Grid<Option<char>>,
  letters: Vec<Letter>,
}

impl DailyPuzzle {
  pub fn from_solution(solution: &Solution) -> Self {
    Self {
      seed: solution.seed().to_owned(),
      solution: solution.board().chars(),
      letters: solution.letters(),
    }
  }

  pub fn seed(&self) -> &str {
    &self.seed
  }

  pub fn board(&self) -> Board {
    Board::from_chars(&self.solution)
  }

  /// Letters in a fresh random order for this session.
  pub fn rack(&self) -> Vec<Letter> {
    let mut rack = self.letters.clone();
    rack.shuffle(&mut rand::rng());
    rack
  }

  fn load(path: &Path) -> GridResult<Self> {
    Ok(bitcode::decode(&fs::read(path)?)?)
  }

  fn save(&self, path: &Path) -> GridResult {
    let result = bitcode::encode(self);
    let mut file = File::create(path)?;
    file.write_all(&result)?;
    Ok(())
  }

  /// Reuses the cached puzzle at `path` if it was generated for `seed`,
  /// otherwise generates the day's puzzle and overwrites the cache.
  pub fn load_or_generate(path: &Path, dict: &Dictionary, seed: &str) -> GridResult<Self> {
    if path.exists() {
      match Self::load(path) {
        Ok(puzzle) if puzzle.seed == seed => {
          info!(seed, path = %path.display(), "Using cached puzzle");
          return Ok(puzzle);
        }
        Ok(puzzle) => info!(cached = puzzle.seed, seed, "Cached puzzle is stale"),
        Err(err) => warn!(path = %path.display(), "Failed to decode cached puzzle: {err}"),
      }
    }

    let puzzle = Self::from_solution(&generate_solution(dict, seed)?);
    if let Err(err) = puzzle.save(path) {
      warn!(path = %path.display(), "Failed to write puzzle cache: {err}");
    }
    Ok(puzzle)
  }
}

/// Reads a player board layout from `path`, or stdin for `-`.
pub fn read_layout(path: &Path) -> GridResult<Board> {
  let text = if path == Path::new("-") {
    std::io::read_to_string(std::io::stdin())?
  } else {
    fs::read_to_string(path)
      .map_err(|err| GridError::Parse(format!("Failed to read {}: {err}", path.display())))?
  };
  Board::from_layout(&text)
}
