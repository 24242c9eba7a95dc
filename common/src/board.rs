use std::fmt::Display;

use bitcode::{Decode, Encode};
use util::{
  error::{GridError, GridResult},
  grid::{Grid, Gridlike, CELL_COUNT, GRID_SIZE},
  pos::Pos,
};

/// Every puzzle hands the player exactly this many letters.
pub const LETTER_BUDGET: usize = 20;

/// A single tile of the rack. Two letters with the same character are still
/// distinct, told apart by `id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode)]
pub struct Letter {
  pub id: u32,
  pub ch: char,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Validity {
  #[default]
  Empty,
  Valid,
  Invalid,
  /// Valid in one direction, invalid in the other. The validator never
  /// produces this; it is kept for presentation layers that compute it.
  Mixed,
}

/// Why a player cell last changed. Carried for the presentation layer and
/// never consulted by validation or scoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChangeReason {
  #[default]
  Unchanged,
  Placed,
  Moved,
  Removed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
  pub letter: Option<Letter>,
  pub validity: Validity,
  pub score: Option<u32>,
  pub change: ChangeReason,
}

/// Anything stored in a grid that may hold a letter.
pub trait LetterTile {
  fn letter(&self) -> Option<char>;

  fn is_filled(&self) -> bool {
    self.letter().is_some()
  }
}

impl LetterTile for Option<char> {
  fn letter(&self) -> Option<char> {
    *self
  }
}

impl LetterTile for Cell {
  fn letter(&self) -> Option<char> {
    self.letter.map(|letter| letter.ch)
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
  cells: Grid<Cell>,
}

impl Board {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a board from bare characters, numbering letters in board order.
  pub fn from_chars(grid: &Grid<Option<char>>) -> Self {
    let mut next_id = 0;
    let cells = grid.map(|tile| Cell {
      letter: tile.map(|ch| {
        let letter = Letter { id: next_id, ch };
        next_id += 1;
        letter
      }),
      ..Cell::default()
    });
    Self { cells }
  }

  /// Parses six lines of six characters each. `.` and `_` are empty cells,
  /// any alphabetic character is a letter. Surrounding whitespace is ignored.
  pub fn from_layout(layout: &str) -> GridResult<Self> {
    let tiles = layout
      .lines()
      .map(str::trim)
      .filter(|line| !line.is_empty())
      .enumerate()
      .try_fold(Vec::with_capacity(CELL_COUNT), |mut tiles, (row, line)| -> GridResult<_> {
        if line.chars().count() != GRID_SIZE as usize {
          return Err(
            GridError::Parse(format!(
              "Row {row} has {} tiles, expected {GRID_SIZE}",
              line.chars().count()
            ))
            .into(),
          );
        }
        for c in line.chars() {
          tiles.push(match c {
            '.' | '_' => None,
            c if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
            c => {
              return Err(GridError::Parse(format!("Unrecognized board character '{c}'")).into())
            }
          });
        }
        Ok(tiles)
      })?;

    if tiles.len() != CELL_COUNT {
      return Err(
        GridError::Parse(format!(
          "Board has {} rows, expected {GRID_SIZE}",
          tiles.len() / GRID_SIZE as usize
        ))
        .into(),
      );
    }
    Ok(Self::from_chars(&Grid::from_vec(tiles)?))
  }

  pub fn cells(&self) -> &Grid<Cell> {
    &self.cells
  }

  pub(crate) fn cells_mut(&mut self) -> &mut Grid<Cell> {
    &mut self.cells
  }

  pub fn cell(&self, pos: Pos) -> GridResult<&Cell> {
    self
      .cells
      .get(pos)
      .ok_or_else(|| GridError::InvalidPlacement(format!("{pos} is out of bounds")).into())
  }

  fn cell_mut(&mut self, pos: Pos) -> GridResult<&mut Cell> {
    self
      .cells
      .get_mut(pos)
      .ok_or_else(|| GridError::InvalidPlacement(format!("{pos} is out of bounds")).into())
  }

  pub fn letter_at(&self, pos: Pos) -> Option<char> {
    self.cells.get(pos).and_then(LetterTile::letter)
  }

  /// Puts `letter` at `pos`, returning whatever letter was there before.
  pub fn place(
    &mut self,
    pos: Pos,
    letter: Letter,
    reason: ChangeReason,
  ) -> GridResult<Option<Letter>> {
    let cell = self.cell_mut(pos)?;
    let displaced = cell.letter.replace(letter);
    cell.change = reason;
    Ok(displaced)
  }

  /// Clears `pos`, returning the letter that was there.
  pub fn take(&mut self, pos: Pos, reason: ChangeReason) -> GridResult<Option<Letter>> {
    let cell = self.cell_mut(pos)?;
    let taken = cell.letter.take();
    if taken.is_some() {
      cell.change = reason;
      cell.validity = Validity::Empty;
      cell.score = None;
    }
    Ok(taken)
  }

  pub fn position_of(&self, letter_id: u32) -> Option<Pos> {
    self
      .cells
      .iter()
      .find(|(_, cell)| cell.letter.is_some_and(|letter| letter.id == letter_id))
      .map(|(pos, _)| pos)
  }

  pub fn letter_count(&self) -> usize {
    self.cells.count(LetterTile::is_filled)
  }

  /// Letters in board order: left to right, then top to bottom.
  pub fn letters(&self) -> Vec<Letter> {
    self.cells.iter().filter_map(|(_, cell)| cell.letter).collect()
  }

  pub fn chars(&self) -> Grid<Option<char>> {
    self.cells.map(LetterTile::letter)
  }

  pub fn total_score(&self) -> u32 {
    self.cells.iter().filter_map(|(_, cell)| cell.score).sum()
  }
}

impl Display for Board {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    (0..GRID_SIZE).try_fold((), |_, y| {
      self
        .cells
        .iter_row(y)
        .try_fold((), |_, cell| write!(f, "{}", cell.letter().unwrap_or('.')))?;
      writeln!(f)
    })
  }
}
