use std::fmt::{Debug, Display};

use bitcode::{Decode, Encode};

use crate::{
  error::{GridError, GridResult},
  pos::Pos,
};

/// Side length of every board. The game is specialized to 6x6.
pub const GRID_SIZE: u32 = 6;
pub const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// All positions in board order: left to right, then top to bottom.
pub fn positions() -> impl Iterator<Item = Pos> {
  (0..GRID_SIZE as i32).flat_map(|y| (0..GRID_SIZE as i32).map(move |x| Pos { x, y }))
}

pub trait Gridlike<T> {
  fn width(&self) -> u32 {
    GRID_SIZE
  }

  fn height(&self) -> u32 {
    GRID_SIZE
  }

  fn in_bounds(&self, pos: Pos) -> bool {
    pos.x >= 0 && pos.x < self.width() as i32 && pos.y >= 0 && pos.y < self.height() as i32
  }

  fn get(&self, pos: Pos) -> Option<&T>;

  fn iter_row<'a, 'b>(&'a self, y: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a;
  fn iter_col<'a, 'b>(&'a self, x: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a;

  fn transpose(&self) -> impl Gridlike<T>;
}

/// Row-major 6x6 storage. Every grid holds exactly `CELL_COUNT` tiles.
#[derive(Clone, PartialEq, Eq, Hash, Encode, Decode)]
pub struct Grid<T> {
  grid: Vec<T>,
}

impl<T> Grid<T> {
  pub fn from_vec(grid: Vec<T>) -> GridResult<Self> {
    if grid.len() != CELL_COUNT {
      return Err(
        GridError::Internal(format!(
          "Expected grid.len() == {CELL_COUNT}, got {}",
          grid.len()
        ))
        .into(),
      );
    }

    Ok(Self { grid })
  }

  fn idx(pos: Pos) -> usize {
    pos.x as usize + pos.y as usize * GRID_SIZE as usize
  }

  pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
    positions().zip(self.grid.iter())
  }

  pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
    if self.in_bounds(pos) {
      self.grid.get_mut(Self::idx(pos))
    } else {
      None
    }
  }

  /// Overwrites the tile at `pos`. Writing out of bounds is a placement bug
  /// and is reported as `GridError::InvalidPlacement`.
  pub fn set(&mut self, pos: Pos, value: T) -> GridResult {
    let tile = self
      .get_mut(pos)
      .ok_or_else(|| GridError::InvalidPlacement(format!("{pos} is out of bounds")))?;
    *tile = value;
    Ok(())
  }

  pub fn map<F, U>(&self, f: F) -> Grid<U>
  where
    F: FnMut(&T) -> U,
  {
    Grid { grid: self.grid.iter().map(f).collect() }
  }

  pub fn count(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
    self.grid.iter().filter(|tile| pred(tile)).count()
  }
}

impl<T> Grid<T>
where
  T: Default,
{
  pub fn new() -> Self {
    Self { grid: (0..CELL_COUNT).map(|_| T::default()).collect() }
  }
}

impl<T> Default for Grid<T>
where
  T: Default,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Gridlike<T> for Grid<T> {
  fn get(&self, pos: Pos) -> Option<&T> {
    if self.in_bounds(pos) {
      self.grid.get(Self::idx(pos))
    } else {
      None
    }
  }

  fn iter_row<'a, 'b>(&'a self, y: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a,
  {
    let y = y as i32;
    (0..self.width()).flat_map(move |x| self.get(Pos { x: x as i32, y }))
  }

  fn iter_col<'a, 'b>(&'a self, x: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a,
  {
    let x = x as i32;
    (0..self.height()).flat_map(move |y| self.get(Pos { x, y: y as i32 }))
  }

  fn transpose(&self) -> impl Gridlike<T> {
    TransposeGrid { grid: self }
  }
}

impl<T: Debug> Debug for Grid<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    (0..GRID_SIZE).try_fold((), |_, y| {
      self.iter_row(y).try_fold((), |_, t| write!(f, "{t:?} "))?;
      writeln!(f)
    })
  }
}

impl<T: Display> Display for Grid<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    (0..GRID_SIZE).try_fold((), |_, y| {
      self.iter_row(y).try_fold((), |_, t| write!(f, "{t}"))?;
      writeln!(f)
    })
  }
}

/// Read-only view with rows and columns swapped, so column scans can reuse
/// row-scanning code.
pub struct TransposeGrid<'a, T> {
  grid: &'a Grid<T>,
}

impl<T> Gridlike<T> for TransposeGrid<'_, T> {
  fn get(&self, pos: Pos) -> Option<&T> {
    self.grid.get(pos.transpose())
  }

  fn iter_row<'b, 'c>(&'b self, y: u32) -> impl Iterator<Item = &'c T>
  where
    'b: 'c,
    T: 'b,
  {
    self.grid.iter_col(y)
  }

  fn iter_col<'b, 'c>(&'b self, x: u32) -> impl Iterator<Item = &'c T>
  where
    'b: 'c,
    T: 'b,
  {
    self.grid.iter_row(x)
  }

  fn transpose(&self) -> impl Gridlike<T> {
    self.grid
  }
}

impl<G, T> Gridlike<T> for &G
where
  G: Gridlike<T>,
{
  fn get(&self, pos: Pos) -> Option<&T> {
    (**self).get(pos)
  }
  fn iter_row<'a, 'b>(&'a self, y: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a,
  {
    (**self).iter_row(y)
  }
  fn iter_col<'a, 'b>(&'a self, x: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a,
  {
    (**self).iter_col(x)
  }
  fn transpose(&self) -> impl Gridlike<T> {
    (**self).transpose()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use super::{positions, Grid, Gridlike, CELL_COUNT};
  use crate::{error::GridError, pos::Pos};

  #[gtest]
  fn test_from_vec_wrong_size() {
    expect_that!(Grid::from_vec(vec![0u8; 35]), err(anything()));
    expect_that!(Grid::from_vec(vec![0u8; CELL_COUNT]), ok(anything()));
  }

  #[gtest]
  fn test_set_out_of_bounds() {
    let mut grid = Grid::<Option<char>>::new();
    let error = grid.set(Pos::row_col(0, 6), Some('a')).unwrap_err();
    expect_true!(matches!(
      error.downcast_ref::<GridError>(),
      Some(GridError::InvalidPlacement(_))
    ));
    expect_that!(grid.set(Pos::row_col(-1, 0), Some('a')), err(anything()));
    expect_that!(grid.set(Pos::row_col(5, 5), Some('a')), ok(anything()));
    expect_that!(grid.get(Pos::row_col(5, 5)), some(eq(&Some('a'))));
  }

  #[gtest]
  fn test_transpose() {
    let mut grid = Grid::<u32>::new();
    grid.set(Pos::row_col(1, 4), 7).unwrap();
    let transposed = grid.transpose();
    expect_that!(transposed.get(Pos::row_col(4, 1)), some(eq(&7)));
    expect_that!(
      transposed.iter_row(4).cloned().collect::<Vec<_>>(),
      container_eq([0, 7, 0, 0, 0, 0])
    );
  }

  #[gtest]
  fn test_positions_board_order() {
    let positions: Vec<_> = positions().take(7).collect();
    expect_that!(positions[5], eq(Pos::row_col(0, 5)));
    expect_that!(positions[6], eq(Pos::row_col(1, 0)));
  }
}
