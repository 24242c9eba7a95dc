use std::{
  fmt::Display,
  ops::{Add, Mul},
};

/// A board coordinate. `x` is the column, `y` is the row.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
  pub x: i32,
  pub y: i32,
}

impl Pos {
  pub const fn row_col(row: i32, col: i32) -> Self {
    Self { x: col, y: row }
  }

  pub const fn row(&self) -> i32 {
    self.y
  }

  pub const fn col(&self) -> i32 {
    self.x
  }

  pub const fn transpose(&self) -> Self {
    Self { x: self.y, y: self.x }
  }

  /// The four edge-sharing neighbors, bounds unchecked.
  pub fn orthogonal_neighbors(self) -> impl Iterator<Item = Pos> {
    Diff::ORTHOGONAL.into_iter().map(move |diff| self + diff)
  }
}

impl Add<Diff> for Pos {
  type Output = Self;

  fn add(self, rhs: Diff) -> Self {
    Self { x: self.x + rhs.x, y: self.y + rhs.y }
  }
}

impl Display for Pos {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "(row {}, col {})", self.y, self.x)
  }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Diff {
  pub x: i32,
  pub y: i32,
}

impl Diff {
  pub const DX: Self = Self { x: 1, y: 0 };
  pub const DY: Self = Self { x: 0, y: 1 };

  pub const ORTHOGONAL: [Self; 4] = [
    Self { x: 0, y: -1 },
    Self { x: 1, y: 0 },
    Self { x: 0, y: 1 },
    Self { x: -1, y: 0 },
  ];
}

impl Mul<Diff> for i32 {
  type Output = Diff;

  fn mul(self, rhs: Diff) -> Diff {
    Diff { x: self * rhs.x, y: self * rhs.y }
  }
}
