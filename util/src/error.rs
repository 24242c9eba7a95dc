use core::fmt;
use std::{
  error::Error,
  fmt::{Display, Formatter},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
  Internal(String),
  Parse(String),
  /// A write landed outside the 6x6 bounds, or a word overflowed its line.
  /// Always a bug in offset arithmetic, never a user error.
  InvalidPlacement(String),
  /// A bounded search ran past its iteration cap.
  IterationCap(String),
  Dictionary(String),
}

impl GridError {
  pub fn is_iteration_cap(err: &(dyn Error + 'static)) -> bool {
    matches!(err.downcast_ref::<GridError>(), Some(GridError::IterationCap(_)))
  }
}

impl Display for GridError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      GridError::Internal(msg) => write!(f, "Internal error: {msg}"),
      GridError::Parse(msg) => write!(f, "Parse error: {msg}"),
      GridError::InvalidPlacement(msg) => write!(f, "Invalid placement: {msg}"),
      GridError::IterationCap(msg) => write!(f, "Iteration cap exceeded: {msg}"),
      GridError::Dictionary(msg) => write!(f, "Dictionary error: {msg}"),
    }
  }
}

impl Error for GridError {}

pub type GridResult<T = ()> = Result<T, Box<dyn Error>>;

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use std::error::Error;

  use googletest::prelude::*;

  use super::GridError;

  #[gtest]
  fn test_iteration_cap_downcast() {
    let error: Box<dyn Error> = GridError::IterationCap("fit".to_owned()).into();
    expect_true!(GridError::is_iteration_cap(error.as_ref()));

    let error: Box<dyn Error> = GridError::InvalidPlacement("(6, 0)".to_owned()).into();
    expect_false!(GridError::is_iteration_cap(error.as_ref()));
  }

  #[gtest]
  fn test_display() {
    expect_that!(
      GridError::Dictionary("empty".to_owned()).to_string(),
      eq("Dictionary error: empty")
    );
  }
}
