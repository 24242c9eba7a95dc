use std::collections::HashSet;

use common::{board::LETTER_BUDGET, validate::all_words_valid, words::Direction};
use itertools::Itertools;
use tracing::trace;
use util::{
  error::{GridError, GridResult},
  grid::{Grid, Gridlike, GRID_SIZE},
  pos::Pos,
};
use word_dict::{Dictionary, MAX_WORD_LEN};

use crate::seed::SeededRng;

/// Letter subsets popped per `fit_word` call. A line holds at most 6 letters,
/// so there are at most 21 contiguous subsets to try.
pub const MAX_SUBSETS: usize = 32;
/// Tentative placements checked against the whole board per `fit_word` call.
pub const MAX_PLACEMENT_TRIALS: usize = 1000;

/// Writes `word` starting at `start`, overwriting whatever is there. Fails
/// without touching `grid` if any letter would land out of bounds.
pub fn place_word(
  grid: &mut Grid<Option<char>>,
  start: Pos,
  direction: Direction,
  word: &str,
) -> GridResult {
  let step = direction.step();
  let len = word.chars().count() as i32;
  let end = start + (len - 1).max(0) * step;
  if !grid.in_bounds(start) || !grid.in_bounds(end) {
    return Err(
      GridError::InvalidPlacement(format!("\"{word}\" from {start} overflows the board")).into(),
    );
  }

  for (idx, ch) in word.chars().enumerate() {
    grid.set(start + idx as i32 * step, Some(ch))?;
  }
  Ok(())
}

/// One full row or column of the grid.
struct Line {
  origin: Pos,
  direction: Direction,
  cells: Vec<Option<char>>,
}

impl Line {
  fn through(grid: &Grid<Option<char>>, pos: Pos, direction: Direction) -> Self {
    let step = direction.step();
    let origin = pos + -Self::offset(pos, direction) * step;
    let cells = (0..GRID_SIZE as i32)
      .map(|idx| grid.get(origin + idx * step).copied().flatten())
      .collect();
    Self { origin, direction, cells }
  }

  fn offset(pos: Pos, direction: Direction) -> i32 {
    match direction {
      Direction::Across => pos.col(),
      Direction::Down => pos.row(),
    }
  }

  fn letter_offsets(&self) -> Vec<i32> {
    self
      .cells
      .iter()
      .positions(Option::is_some)
      .map(|idx| idx as i32)
      .collect()
  }

  fn pos_at(&self, offset: i32) -> Pos {
    self.origin + offset * self.direction.step()
  }

  /// Whether `word` laid from `start` agrees with every letter already on the
  /// line and adds at least one new one.
  fn accepts(&self, start: i32, word: &str) -> bool {
    let mut adds = false;
    for (idx, ch) in word.chars().enumerate() {
      match self.cells.get((start + idx as i32) as usize) {
        Some(Some(existing)) if *existing != ch => return false,
        Some(Some(_)) => {}
        Some(None) => adds = true,
        None => return false,
      }
    }
    adds
  }
}

/// A contiguous run of the line's letters, as indices into its letter
/// offsets, that a new word must reuse.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
struct Subset {
  lo: usize,
  hi: usize,
}

/// Tries to lay a new strict dictionary word along `direction` through the
/// letter at `pos`, reusing as many of the line's existing letters as it can.
///
/// Starts from a subset holding every letter on the line and relaxes it one
/// end at a time, depth first, never dropping the letter at `pos`. Letters left
/// out of a subset must stay separated from the new word by an empty cell.
/// Returns the first candidate grid on which every word is in the strict set,
/// or `None` when no subset admits one.
pub fn fit_word(
  grid: &Grid<Option<char>>,
  pos: Pos,
  direction: Direction,
  prefer_long: bool,
  dict: &Dictionary,
  rng: &mut SeededRng,
) -> GridResult<Option<Grid<Option<char>>>> {
  let budget = LETTER_BUDGET.saturating_sub(grid.count(Option::is_some));
  if budget < 3 {
    return Ok(None);
  }

  let line = Line::through(grid, pos, direction);
  let letters = line.letter_offsets();
  let Some(anchor) = letters
    .iter()
    .position(|&offset| offset == Line::offset(pos, direction))
  else {
    return Ok(None);
  };

  let full = Subset { lo: 0, hi: letters.len() - 1 };
  let mut stack = vec![full];
  let mut seen = HashSet::from([full]);
  let mut popped = 0;
  let mut trials = 0;

  while let Some(subset) = stack.pop() {
    popped += 1;
    if popped > MAX_SUBSETS {
      return Err(GridError::IterationCap(format!("Letter subsets through {pos}")).into());
    }

    let first = letters[subset.lo];
    let last = letters[subset.hi];
    let lo_bound = if subset.lo > 0 { letters[subset.lo - 1] + 2 } else { 0 };
    let hi_bound = letters
      .get(subset.hi + 1)
      .map_or(GRID_SIZE as i32 - 1, |next| next - 2);

    let min_len = if subset.lo == subset.hi { 3 } else { (last - first + 1) as usize };
    let max_len = budget.min(MAX_WORD_LEN);
    let mut lengths = (min_len..=max_len).collect_vec();
    if prefer_long {
      lengths.reverse();
    } else {
      rng.shuffle(&mut lengths);
    }

    for len in lengths {
      let ilen = len as i32;
      let mut candidates = Vec::new();
      for start in lo_bound.max(last - ilen + 1)..=first.min(hi_bound - ilen + 1) {
        candidates.extend(
          dict
            .words_of_length(len)
            .iter()
            .filter(|word| line.accepts(start, word))
            .map(|word| (start, word)),
        );
      }
      rng.shuffle(&mut candidates);

      for (start, word) in candidates {
        trials += 1;
        if trials > MAX_PLACEMENT_TRIALS {
          return Err(GridError::IterationCap(format!("Placements through {pos}")).into());
        }

        let mut next = grid.clone();
        place_word(&mut next, line.pos_at(start), direction, word)?;
        if all_words_valid(&next, dict.strict()) {
          trace!(word, start = %line.pos_at(start), ?direction, "Placed word");
          return Ok(Some(next));
        }
      }
    }

    let mut relax = |next: Subset| {
      if seen.insert(next) {
        stack.push(next);
      }
    };
    if subset.lo < anchor {
      relax(Subset { lo: subset.lo + 1, ..subset });
    }
    if subset.hi > anchor {
      relax(Subset { hi: subset.hi - 1, ..subset });
    }
  }

  Ok(None)
}
