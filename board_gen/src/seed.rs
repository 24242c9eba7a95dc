use chrono::{Datelike, NaiveDate};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The day's seed: month, day and year concatenated without separators or
/// zero padding, so June 1st 2025 is `"612025"`.
pub fn daily_seed(date: NaiveDate) -> String {
  format!("{}{}{}", date.month(), date.day(), date.year())
}

/// 64-bit FNV-1a, stable across platforms and releases. `DefaultHasher` is
/// not: its output may change between Rust versions, which would change the
/// board for every past and future day.
fn hash_seed(seed: &str) -> u64 {
  const OFFSET: u64 = 0xcbf29ce484222325;
  const PRIME: u64 = 0x100000001b3;
  seed
    .bytes()
    .fold(OFFSET, |hash, byte| (hash ^ byte as u64).wrapping_mul(PRIME))
}

/// Deterministic generator owned by a single generation run. Every random
/// choice made while building a board goes through one of these, passed by
/// exclusive reference, so the same seed always replays the same draws.
#[derive(Clone, Debug)]
pub struct SeededRng {
  rng: ChaCha8Rng,
}

impl SeededRng {
  pub fn from_seed_str(seed: &str) -> Self {
    Self { rng: ChaCha8Rng::seed_from_u64(hash_seed(seed)) }
  }

  /// Uniform draw from the inclusive range `[min, max]`. Requires `min <= max`.
  pub fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
    debug_assert!(min <= max);
    self.rng.random_range(min..=max.max(min))
  }

  /// Uniform index into a collection of `n` items, `None` when it is empty.
  pub fn uniform_index(&mut self, n: usize) -> Option<usize> {
    (n > 0).then(|| self.rng.random_range(0..n))
  }

  pub fn shuffle<T>(&mut self, items: &mut [T]) {
    items.shuffle(&mut self.rng);
  }
}
