use std::{
  collections::{HashMap, HashSet},
  fs,
  path::Path,
};

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use util::error::{GridError, GridResult};

pub const MIN_WORD_LEN: usize = 2;
pub const MAX_WORD_LEN: usize = 6;

const BUNDLED_COMMON: &str = include_str!("../words/common.txt");
const BUNDLED_ACCEPTED: &str = include_str!("../words/accepted.txt");

#[allow(clippy::expect_used)]
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
  Regex::new(&format!("^[a-z]{{{MIN_WORD_LEN},{MAX_WORD_LEN}}}$"))
    .expect("word pattern is a valid regex")
});

/// Anything that can answer "is this a real word?".
pub trait WordSet {
  fn contains(&self, word: &str) -> bool;
}

impl WordSet for HashSet<String> {
  fn contains(&self, word: &str) -> bool {
    HashSet::contains(self, word)
  }
}

impl<W: WordSet + ?Sized> WordSet for &W {
  fn contains(&self, word: &str) -> bool {
    (**self).contains(word)
  }
}

/// An immutable set of canonical (lowercase, 2 to 6 letter) words.
#[derive(Clone, Debug, Default)]
pub struct WordList {
  words: HashSet<String>,
}

impl WordList {
  fn canonicalize_word(word: &str) -> Option<String> {
    let word = word.trim().to_ascii_lowercase();
    WORD_PATTERN.is_match(&word).then_some(word)
  }

  pub fn from_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
    Self {
      words: words
        .into_iter()
        .filter_map(|word| Self::canonicalize_word(word.as_ref()))
        .collect(),
    }
  }

  /// Parses a newline-separated list. Blank lines and `#` comments are
  /// skipped, as is anything that does not canonicalize to a playable word.
  pub fn parse(text: &str) -> Self {
    Self::from_words(
      text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#')),
    )
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.words.iter().map(String::as_str)
  }

  fn union(&self, other: &WordList) -> WordList {
    Self { words: self.words.union(&other.words).cloned().collect() }
  }
}

impl WordSet for WordList {
  fn contains(&self, word: &str) -> bool {
    self.words.contains(word)
  }
}

/// The strict word set used to place real words, a length index over it for
/// candidate lookup, and the lenient superset that filler letters and player
/// boards are checked against.
#[derive(Clone, Debug)]
pub struct Dictionary {
  strict: WordList,
  by_length: HashMap<usize, Vec<String>>,
  lenient: WordList,
}

impl Dictionary {
  pub fn new(strict: WordList, lenient: WordList) -> Self {
    let lenient = lenient.union(&strict);
    let by_length = strict
      .iter()
      .sorted()
      .map(str::to_owned)
      .into_group_map_by(|word| word.len());

    debug!(
      strict = strict.len(),
      lenient = lenient.len(),
      "Built dictionary"
    );
    Self { strict, by_length, lenient }
  }

  pub fn from_word_lists<S, T>(
    strict: impl IntoIterator<Item = S>,
    lenient: impl IntoIterator<Item = T>,
  ) -> Self
  where
    S: AsRef<str>,
    T: AsRef<str>,
  {
    Self::new(WordList::from_words(strict), WordList::from_words(lenient))
  }

  /// The word lists compiled into the crate.
  pub fn bundled() -> Self {
    Self::new(
      WordList::parse(BUNDLED_COMMON),
      WordList::parse(BUNDLED_ACCEPTED),
    )
  }

  pub fn load(strict_path: impl AsRef<Path>, lenient_path: impl AsRef<Path>) -> GridResult<Self> {
    let read = |path: &Path| -> GridResult<WordList> {
      let text = fs::read_to_string(path).map_err(|err| {
        GridError::Dictionary(format!("Failed to read {}: {err}", path.display()))
      })?;
      Ok(WordList::parse(&text))
    };

    Ok(Self::new(
      read(strict_path.as_ref())?,
      read(lenient_path.as_ref())?,
    ))
  }

  pub fn strict(&self) -> &WordList {
    &self.strict
  }

  pub fn lenient(&self) -> &WordList {
    &self.lenient
  }

  /// Strict words of exactly `len` letters, in sorted order.
  pub fn words_of_length(&self, len: usize) -> &[String] {
    self
      .by_length
      .get(&len)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  /// Generation seeds its first word from the 5 and 6 letter buckets, so a
  /// dictionary without them cannot produce a board.
  pub fn ensure_generation_ready(&self) -> GridResult {
    if self.strict.is_empty() {
      return Err(GridError::Dictionary("Strict word list is empty".to_owned()).into());
    }
    if let Some(len) = [5, 6]
      .into_iter()
      .find(|&len| self.words_of_length(len).is_empty())
    {
      return Err(GridError::Dictionary(format!("No {len}-letter words available")).into());
    }
    Ok(())
  }
}

/// Membership as a player sees it: the lenient set. Generation asks for
/// `strict()` explicitly.
impl WordSet for Dictionary {
  fn contains(&self, word: &str) -> bool {
    self.lenient.contains(word)
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use super::{Dictionary, WordList, WordSet};

  #[gtest]
  fn test_canonicalize() {
    let list = WordList::parse("Cat\n# comment\n\n  dog  \nx\ncan't\ntoolong\nab\n");
    expect_that!(list.len(), eq(3));
    expect_true!(list.contains("cat"));
    expect_true!(list.contains("dog"));
    expect_true!(list.contains("ab"));
    expect_false!(list.contains("x"));
    expect_false!(list.contains("toolong"));
  }

  #[gtest]
  fn test_lenient_is_superset() {
    let dict = Dictionary::from_word_lists(["cat", "table"], ["at"]);
    expect_true!(dict.lenient().contains("cat"));
    expect_true!(dict.lenient().contains("at"));
    expect_false!(dict.strict().contains("at"));
    expect_true!(dict.contains("at"));
    expect_true!(dict.contains("cat"));
    expect_false!(dict.contains("ta"));
  }

  #[gtest]
  fn test_words_of_length_sorted() {
    let dict = Dictionary::from_word_lists(["dog", "cat", "bird", "ant"], Vec::<&str>::new());
    expect_that!(
      dict.words_of_length(3).to_vec(),
      container_eq(["ant".to_owned(), "cat".to_owned(), "dog".to_owned()])
    );
    expect_that!(dict.words_of_length(4).to_vec(), container_eq(["bird".to_owned()]));
    expect_true!(dict.words_of_length(6).is_empty());
  }

  #[gtest]
  fn test_generation_ready() {
    let dict = Dictionary::from_word_lists(["cat"], Vec::<&str>::new());
    expect_that!(dict.ensure_generation_ready(), err(anything()));

    let dict = Dictionary::from_word_lists(["cat", "table", "tables"], Vec::<&str>::new());
    expect_that!(dict.ensure_generation_ready(), ok(anything()));
  }

  #[gtest]
  fn test_bundled() {
    let dict = Dictionary::bundled();
    expect_that!(dict.ensure_generation_ready(), ok(anything()));
    expect_true!(dict.contains("house"));
    expect_true!(dict.lenient().contains("of"));
    expect_true!(dict.words_of_length(2).is_empty());
  }
}
