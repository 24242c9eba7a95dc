use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
  /// Print the day's shuffled rack.
  Puzzle,
  /// Print the day's solution board.
  Solution,
  /// Validate and score a player board.
  Score,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
  #[arg(long, env = "WORD_ISLAND_MODE", default_value = "puzzle")]
  pub mode: RunMode,

  /// Day to generate, defaulting to today.
  #[arg(long, env = "WORD_ISLAND_DATE")]
  pub date: Option<NaiveDate>,

  /// Take today's date from UTC rather than the local clock.
  #[arg(long, env = "WORD_ISLAND_UTC")]
  pub utc: bool,

  #[arg(long, env = "WORD_ISLAND_CACHE", default_value = "./daily.bin")]
  pub cache: PathBuf,

  /// Strict word list used to place words, one per line.
  #[arg(long, env = "WORD_ISLAND_COMMON_WORDS", requires = "accepted_words")]
  pub common_words: Option<PathBuf>,

  /// Lenient word list for filler letters and player boards.
  #[arg(long, env = "WORD_ISLAND_ACCEPTED_WORDS", requires = "common_words")]
  pub accepted_words: Option<PathBuf>,

  /// Board layout to score, 6 lines of 6 cells with `.` for empty. `-` reads
  /// stdin.
  #[arg(long, env = "WORD_ISLAND_BOARD")]
  pub board: Option<PathBuf>,

  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,
}

impl Args {
  pub fn log_level(&self) -> &'static str {
    match self.verbose {
      0 => "warn",
      1 => "info",
      _ => "debug",
    }
  }
}
