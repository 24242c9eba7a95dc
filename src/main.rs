#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod args;
mod daily;
mod play;

use args::{Args, RunMode};
use board_gen::seed::daily_seed;
use clap::Parser;
use daily::{read_layout, today, DailyPuzzle};
use itertools::Itertools;
use play::{play_layout, score_report};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use util::{
  error::{GridError, GridResult},
  time::time_fn,
};
use word_dict::Dictionary;

fn init_logging(args: &Args) {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();
}

fn load_dictionary(args: &Args) -> GridResult<Dictionary> {
  match (&args.common_words, &args.accepted_words) {
    (Some(common), Some(accepted)) => Dictionary::load(common, accepted),
    _ => Ok(Dictionary::bundled()),
  }
}

fn main() -> GridResult {
  let args = Args::parse();
  init_logging(&args);

  let dict = load_dictionary(&args)?;
  let date = args.date.unwrap_or_else(|| today(args.utc));
  let seed = daily_seed(date);

  let (time, puzzle) = time_fn(|| DailyPuzzle::load_or_generate(&args.cache, &dict, &seed));
  let puzzle = puzzle?;
  info!(%date, seed = puzzle.seed(), "Puzzle ready in {}s", time.as_secs_f32());

  match args.mode {
    RunMode::Puzzle => {
      println!("Word Island for {date}");
      println!(
        "{}",
        puzzle
          .rack()
          .iter()
          .map(|letter| letter.ch.to_ascii_uppercase())
          .join(" ")
      );
    }
    RunMode::Solution => print!("{}", puzzle.board()),
    RunMode::Score => {
      let path = args
        .board
        .as_ref()
        .ok_or_else(|| GridError::Parse("--board is required in score mode".to_owned()))?;
      let mut game = play_layout(&read_layout(path)?, puzzle.rack())?;
      println!("{}", score_report(&mut game, &dict)?);
    }
  }

  Ok(())
}
