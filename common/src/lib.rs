#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod board;
pub mod game;
pub mod island;
pub mod score;
pub mod validate;
pub mod words;
