#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod easy;
pub mod fit;
pub mod generator;
pub mod seed;
