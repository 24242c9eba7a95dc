#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod word_dict;

pub use word_dict::{Dictionary, WordList, WordSet, MAX_WORD_LEN, MIN_WORD_LEN};
