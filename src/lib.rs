// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod crawl;
pub mod decode;
pub mod error;
pub mod frontier;
pub mod progress;
pub mod spider;
pub mod store;
pub mod word;

pub use error::{Result, ScrapeError};
pub use frontier::Frontier;
pub use word::{ExampleSentence, Inflection, Pronunciation, SimilarWord, Word, WordVariant};
