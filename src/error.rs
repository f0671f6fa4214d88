// src/error.rs
//! Error type shared by the decoder, the record extractor and the crawl driver.
//!
//! Every variant is page-scoped: the crawl loop logs it, marks the page as failed
//! and moves on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No script carrying `window.INITIAL_STATE = {...};` was found.
    #[error("state payload not found: {0}")]
    Extraction(String),

    /// The isolated payload is not valid quasi-JSON.
    #[error("decode error at {line}:{column}: {message}")]
    Decode {
        line: usize,
        column: usize,
        message: String,
    },

    /// A required key is absent from the word data.
    #[error("missing field `{field}`")]
    MissingField { field: String },

    /// A key is present but its value cannot be used.
    #[error("invalid field `{field}`: expected {expected}")]
    InvalidField { field: String, expected: &'static str },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Http(err.to_string())
    }
}

impl ScrapeError {
    pub fn missing(field: impl Into<String>) -> Self {
        ScrapeError::MissingField { field: field.into() }
    }

    pub fn invalid(field: impl Into<String>, expected: &'static str) -> Self {
        ScrapeError::InvalidField { field: field.into(), expected }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
