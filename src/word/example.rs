// src/word/example.rs
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::fields::Fields;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExampleSentence {
    pub id: i64,
    pub sentence: String,
    /// Attribution fields exactly as the site gives them (title, author, url, ...).
    pub source: Map<String, Value>,
    pub profanity: i64,
}

impl ExampleSentence {
    pub(crate) fn from_fields(f: Fields<'_>) -> Result<Self> {
        Ok(Self {
            id: f.int("id")?,
            sentence: f.str("sentence")?,
            source: f.object("source")?,
            profanity: f.int("profanity")?,
        })
    }
}

impl fmt::Display for ExampleSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: String = self.sentence.chars().take(15).collect();
        let more = if self.sentence.chars().count() > 15 { "..." } else { "" };
        write!(f, "ExampleSentence({}, \"{}{}\")", self.id, head, more)
    }
}
