// src/word/variant.rs
use std::fmt;

use serde::Serialize;

use super::fields::Fields;
use crate::error::Result;

/// A cross-reference to another word's page. `target_slug` is only a lookup key;
/// the referenced word may not have been crawled yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimilarWord {
    pub term: String,
    /// Higher is closer.
    pub similarity: i64,
    pub vulgar: Option<i64>,
    pub informal: Option<i64>,
    pub target_term: String,
    pub target_slug: String,
}

impl SimilarWord {
    pub(crate) fn from_fields(f: Fields<'_>) -> Result<Self> {
        Ok(Self {
            term: f.str("term")?,
            similarity: f.int("similarity")?,
            vulgar: f.flag("isVulgar")?,
            informal: f.flag("isInformal")?,
            target_term: f.str("targetTerm")?,
            target_slug: f.str("targetSlug")?,
        })
    }
}

/// One part-of-speech sense of a word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WordVariant {
    pub term: String,
    pub definition: String,
    pub pos: String,
    pub synonyms: Vec<SimilarWord>,
    pub antonyms: Vec<SimilarWord>,
    /// `None` when the source flag is missing or falsy, so never `Some(0)`.
    pub informal: Option<i64>,
    pub vulgar: i64,
    pub note: Option<String>,
    /// Reference id, only when the source carries `thesRid`.
    pub id: Option<i64>,
}

impl WordVariant {
    pub(crate) fn from_fields(term: &str, f: Fields<'_>) -> Result<Self> {
        Ok(Self {
            term: s!(term),
            definition: f.str("definition")?,
            pos: f.str("pos")?,
            synonyms: f.each("synonyms", SimilarWord::from_fields)?,
            antonyms: f.each("antonyms", SimilarWord::from_fields)?,
            informal: f.int_if_truthy("isInformal")?,
            vulgar: f.int("isVulgar")?,
            note: f.nullable_str("note")?,
            id: f.int_if_present("thesRid")?,
        })
    }

    /// Synonyms then antonyms.
    pub fn similar(&self) -> impl Iterator<Item = &SimilarWord> {
        self.synonyms.iter().chain(self.antonyms.iter())
    }
}

impl fmt::Display for WordVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WordVariant({}, {}, {}, [{}/{}])",
            self.term,
            self.pos,
            self.definition,
            self.synonyms.len(),
            self.antonyms.len()
        )
    }
}
