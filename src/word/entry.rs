// src/word/entry.rs
use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::example::ExampleSentence;
use super::fields::Fields;
use super::pronunciation::Pronunciation;
use super::variant::WordVariant;
use super::locate_word_api;
use crate::config::browse_url;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Inflection {
    pub display: String,
    pub slug: String,
}

/// A word page, identified by its entry/slug.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Word {
    pub entry: String,
    pub inflections: Vec<Inflection>,
    pub variants: Vec<WordVariant>,
    pub pronunciation: Option<Pronunciation>,
    pub examples: Vec<ExampleSentence>,
}

impl Word {
    /// Build a Word from the word API mapping (`tunaApiData`).
    ///
    /// Everything is copied out of `api`; a missing required field abandons the
    /// whole word.
    pub fn from_raw(api: &Value) -> Result<Self> {
        let f = Fields::of(api, "")?;
        let entry = f.str("entry")?;

        let inflections = f.each("inflections", |i| {
            Ok(Inflection { display: i.str("displayForm")?, slug: i.str("slug")? })
        })?;
        let variants = f.each("posTabs", |tab| WordVariant::from_fields(&entry, tab))?;
        let pronunciation = match f.get("pronunciation") {
            None | Some(Value::Null) => None,
            Some(_) => Some(Pronunciation::from_fields(f.child("pronunciation")?)?),
        };
        let examples = f.each("exampleSentences", ExampleSentence::from_fields)?;

        Ok(Self { entry, inflections, variants, pronunciation, examples })
    }

    /// Locate the word API data in a decoded page state, then build the Word.
    pub fn from_state(state: &Value) -> Result<Self> {
        Self::from_raw(locate_word_api(state)?)
    }

    /// Browse URLs of every synonym and antonym target, de-duplicated.
    pub fn get_urls(&self) -> BTreeSet<String> {
        self.variants
            .iter()
            .flat_map(|v| v.similar())
            .map(|w| browse_url(&w.target_slug))
            .collect()
    }

    pub fn synonym_count(&self) -> usize {
        self.variants.iter().map(|v| v.synonyms.len()).sum()
    }

    pub fn antonym_count(&self) -> usize {
        self.variants.iter().map(|v| v.antonyms.len()).sum()
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (v, s, a) = (self.variants.len(), self.synonym_count(), self.antonym_count());
        write!(
            f,
            "Word(\"{}\", {} variant{}, {} syn{}, {} ant{})",
            self.entry,
            v,
            plural(v),
            s,
            plural(s),
            a,
            plural(a)
        )
    }
}
