// src/word/mod.rs
//! Typed word records built from a decoded page state.
//!
//! ```text
//! state ─ locate_word_api ─▶ tunaApiData ─ Word::from_raw ─▶ Word
//!                                                            ├─ Inflection*
//!                                                            ├─ WordVariant* ─ SimilarWord* (synonyms, antonyms)
//!                                                            ├─ Pronunciation?
//!                                                            └─ ExampleSentence*
//! ```
//!
//! Required keys that are missing fail with `ScrapeError::MissingField` naming the
//! dotted path (e.g. `posTabs[0].definition`); optional ones become `None` or an
//! empty list.

mod entry;
mod example;
mod fields;
mod pronunciation;
mod variant;

pub use entry::{Inflection, Word};
pub use example::ExampleSentence;
pub use pronunciation::Pronunciation;
pub use variant::{SimilarWord, WordVariant};

use serde_json::Value;

use crate::error::{Result, ScrapeError};
use fields::Fields;

const WORD_API_KEY: &str = "tunaApiData";
const SEARCH_DATA_KEY: &str = "searchData";

/// Find the word API mapping. Accepts either the whole page state
/// (`searchData.tunaApiData`) or the `searchData` mapping itself.
pub fn locate_word_api(state: &Value) -> Result<&Value> {
    let direct = state.get(WORD_API_KEY);
    let nested = state.get(SEARCH_DATA_KEY).and_then(|sd| sd.get(WORD_API_KEY));
    match direct.or(nested) {
        Some(api @ Value::Object(_)) => Ok(api),
        Some(_) => Err(ScrapeError::invalid(WORD_API_KEY, "an object")),
        None => Err(ScrapeError::missing(join!(SEARCH_DATA_KEY, ".", WORD_API_KEY))),
    }
}

/// Synonyms from the related-words block (`relatedWordsApiData.data[0].synonyms`),
/// least similar first. An absent block gives an empty list.
pub fn related_synonyms(state: &Value) -> Result<Vec<SimilarWord>> {
    let search = state.get(SEARCH_DATA_KEY).unwrap_or(state);
    let Some(first) = search
        .get("relatedWordsApiData")
        .and_then(|r| r.get("data"))
        .and_then(|d| d.get(0))
        .filter(|first| first.get("synonyms").is_some_and(Value::is_array))
    else {
        return Ok(Vec::new());
    };

    let f = Fields::of(first, "relatedWordsApiData.data[0]")?;
    let mut words = f.each("synonyms", SimilarWord::from_fields)?;
    words.sort_by_key(|w| w.similarity);
    Ok(words)
}
