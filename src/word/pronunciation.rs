// src/word/pronunciation.rs
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::fields::Fields;
use crate::error::{Result, ScrapeError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pronunciation {
    /// Audio source name → URL.
    pub audio: Option<BTreeMap<String, String>>,
    pub ipa: Option<String>,
    pub spelling: Option<String>,
}

impl Pronunciation {
    pub(crate) fn from_fields(f: Fields<'_>) -> Result<Self> {
        let audio = match f.get("audio") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => {
                let mut out = BTreeMap::new();
                for (name, url) in map {
                    match url {
                        Value::String(u) => {
                            out.insert(name.clone(), u.clone());
                        }
                        Value::Null => {}
                        _ => return Err(ScrapeError::invalid(f.path(&join!("audio.", name)), "a URL string")),
                    }
                }
                Some(out)
            }
            Some(_) => return Err(ScrapeError::invalid(f.path("audio"), "an object")),
        };

        Ok(Self {
            audio,
            ipa: f.opt_str("ipa")?,
            spelling: f.opt_str("spell")?,
        })
    }
}

impl fmt::Display for Pronunciation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources = self.audio.as_ref().map_or(0, |a| a.len());
        write!(
            f,
            "Pronunciation({} audio sources, {}, {})",
            sources,
            self.ipa.as_deref().unwrap_or("-"),
            self.spelling.as_deref().unwrap_or("-")
        )
    }
}
