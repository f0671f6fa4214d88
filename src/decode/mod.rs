// src/decode/mod.rs
//! Turn the text of the site's state script into a `serde_json::Value`.
//!
//! ```text
//! <script> text ─ isolate_payload ─▶ `{ ... }` ─ parser ─▶ Value (undefined → null)
//! ```
//!
//! The result only ever holds standard JSON, so `serde_json` can write it back
//! out and `decode` will read that text to an equal value.

mod parser;

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{Result, ScrapeError};
use parser::Parser;

static STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"window\.INITIAL_STATE\s*=\s*(\{[\s\S]+\});").expect("state pattern compiles")
});

/// Cut the `{ ... }` literal out of `window.INITIAL_STATE = { ... };`.
/// The match is greedy up to the last `};` in the script.
pub fn isolate_payload(script: &str) -> Result<&str> {
    STATE_RE
        .captures(script)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ScrapeError::Extraction(s!("no `window.INITIAL_STATE = {...};` assignment")))
}

/// Decode a complete quasi-JSON text.
pub fn decode(text: &str) -> Result<Value> {
    Parser::new(text).parse_document()
}

/// Isolate and decode the state carried by one script's text.
///
/// Pages sometimes assign more globals after the state in the same script; the
/// greedy match then swallows them. Anything after the first complete value is
/// accepted only if it starts a new statement (`;`).
pub fn decode_state(script: &str) -> Result<Value> {
    let payload = isolate_payload(script)?;
    let mut parser = Parser::new(payload);
    let value = parser.parse_leading()?;
    let rest = &payload[parser.pos()..];
    if !rest.is_empty() {
        if !rest.starts_with(';') {
            return Err(parser.fail("trailing characters after state object"));
        }
        logd!("Decode: ignored {} bytes of trailing statements", rest.len());
    }
    Ok(value)
}

/// Pretty-printed, strict JSON for the decoded state.
pub fn to_pretty_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write the decoded state to `path` as valid JSON, for eyeballing during development.
pub fn write_debug_dump(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_pretty_json(value)?)?;
    Ok(())
}
