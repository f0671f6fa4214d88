// src/word/fields.rs
// Checked access to one JSON object of the word data. Every lookup carries the
// dotted path of the field so a schema change names itself in the error.

use serde_json::{Map, Value};

use crate::error::{Result, ScrapeError};

pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    pub(crate) fn of(value: &'a Value, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            _ => Err(ScrapeError::invalid(display_path(&path), "an object")),
        }
    }

    pub(crate) fn path(&self, key: &str) -> String {
        if self.path.is_empty() { s!(key) } else { join!(&self.path, ".", key) }
    }

    /// The raw value if the key is present, `null` included.
    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    pub(crate) fn required(&self, key: &str) -> Result<&'a Value> {
        self.get(key).ok_or_else(|| ScrapeError::missing(self.path(key)))
    }

    pub(crate) fn str(&self, key: &str) -> Result<String> {
        match self.required(key)? {
            Value::String(s) => Ok(s.clone()),
            _ => Err(ScrapeError::invalid(self.path(key), "a string")),
        }
    }

    /// Absent or `null` → `None`.
    pub(crate) fn opt_str(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(ScrapeError::invalid(self.path(key), "a string")),
        }
    }

    /// Key must be present; `null` → `None`.
    pub(crate) fn nullable_str(&self, key: &str) -> Result<Option<String>> {
        self.required(key)?;
        self.opt_str(key)
    }

    pub(crate) fn int(&self, key: &str) -> Result<i64> {
        cast_int(self.required(key)?).ok_or_else(|| ScrapeError::invalid(self.path(key), "an integer"))
    }

    /// Key must be present; `null` → `None`, anything else is cast.
    pub(crate) fn flag(&self, key: &str) -> Result<Option<i64>> {
        match self.required(key)? {
            Value::Null => Ok(None),
            v => cast_int(v).map(Some).ok_or_else(|| ScrapeError::invalid(self.path(key), "an integer")),
        }
    }

    /// Cast only when the value is truthy; absent and falsy values → `None`.
    pub(crate) fn int_if_truthy(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            Some(v) if truthy(v) => {
                cast_int(v).map(Some).ok_or_else(|| ScrapeError::invalid(self.path(key), "an integer"))
            }
            _ => Ok(None),
        }
    }

    /// Cast when the key is present at all; absence (or `null`) → `None`.
    pub(crate) fn int_if_present(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => cast_int(v).map(Some).ok_or_else(|| ScrapeError::invalid(self.path(key), "an integer")),
        }
    }

    pub(crate) fn object(&self, key: &str) -> Result<Map<String, Value>> {
        match self.required(key)? {
            Value::Object(m) => Ok(m.clone()),
            _ => Err(ScrapeError::invalid(self.path(key), "an object")),
        }
    }

    pub(crate) fn child(&self, key: &str) -> Result<Fields<'a>> {
        Fields::of(self.required(key)?, self.path(key))
    }

    /// Map every object in the required array `key` through `f`.
    pub(crate) fn each<T>(&self, key: &str, f: impl Fn(Fields<'a>) -> Result<T>) -> Result<Vec<T>> {
        let Value::Array(items) = self.required(key)? else {
            return Err(ScrapeError::invalid(self.path(key), "an array"));
        };
        let base = self.path(key);
        items
            .iter()
            .enumerate()
            .map(|(i, item)| f(Fields::of(item, format!("{base}[{i}]"))?))
            .collect()
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() { s!("<root>") } else { s!(path) }
}

/// Source truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are false.
pub(crate) fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Integer cast accepting integers, booleans, decimal strings and finite floats
/// (truncated toward zero).
pub(crate) fn cast_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64().filter(|f| f.is_finite() && f.abs() < 9.0e18).map(|f| f.trunc() as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
