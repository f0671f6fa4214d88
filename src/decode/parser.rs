// src/decode/parser.rs
//! Hand-rolled reader for the quasi-JSON object literal the site renders into
//! its state script.
//!
//! Accepted on top of strict JSON:
//! - unquoted identifier keys (`[A-Za-z_$][A-Za-z0-9_$]*`) and single-quoted strings
//! - trailing commas in objects and arrays
//! - `//` line and `/* */` block comments
//! - a leading `+` on numbers and `0x` hexadecimal integers
//! - `undefined`, read as `null`
//! - JavaScript string escapes: `\xNN`, `\u{...}`, `\v`, `\0`, `\'`, line
//!   continuations, and any other escaped character standing for itself
//!
//! `\ud83d\ude00` style surrogate pairs are joined into one scalar; a lone
//! surrogate becomes U+FFFD. `NaN`, `Infinity` and other bare words are rejected.

use serde_json::{Map, Number, Value};

use crate::error::{Result, ScrapeError};

const MAX_DEPTH: usize = 128;

pub(crate) struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, bytes: src.as_bytes(), pos: 0, depth: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Parse the whole input as one value; only whitespace and comments may follow.
    pub(crate) fn parse_document(&mut self) -> Result<Value> {
        let value = self.parse_leading()?;
        if self.pos < self.bytes.len() {
            return Err(self.fail("trailing characters after value"));
        }
        Ok(value)
    }

    /// Parse one value and stop after it (and any whitespace/comments that follow).
    pub(crate) fn parse_leading(&mut self) -> Result<Value> {
        self.skip_ws()?;
        let value = self.parse_value()?;
        self.skip_ws()?;
        Ok(value)
    }

    pub(crate) fn fail(&self, message: &str) -> ScrapeError {
        let before = &self.src[..floor_char_boundary(self.src, self.pos)];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        ScrapeError::Decode { line, column, message: s!(message) }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c) => self.pos += 1,
                Some(b'/') => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        self.pos = match self.src[self.pos..].find('\n') {
                            Some(nl) => self.pos + nl + 1,
                            None => self.bytes.len(),
                        };
                    }
                    Some(b'*') => {
                        let close = self.src[self.pos + 2..]
                            .find("*/")
                            .ok_or_else(|| self.fail("unterminated block comment"))?;
                        self.pos += 2 + close + 2;
                    }
                    _ => return Ok(()),
                },
                Some(_) => {
                    let rest = &self.src[self.pos..];
                    match rest.chars().next() {
                        Some(c @ ('\u{feff}' | '\u{a0}' | '\u{2028}' | '\u{2029}')) => self.pos += c.len_utf8(),
                        _ => return Ok(()),
                    }
                }
                None => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek() {
            Some(b'{') => self.nested(Self::parse_object),
            Some(b'[') => self.nested(Self::parse_array),
            Some(q @ (b'"' | b'\'')) => self.parse_string(q).map(Value::String),
            Some(b'-' | b'+' | b'.' | b'0'..=b'9') => self.parse_number(),
            Some(c) if is_ident_start(c) => {
                let start = self.pos;
                let word = self.parse_ident();
                match word {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" | "undefined" => Ok(Value::Null),
                    other => {
                        let msg = format!("unexpected identifier `{other}`");
                        self.pos = start;
                        Err(self.fail(&msg))
                    }
                }
            }
            Some(_) => Err(self.fail("expected a value")),
            None => Err(self.fail("unexpected end of input")),
        }
    }

    fn nested(&mut self, f: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= MAX_DEPTH {
            return Err(self.fail("nesting too deep"));
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.pos += 1; // '{'
        let mut map = Map::new();
        loop {
            self.skip_ws()?;
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }

            let key = match self.peek() {
                Some(q @ (b'"' | b'\'')) => self.parse_string(q)?,
                Some(c) if is_ident_start(c) => s!(self.parse_ident()),
                Some(b'0'..=b'9') => s!(self.take_while(|c| c.is_ascii_digit())),
                _ => return Err(self.fail("expected an object key")),
            };

            self.skip_ws()?;
            if self.peek() != Some(b':') {
                return Err(self.fail("expected `:` after object key"));
            }
            self.pos += 1;
            self.skip_ws()?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_ws()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {}
                None => return Err(self.fail("unterminated object")),
                _ => return Err(self.fail("expected `,` or `}` in object")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.pos += 1; // '['
        let mut items = Vec::new();
        loop {
            self.skip_ws()?;
            if self.peek() == Some(b']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value()?);

            self.skip_ws()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                None => return Err(self.fail("unterminated array")),
                _ => return Err(self.fail("expected `,` or `]` in array")),
            }
        }
    }

    fn parse_ident(&mut self) -> &'a str {
        self.take_while(is_ident_continue)
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &src[start..self.pos]
    }

    fn parse_string(&mut self, quote: u8) -> Result<String> {
        let open = self.pos;
        self.pos += 1;
        let mut out = s!();
        let mut run = self.pos;

        loop {
            match self.peek() {
                None => {
                    self.pos = open;
                    return Err(self.fail("unterminated string"));
                }
                Some(b'\n' | b'\r') => return Err(self.fail("line break in string")),
                Some(c) if c == quote => {
                    out.push_str(&self.src[run..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.src[run..self.pos]);
                    self.pos += 1;
                    self.parse_escape(&mut out)?;
                    run = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Called with `pos` just past the backslash.
    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let Some(c) = self.peek() else {
            return Err(self.fail("unterminated escape"));
        };
        self.pos += 1;
        match c {
            b'"' => out.push('"'),
            b'\'' => out.push('\''),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{8}'),
            b'f' => out.push('\u{c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'v' => out.push('\u{b}'),
            b'0' => out.push('\0'),
            b'x' => {
                let v = self.hex_digits(2)?;
                out.push(char::from_u32(v).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            b'u' => out.push(self.parse_unicode_escape()?),
            b'\n' => {}
            b'\r' => {
                if self.peek() == Some(b'\n') {
                    self.pos += 1;
                }
            }
            _ => {
                // Any other escaped character stands for itself; step back to take a whole char.
                self.pos -= 1;
                let ch = self.src[self.pos..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                self.pos += ch.len_utf8();
                out.push(ch);
            }
        }
        Ok(())
    }

    /// Called with `pos` just past `\u`.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        if self.peek() == Some(b'{') {
            self.pos += 1;
            let digits = self.take_while(|c| c.is_ascii_hexdigit());
            if digits.is_empty() || digits.len() > 6 || self.peek() != Some(b'}') {
                return Err(self.fail("malformed \\u{...} escape"));
            }
            self.pos += 1;
            let v = u32::from_str_radix(digits, 16).map_err(|_| self.fail("malformed \\u{...} escape"))?;
            return Ok(char::from_u32(v).unwrap_or(char::REPLACEMENT_CHARACTER));
        }

        let unit = self.hex_digits(4)?;
        match unit {
            0xD800..=0xDBFF => {
                // High surrogate: join with a following low surrogate if there is one.
                if self.bytes.get(self.pos..self.pos + 2) == Some(&b"\\u"[..]) {
                    let save = self.pos;
                    self.pos += 2;
                    if let Ok(low @ 0xDC00..=0xDFFF) = self.hex_digits(4) {
                        let cp = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                        return Ok(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER));
                    }
                    self.pos = save;
                }
                Ok(char::REPLACEMENT_CHARACTER)
            }
            0xDC00..=0xDFFF => Ok(char::REPLACEMENT_CHARACTER),
            _ => Ok(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER)),
        }
    }

    fn hex_digits(&mut self, n: usize) -> Result<u32> {
        let src = self.src;
        let digits = src
            .get(self.pos..self.pos + n)
            .filter(|d| d.bytes().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.fail("malformed hex escape"))?;
        self.pos += n;
        u32::from_str_radix(digits, 16).map_err(|_| self.fail("malformed hex escape"))
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        if self.bytes.get(self.pos..self.pos + 2).is_some_and(|p| p.eq_ignore_ascii_case(b"0x")) {
            self.pos += 2;
            let digits = self.take_while(|c| c.is_ascii_hexdigit());
            let v = u64::from_str_radix(digits, 16).map_err(|_| self.fail("malformed hex number"))?;
            return if negative {
                i64::try_from(v)
                    .map(|v| Value::from(-v))
                    .map_err(|_| self.fail("hex number out of range"))
            } else {
                Ok(Value::from(v))
            };
        }

        let digits_start = self.pos;
        let int_part = self.take_while(|c| c.is_ascii_digit());
        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            let frac = self.take_while(|c| c.is_ascii_digit());
            if int_part.is_empty() && frac.is_empty() {
                self.pos = start;
                return Err(self.fail("malformed number"));
            }
        } else if int_part.is_empty() {
            self.pos = start;
            return Err(self.fail("expected digits"));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.take_while(|c| c.is_ascii_digit()).is_empty() {
                return Err(self.fail("malformed exponent"));
            }
        }

        let body = &self.src[digits_start..self.pos];
        let text = if negative { join!("-", body) } else { s!(body) };

        if !is_float {
            if negative {
                if let Ok(v) = text.parse::<i64>() {
                    return Ok(Value::from(v));
                }
            } else if let Ok(v) = text.parse::<u64>() {
                return Ok(Value::from(v));
            }
        }
        let v: f64 = text.parse().map_err(|_| self.fail("malformed number"))?;
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| self.fail("number out of range"))
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(src: &str) -> Result<Value> {
        Parser::new(src).parse_document()
    }

    #[test]
    fn relaxed_keys_quotes_and_commas() {
        let v = parse("{a: 1, 'b': 'two', \"c\": [1, 2,], $d_1: {},}").unwrap();
        assert_eq!(v, json!({"a": 1, "b": "two", "c": [1, 2], "$d_1": {}}));
    }

    #[test]
    fn comments_are_whitespace() {
        let v = parse("// lead\n{ /* k */ a: /* v */ true // tail\n}").unwrap();
        assert_eq!(v, json!({"a": true}));
    }

    #[test]
    fn number_forms() {
        assert_eq!(parse("-12").unwrap(), json!(-12));
        assert_eq!(parse("+7").unwrap(), json!(7));
        assert_eq!(parse("0x1F").unwrap(), json!(31));
        assert_eq!(parse("1.5e2").unwrap(), json!(150.0));
        assert_eq!(parse(".5").unwrap(), json!(0.5));
        assert_eq!(parse("18446744073709551615").unwrap(), json!(u64::MAX));
        assert!(parse("1e999").is_err());
        assert!(parse("-").is_err());
    }

    #[test]
    fn escapes() {
        assert_eq!(parse(r#""a\x41B\/\'""#).unwrap(), json!("aAB/'"));
        assert_eq!(parse(r#""\u{1F600}""#).unwrap(), json!("\u{1F600}"));
        assert_eq!(parse(r#""\ud83d""#).unwrap(), json!("\u{FFFD}"));
        assert_eq!(parse(r#""\ude00x""#).unwrap(), json!("\u{FFFD}x"));
        assert_eq!(parse(r#""\é""#).unwrap(), json!("é"));
        assert_eq!(parse("\"line\\\ncont\"").unwrap(), json!("linecont"));
    }

    #[test]
    fn errors_carry_position() {
        match parse("{\n  a: NaN\n}") {
            Err(ScrapeError::Decode { line, column, message }) => {
                assert_eq!((line, column), (2, 6));
                assert!(message.contains("NaN"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(parse("[1 2]"), Err(ScrapeError::Decode { .. })));
        assert!(matches!(parse("{a: 1"), Err(ScrapeError::Decode { .. })));
        assert!(matches!(parse("'open"), Err(ScrapeError::Decode { .. })));
        assert!(matches!(parse("{} x"), Err(ScrapeError::Decode { .. })));
    }

    #[test]
    fn depth_is_bounded() {
        let deep = "[".repeat(MAX_DEPTH + 1);
        match parse(&deep) {
            Err(ScrapeError::Decode { message, .. }) => assert!(message.contains("deep")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn leading_value_stops_at_semicolon() {
        let mut p = Parser::new("{a: 1};\nwindow.X = 2;");
        assert_eq!(p.parse_leading().unwrap(), json!({"a": 1}));
        assert_eq!(&"{a: 1};\nwindow.X = 2;"[p.pos()..], ";\nwindow.X = 2;");
    }
}
