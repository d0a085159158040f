//! Search-data scripts emitted by the documentation generator.
//!
//! Each script holds a single bucket:
//!
//! ```text
//! var searchData=
//! [
//!   ['date',['Date',['../structcmf_1_1math_1_1_date.html',1,'Date']]],
//!   ...
//! ];
//! ```
//!
//! The payload is a JavaScript array literal rather than JSON (single-quoted strings,
//! optional trailing commas), so it is read with a small literal parser that produces
//! [`serde_json::Value`]s and then goes through the shared record conversion.

use super::records::records_from_values;
use super::{RawBucket, SourceDecodeError};
use crate::error::SourceError;
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

/// Matches the `var searchData =` assignment that precedes the literal.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:var|let|const)\s+[A-Za-z_$][\w$]*\s*=\s*").expect("valid regex")
});

/// Decode one script into an unnamed bucket.
pub fn decode(text: &str) -> Result<RawBucket, SourceDecodeError> {
    let value = parse_literal(text)?;
    let Value::Array(values) = value else {
        return Err(SourceError::Script {
            offset: 0,
            message: "search data must be an array".to_string(),
        }
        .into());
    };
    // Bucket key is not known yet; records are labelled by script position
    let records = records_from_values("<script>", &values)?;
    Ok(RawBucket { key: None, records })
}

/// Parse the literal assigned by a search-data script (the assignment itself is optional).
pub fn parse_literal(text: &str) -> Result<Value, SourceError> {
    let start = ASSIGNMENT.find(text).map_or(0, |m| m.end());
    let mut parser = LiteralParser {
        src: text.as_bytes(),
        text,
        pos: start,
    };

    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.peek() == Some(b';') {
        parser.pos += 1;
    }
    parser.skip_whitespace();
    if parser.pos != parser.src.len() {
        return Err(parser.error("unexpected trailing content"));
    }
    Ok(value)
}

struct LiteralParser<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
}

impl LiteralParser<'_> {
    fn error(&self, message: &str) -> SourceError {
        SourceError::Script {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn value(&mut self) -> Result<Value, SourceError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'[') => self.array(),
            Some(quote @ (b'\'' | b'"')) => self.string(quote).map(Value::String),
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(b't') => self.keyword("true", Value::Bool(true)),
            Some(b'f') => self.keyword("false", Value::Bool(false)),
            Some(b'n') => self.keyword("null", Value::Null),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn array(&mut self) -> Result<Value, SourceError> {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                Some(_) => return Err(self.error("expected ',' or ']'")),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn string(&mut self, quote: u8) -> Result<String, SourceError> {
        self.pos += 1;
        let mut out = String::new();
        let mut run_start = self.pos;
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some(b) if b == quote => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    self.escape(&mut out)?;
                    run_start = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), SourceError> {
        let Some(b) = self.peek() else {
            return Err(self.error("unterminated escape"));
        };
        self.pos += 1;
        match b {
            b'n' => out.push('\n'),
            b't' => out.push('\t'),
            b'r' => out.push('\r'),
            b'0' => out.push('\0'),
            b'u' => {
                let digits = self
                    .text
                    .get(self.pos..self.pos + 4)
                    .ok_or_else(|| self.error("truncated \\u escape"))?;
                let code = u32::from_str_radix(digits, 16)
                    .map_err(|_| self.error("invalid \\u escape"))?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                self.pos += 4;
            }
            // Any other escaped char stands for itself (\\, \', \", \/)
            _ => {
                let ch_start = self.pos - 1;
                let ch = self.text[ch_start..]
                    .chars()
                    .next()
                    .ok_or_else(|| self.error("invalid escape"))?;
                out.push(ch);
                self.pos = ch_start + ch.len_utf8();
            }
        }
        Ok(())
    }

    fn number(&mut self) -> Result<Value, SourceError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E'))
        {
            self.pos += 1;
        }
        let literal = &self.text[start..self.pos];
        if let Ok(int) = literal.parse::<i64>() {
            return Ok(Value::Number(int.into()));
        }
        literal
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| SourceError::Script {
                offset: start,
                message: format!("invalid number '{}'", literal),
            })
    }

    fn keyword(&mut self, word: &str, value: Value) -> Result<Value, SourceError> {
        if self.src[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            Ok(value)
        } else {
            Err(self.error("unexpected identifier"))
        }
    }
}
