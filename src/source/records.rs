//! Conversion of loosely-typed record values into [`RawRecord`]s.
//!
//! Two record shapes are accepted:
//! - generator layout: `[key, [displayName, [url, flag, scope], [url, flag, scope], ...]]`
//! - compact layout: `[displayName, [[scope, url], [scope, url], ...]]`
//!
//! Missing or `null` strings become empty strings so the index integrity check can report
//! them by name; anything structurally different is rejected here.
//!
//! The generator writes names and scopes XML-escaped (`operator&lt;`) while deriving the key
//! from the raw text (`operator_3c`), so generator-layout strings are unescaped here.

use super::{RawRecord, RawTarget};
use crate::error::MalformedIndexError;
use regex::{Captures, Regex};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::LazyLock;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]{1,6})|#([0-9]{1,7})|(amp|lt|gt|quot|apos));")
        .expect("valid regex")
});

/// Convert every element of a record list.
pub fn records_from_values(
    bucket: &str,
    values: &[Value],
) -> Result<Vec<RawRecord>, MalformedIndexError> {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| record_from_value(bucket, idx, value))
        .collect()
}

/// Convert a single record value.
pub fn record_from_value(
    bucket: &str,
    record: usize,
    value: &Value,
) -> Result<RawRecord, MalformedIndexError> {
    let invalid = |reason: &str| MalformedIndexError::InvalidRecord {
        bucket: bucket.to_string(),
        record,
        reason: reason.to_string(),
    };

    let (head, body) = match value.as_array().map(Vec::as_slice) {
        Some([head, body]) => (head, body),
        _ => return Err(invalid("expected a two-element array")),
    };
    let head = optional_str(head).ok_or_else(|| invalid("first element must be a string"))?;
    let body = body
        .as_array()
        .ok_or_else(|| invalid("second element must be an array"))?;

    match body.first() {
        // Compact layout: the head is the display name, the body lists [scope, url] pairs
        None | Some(Value::Array(_)) => {
            let targets = body
                .iter()
                .map(|pair| compact_target(pair).ok_or_else(|| invalid("expected [scope, url]")))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RawRecord {
                key: None,
                display_name: head.to_string(),
                targets,
            })
        }
        // Generator layout: the head is the key, the body starts with the display name
        Some(name) => {
            let display_name =
                optional_str(name).ok_or_else(|| invalid("display name must be a string"))?;
            let targets = body[1..]
                .iter()
                .map(|target| {
                    generator_target(target).ok_or_else(|| invalid("expected [url, flag, scope]"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RawRecord {
                key: Some(head.to_string()),
                display_name: decode_entities(display_name).into_owned(),
                targets,
            })
        }
    }
}

/// A string, or `""` for `null`.
fn optional_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Null => Some(""),
        _ => None,
    }
}

fn compact_target(value: &Value) -> Option<RawTarget> {
    match value.as_array()?.as_slice() {
        [scope, url] => Some(RawTarget {
            url: optional_str(url)?.to_string(),
            scope: optional_str(scope)?.to_string(),
        }),
        _ => None,
    }
}

fn generator_target(value: &Value) -> Option<RawTarget> {
    let parts = value.as_array()?;
    let url = optional_str(parts.first()?)?;
    // parts[1] is the generator's link flag; it carries nothing the index needs
    let scope = match parts.get(2) {
        Some(scope) => optional_str(scope)?,
        None => "",
    };
    if parts.len() > 3 {
        return None;
    }
    Some(RawTarget {
        url: url.to_string(),
        scope: decode_entities(scope).into_owned(),
    })
}

/// Replace XML character references in a single pass.
///
/// Only the five predefined entities and numeric references are decoded; anything else,
/// including references to invalid code points, is left as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY.replace_all(text, |caps: &Captures<'_>| {
        let decoded = if let Some(hex) = caps.get(1) {
            u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = caps.get(2) {
            dec.as_str().parse().ok().and_then(char::from_u32)
        } else {
            match caps.get(3).map(|m| m.as_str()) {
                Some("amp") => Some('&'),
                Some("lt") => Some('<'),
                Some("gt") => Some('>'),
                Some("quot") => Some('"'),
                Some("apos") => Some('\''),
                _ => None,
            }
        };
        decoded.map_or_else(|| caps[0].to_string(), String::from)
    })
}
