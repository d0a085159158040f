//! JSON bucket-map sources: `{ "<bucket>": [record, ...], ... }`.

use super::records::records_from_values;
use super::{RawBucket, SourceDecodeError};
use crate::error::{MalformedIndexError, SourceError};
use serde_json::{Map, Value};

/// Decode a JSON bucket map. Record order within each bucket is preserved.
pub fn decode(text: &str) -> Result<Vec<RawBucket>, SourceDecodeError> {
    let root: Map<String, Value> =
        serde_json::from_str(text).map_err(|e| SourceError::Json(e.to_string()))?;

    root.into_iter()
        .map(|(key, value)| {
            let Value::Array(values) = value else {
                return Err(MalformedIndexError::InvalidLayout(format!(
                    "bucket '{}' must map to an array of records",
                    key
                ))
                .into());
            };
            let records = records_from_values(&key, &values)?;
            Ok(RawBucket {
                key: Some(key),
                records,
            })
        })
        .collect()
}
