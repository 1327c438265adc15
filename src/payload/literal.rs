//! Payload literal parsing.
//!
//! This module handles turning a [`RawPayload`] into a [`RawDocument`].

use crate::payload::structure::{RawDocument, RawPayload};
use crate::utils::requote_single_quotes;
use crate::{MetadataError, Result};
use serde_json::Value;

/// Parse a payload, reporting why it could not be read.
///
/// * `Absent`, `null`, and blank strings yield an empty document.
/// * Strings are read as JSON first, then again with single quotes treated as
///   double quotes.
/// * Anything that is not a mapping at the top level is rejected.
///
/// # Errors
///
/// Returns [`MetadataError::MalformedPayload`] if a string cannot be read either way,
/// and [`MetadataError::NotAMapping`] if the top-level value is not a mapping.
pub fn parse_strict<P: Into<RawPayload>>(raw: P) -> Result<RawDocument> {
    let value = match raw.into() {
        RawPayload::Absent => return Ok(RawDocument::new()),
        RawPayload::Structured(value) => value,
        RawPayload::Text(text) => {
            if text.trim().is_empty() {
                return Ok(RawDocument::new());
            }
            read_literal(&text)?
        }
    };

    match value {
        Value::Object(map) => Ok(RawDocument::from(map)),
        Value::Null => Ok(RawDocument::new()),
        other => Err(MetadataError::NotAMapping(value_kind(&other).to_string())),
    }
}

/// Read a JSON-like literal, falling back to single-quote recovery.
fn read_literal(text: &str) -> Result<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) => Ok(serde_json::from_str(&requote_single_quotes(text))?),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
