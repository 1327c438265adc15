//! Upstream payload parsing.
//!
//! The extraction pipeline hands the editor one payload whose shape is not fixed: an
//! already parsed document, a JSON-like string that may use single quotes, or
//! nothing at all. [`parse`] turns any of these into a [`RawDocument`] and never
//! fails; unreadable payloads are logged and replaced by an empty document so the
//! user can start from scratch.
//!
//! # Example
//!
//! ```
//! use docmeta::payload::{parse, RawField};
//!
//! let document = parse("{'TITLE':'Foo','METADATA':{'AUTHORS':'A,B'}}");
//! assert_eq!(document.get("TITLE"), Some(&RawField::from("Foo")));
//!
//! let broken = parse("{not json");
//! assert!(broken.is_empty());
//! ```

mod literal;
mod structure;

pub use literal::parse_strict;
pub use structure::{RawDocument, RawField, RawPayload};

use log::warn;

/// Parses an upstream payload, falling back to an empty document.
///
/// A structured mapping passes through unchanged; no role resolution happens here.
/// Any failure is logged at `warn` level and never surfaced to the caller.
pub fn parse<P: Into<RawPayload>>(raw: P) -> RawDocument {
    match parse_strict(raw) {
        Ok(document) => document,
        Err(err) => {
            warn!("discarding unreadable metadata payload: {err}");
            RawDocument::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_single_quoted_payload() {
        let document = parse("{'TITLE':'Foo','METADATA':{'AUTHORS':'A,B'}}");
        assert_eq!(document.len(), 2);
        assert_eq!(document.get("TITLE"), Some(&RawField::from("Foo")));
        assert_eq!(
            document.get("METADATA"),
            Some(&RawField::Group(vec![(
                "AUTHORS".to_string(),
                RawField::from("A,B")
            )]))
        );
    }

    #[test]
    fn test_parse_malformed_payload_is_empty() {
        assert!(parse("{not json").is_empty());
        assert!(parse("[\"a\", \"b\"]").is_empty());
        assert!(parse(json!(["a"])).is_empty());
        assert!(parse(None::<String>).is_empty());
    }

    #[test]
    fn test_parse_structured_payload() {
        let document = parse(json!({
            "TITLE": "Foo",
            "AUTHORS": ["A", "B"]
        }));
        assert_eq!(document.keys().collect::<Vec<_>>(), vec!["TITLE", "AUTHORS"]);
        assert_eq!(document.get("AUTHORS"), Some(&RawField::from(vec!["A", "B"])));
    }
}
