//! Field normalization.
//!
//! Converts any raw field value into the canonical shapes held by a
//! [`MetadataDocument`](crate::MetadataDocument).
//!
//! # Rules
//!
//! [`normalize`] applies, in priority order:
//!
//! 1. Absent or falsy values (`null`, `""`, `[]`, `{}`, numbers, booleans) become an
//!    empty list.
//! 2. Lists are flattened in order, each element trimmed, empty elements dropped.
//!    Elements are never split further.
//! 3. A single string is split on commas and line breaks.
//! 4. Nested groupings contribute all their leaf strings in document order.
//!
//! The functions here are pure and total. Normalizing an already normalized list
//! returns it unchanged.
//!
//! # Example
//!
//! ```
//! use docmeta::normalize::normalize;
//! use docmeta::RawField;
//!
//! assert_eq!(normalize(&RawField::from("a, b,\nc")), vec!["a", "b", "c"]);
//! assert_eq!(normalize(&RawField::from(vec!["  a ", "", "b"])), vec!["a", "b"]);
//! assert!(normalize(&RawField::Missing).is_empty());
//! ```

use crate::payload::RawField;
use crate::utils::{collapse_whitespace, split_list_items};
use crate::{FieldRole, FieldValue};

/// Normalizes a raw value into an ordered list of trimmed, non-empty strings.
pub fn normalize(raw: &RawField) -> Vec<String> {
    if raw.is_falsy() {
        return Vec::new();
    }

    match raw {
        RawField::Text(text) => normalize_text(text),
        RawField::List(_) | RawField::Group(_) => {
            let mut leaves = Vec::new();
            raw.collect_leaves(&mut leaves);
            leaves
                .into_iter()
                .map(str::trim)
                .filter(|leaf| !leaf.is_empty())
                .map(String::from)
                .collect()
        }
        RawField::Missing | RawField::Other(_) => Vec::new(),
    }
}

/// Normalizes free text, such as an edited draft, by splitting it on commas and
/// line breaks.
pub fn normalize_text(text: &str) -> Vec<String> {
    split_list_items(text).map(String::from).collect()
}

/// Normalizes a raw value into a single scalar string, as used for titles and
/// abstracts.
///
/// Strings are not split. Lists and groups are flattened and joined with a space,
/// and runs of whitespace collapse to one space. Returns `None` when nothing is left.
pub fn normalize_scalar(raw: &RawField) -> Option<String> {
    let mut leaves = Vec::new();
    raw.collect_leaves(&mut leaves);
    let text = leaves
        .into_iter()
        .map(collapse_whitespace)
        .filter(|leaf| !leaf.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

/// Normalizes the value of a generic content field, keeping scalars as text.
///
/// Unlike [`normalize`], numbers and booleans are kept as their JSON text, so an
/// unresolved field like `"page_count": 12` is still shown.
pub fn normalize_content(raw: &RawField) -> Option<FieldValue> {
    match raw {
        RawField::Text(text) | RawField::Other(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| FieldValue::Text(text.to_string()))
        }
        RawField::Missing => None,
        RawField::List(_) | RawField::Group(_) => {
            let mut leaves = Vec::new();
            raw.collect_all_leaves(&mut leaves);
            let items: Vec<String> = leaves
                .into_iter()
                .map(str::trim)
                .filter(|leaf| !leaf.is_empty())
                .map(String::from)
                .collect();
            (!items.is_empty()).then_some(FieldValue::List(items))
        }
    }
}

/// Renders a normalized list back into editable text.
///
/// Affiliations are placed one per line since they often contain commas themselves;
/// every other role is comma-separated.
pub fn render_draft(role: FieldRole, items: &[String]) -> String {
    match role {
        FieldRole::Affiliations => items.join("\n"),
        _ => items.join(", "),
    }
}
