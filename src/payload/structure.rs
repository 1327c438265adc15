//! Payload data structures.
//!
//! This module defines the untyped shapes an upstream payload can take before any
//! role resolution happens.
//!
//! # Design Decision
//!
//! Upstream pipelines change the shape of a field between versions: the same
//! authors may arrive as `"A, B"`, `["A", "B"]`, or `{"first": "A", "second": "B"}`.
//! Instead of probing JSON values wherever a field is read, every value is converted
//! once into a [`RawField`] and each variant gets its own normalization rule.

use serde_json::{Map, Value};

/// The payload handed over by the upstream pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawPayload {
    /// An already parsed document
    Structured(Value),
    /// A JSON-like literal that still needs parsing, possibly single-quoted
    Text(String),
    /// Nothing was delivered
    #[default]
    Absent,
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawPayload::Absent,
            Value::String(text) => RawPayload::Text(text),
            value => RawPayload::Structured(value),
        }
    }
}

impl From<String> for RawPayload {
    fn from(text: String) -> Self {
        RawPayload::Text(text)
    }
}

impl From<&str> for RawPayload {
    fn from(text: &str) -> Self {
        RawPayload::Text(text.to_string())
    }
}

impl<T: Into<RawPayload>> From<Option<T>> for RawPayload {
    fn from(payload: Option<T>) -> Self {
        payload.map_or(RawPayload::Absent, Into::into)
    }
}

/// One raw field value, tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawField {
    /// `null` or no value
    Missing,
    /// A single string
    Text(String),
    /// An ordered sequence of values
    List(Vec<RawField>),
    /// A nested mapping of sub-values, in document order
    Group(Vec<(String, RawField)>),
    /// A number or boolean, kept as its JSON text
    Other(String),
}

impl RawField {
    /// Returns `true` for values that carry nothing: missing values, empty strings,
    /// empty lists or groups, numbers and booleans.
    pub fn is_falsy(&self) -> bool {
        match self {
            RawField::Missing | RawField::Other(_) => true,
            RawField::Text(text) => text.is_empty(),
            RawField::List(items) => items.is_empty(),
            RawField::Group(entries) => entries.is_empty(),
        }
    }

    /// Returns the sub-entries of a nested grouping.
    pub fn as_group(&self) -> Option<&[(String, RawField)]> {
        match self {
            RawField::Group(entries) => Some(entries),
            _ => None,
        }
    }

    /// Collects every string leaf in document order, descending into lists and groups.
    pub(crate) fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        self.walk_leaves(false, leaves);
    }

    /// Like [`RawField::collect_leaves`], but numbers and booleans contribute
    /// their JSON text too.
    pub(crate) fn collect_all_leaves<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        self.walk_leaves(true, leaves);
    }

    fn walk_leaves<'a>(&'a self, with_scalars: bool, leaves: &mut Vec<&'a str>) {
        match self {
            RawField::Text(text) => leaves.push(text.as_str()),
            RawField::Other(text) if with_scalars => leaves.push(text.as_str()),
            RawField::List(items) => items
                .iter()
                .for_each(|item| item.walk_leaves(with_scalars, leaves)),
            RawField::Group(entries) => entries
                .iter()
                .for_each(|(_, value)| value.walk_leaves(with_scalars, leaves)),
            RawField::Missing | RawField::Other(_) => {}
        }
    }
}

impl From<Value> for RawField {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawField::Missing,
            Value::String(text) => RawField::Text(text),
            Value::Array(items) => RawField::List(items.into_iter().map(RawField::from).collect()),
            Value::Object(map) => RawField::Group(
                map.into_iter()
                    .map(|(key, value)| (key, RawField::from(value)))
                    .collect(),
            ),
            value @ (Value::Bool(_) | Value::Number(_)) => RawField::Other(value.to_string()),
        }
    }
}

impl From<&str> for RawField {
    fn from(text: &str) -> Self {
        RawField::Text(text.to_string())
    }
}

impl From<Vec<String>> for RawField {
    fn from(items: Vec<String>) -> Self {
        RawField::List(items.into_iter().map(RawField::Text).collect())
    }
}

impl From<Vec<&str>> for RawField {
    fn from(items: Vec<&str>) -> Self {
        RawField::List(items.into_iter().map(RawField::from).collect())
    }
}

/// A parsed payload whose keys have not been resolved to roles yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
    /// Top-level entries in document order
    pub(crate) entries: Vec<(String, RawField)>,
}

impl RawDocument {
    /// Create a new empty RawDocument.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, keeping document order.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<RawField>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Get the value stored under a key, compared exactly.
    pub fn get(&self, key: &str) -> Option<&RawField> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// Iterate over the raw keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Map<String, Value>> for RawDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| (key, RawField::from(value)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_payload_from_value() {
        assert_eq!(RawPayload::from(Value::Null), RawPayload::Absent);
        assert_eq!(
            RawPayload::from(json!("{'a': 1}")),
            RawPayload::Text("{'a': 1}".to_string())
        );
        assert_eq!(
            RawPayload::from(json!({"a": 1})),
            RawPayload::Structured(json!({"a": 1}))
        );
        assert_eq!(RawPayload::from(None::<&str>), RawPayload::Absent);
        assert_eq!(
            RawPayload::from(Some("x")),
            RawPayload::Text("x".to_string())
        );
    }

    #[test]
    fn test_field_from_value() {
        let field = RawField::from(json!({
            "first": "A",
            "rest": ["B", null, 3],
            "flag": true
        }));
        assert_eq!(
            field,
            RawField::Group(vec![
                ("first".to_string(), RawField::Text("A".to_string())),
                (
                    "rest".to_string(),
                    RawField::List(vec![
                        RawField::Text("B".to_string()),
                        RawField::Missing,
                        RawField::Other("3".to_string()),
                    ])
                ),
                ("flag".to_string(), RawField::Other("true".to_string())),
            ])
        );

        let mut leaves = Vec::new();
        field.collect_leaves(&mut leaves);
        assert_eq!(leaves, vec!["A", "B"]);

        let mut leaves = Vec::new();
        field.collect_all_leaves(&mut leaves);
        assert_eq!(leaves, vec!["A", "B", "3", "true"]);
    }

    #[test]
    fn test_is_falsy() {
        assert!(RawField::Missing.is_falsy());
        assert!(RawField::from("").is_falsy());
        assert!(RawField::List(Vec::new()).is_falsy());
        assert!(RawField::Group(Vec::new()).is_falsy());
        assert!(RawField::Other("0".to_string()).is_falsy());
        assert!(!RawField::from(" ").is_falsy());
        assert!(!RawField::from(vec!["a"]).is_falsy());
    }

    #[test]
    fn test_document_keeps_order() {
        let map = match json!({"zeta": "1", "alpha": "2", "mid": "3"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let document = RawDocument::from(map);
        assert_eq!(document.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(document.get("alpha"), Some(&RawField::from("2")));
        assert_eq!(document.get("ALPHA"), None);
    }

    #[test]
    fn test_document_push() {
        let mut document = RawDocument::new();
        assert!(document.is_empty());
        document.push("TITLE", "Foo");
        document.push("AUTHORS", vec!["A", "B"]);
        assert_eq!(document.len(), 2);
        assert_eq!(document.keys().collect::<Vec<_>>(), vec!["TITLE", "AUTHORS"]);
    }
}
