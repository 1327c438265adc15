//! A library for normalizing, confirming, and exporting document metadata produced by
//! OCR and layout-detection pipelines.
//!
//! `docmeta` sits between an upstream extraction pipeline and a human editor. The
//! pipeline hands over one loosely-typed payload; this crate turns it into a clean
//! canonical document, lets a user correct and confirm each field, and renders the
//! confirmed result as a fixed-layout report.
//!
//! # Key Features
//!
//! - **Tolerant Payload Parsing**: structured JSON values, JSON-like strings with
//!   single quotes, or nothing at all. Malformed input degrades to an empty document.
//!
//! - **Field Normalization**: scalar strings, lists, and nested groupings all become
//!   ordered lists of trimmed, non-empty strings.
//!
//! - **Role Resolution**: upstream keys such as `AUTHORS`, `Author_List`, or
//!   `author names` resolve to canonical roles, with wrapper containers unwrapped.
//!
//! - **Confirm/Lock Workflow**: authors, emails, affiliations, and keywords are
//!   edited as drafts and locked one by one. Export is offered once all are locked.
//!
//! # Basic Usage
//!
//! ```rust
//! use docmeta::{EditorSession, FieldRole};
//!
//! let payload = "{'TITLE':'Foo','METADATA':{'AUTHORS':'A,B'}}";
//! let mut session = EditorSession::open(payload);
//!
//! assert_eq!(session.preview().title.as_deref(), Some("Foo"));
//! assert_eq!(session.preview().metadata.authors, vec!["A", "B"]);
//!
//! session.set_draft(FieldRole::Emails, "x@y.com, , z@w.com").unwrap();
//! for role in FieldRole::GOVERNED {
//!     session.save(role).unwrap();
//! }
//! assert!(session.all_locked());
//!
//! let report = session.export().unwrap();
//! println!("{report}");
//! ```
//!
//! # Error Handling
//!
//! Payload problems never surface as errors: they are logged through the [`log`]
//! facade and the editor starts from an empty document. Misuse of the editing
//! workflow is reported through [`MetadataError`]:
//!
//! ```rust
//! use docmeta::{EditorSession, FieldRole, MetadataError};
//!
//! let mut session = EditorSession::open("{not json");
//! session.save(FieldRole::Keywords).unwrap();
//! match session.set_draft(FieldRole::Keywords, "late edit") {
//!     Err(MetadataError::FieldLocked(role)) => eprintln!("{role} is already confirmed"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! # Thread Safety
//!
//! All types are `Send + Sync`. A session is meant to be driven by one event loop;
//! preview snapshots handed out by [`EditorSession::preview`] can be read from
//! anywhere while the session keeps editing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod export;
pub mod normalize;
pub mod payload;
pub mod reconcile;
mod regex;
pub mod resolve;
pub mod session;
mod utils;

// Reexports
pub use export::ExportReport;
pub use payload::{RawDocument, RawField, RawPayload};
pub use resolve::{FieldResolver, FieldRole, ResolverConfig};
pub use session::{DraftState, EditorSession, FieldDraft};

/// A specialized Result type for metadata operations.
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Represents errors that can occur while parsing, editing, or exporting metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Payload is not a mapping: found {0}")]
    NotAMapping(String),

    #[error("Field is locked: {0}")]
    FieldLocked(FieldRole),

    #[error("Field is not editable: {0}")]
    NotEditable(FieldRole),

    #[error("No item {index} in {role} (has {len})")]
    ItemOutOfRange {
        role: FieldRole,
        index: usize,
        len: usize,
    },

    #[error("Export not ready, unconfirmed fields: {}", itertools::join(.pending, ", "))]
    ExportNotReady { pending: Vec<FieldRole> },
}

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        MetadataError::MalformedPayload(err.to_string())
    }
}

/// A normalized value of a generic content field.
///
/// Content fields keep the shape they arrived in: a scalar string stays a single
/// string, anything list-like becomes a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

/// An upstream field that matched no canonical role, kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentField {
    /// The key exactly as the upstream pipeline spelled it
    pub key: String,
    /// Normalized value
    pub value: FieldValue,
}

/// The governed list fields of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Author names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// Contact email addresses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
    /// Institutional affiliations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<String>,
    /// Keywords or index terms
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl Metadata {
    /// Returns the values stored for a list role, or `None` for scalar and content roles.
    pub fn get(&self, role: FieldRole) -> Option<&[String]> {
        match role {
            FieldRole::Authors => Some(&self.authors),
            FieldRole::Emails => Some(&self.emails),
            FieldRole::Affiliations => Some(&self.affiliations),
            FieldRole::Keywords => Some(&self.keywords),
            _ => None,
        }
    }

    pub(crate) fn slot_mut(&mut self, role: FieldRole) -> Option<&mut Vec<String>> {
        match role {
            FieldRole::Authors => Some(&mut self.authors),
            FieldRole::Emails => Some(&mut self.emails),
            FieldRole::Affiliations => Some(&mut self.affiliations),
            FieldRole::Keywords => Some(&mut self.keywords),
            _ => None,
        }
    }
}

/// The canonical metadata document of one editing session.
///
/// Every string reachable from a document is trimmed and non-empty, and every list
/// holds at least one such string. Missing data is represented by `None` or an empty
/// list, which is skipped when serializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    /// Title of the work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Authors, emails, affiliations, and keywords
    #[serde(default)]
    pub metadata: Metadata,
    /// Abstract text
    #[serde(
        rename = "abstract",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub abstract_text: Option<String>,
    /// Fields that matched no role, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentField>,
}

impl MetadataDocument {
    /// Returns `true` if the document holds no data at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.abstract_text.is_none()
            && self.content.is_empty()
            && self.metadata == Metadata::default()
    }

    /// Serializes the document for a preview renderer.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EditorSession>();
        assert_send_sync::<FieldResolver>();
        assert_send_sync::<ExportReport>();
        assert_send_sync::<MetadataDocument>();
        assert_send_sync::<MetadataError>();
    }

    #[test]
    fn test_metadata_error_display() {
        let error = MetadataError::FieldLocked(FieldRole::Emails);
        assert_eq!(error.to_string(), "Field is locked: Emails");

        let error = MetadataError::ExportNotReady {
            pending: vec![FieldRole::Authors, FieldRole::Keywords],
        };
        assert_eq!(
            error.to_string(),
            "Export not ready, unconfirmed fields: Authors, Keywords"
        );
    }

    #[test]
    fn test_empty_document() {
        let document = MetadataDocument::default();
        assert!(document.is_empty());
        assert_eq!(document.to_json().unwrap(), "{\n  \"metadata\": {}\n}");
    }

    #[test]
    fn test_document_json_shape() {
        let document = MetadataDocument {
            title: Some("Foo".to_string()),
            metadata: Metadata {
                authors: vec!["A".to_string(), "B".to_string()],
                ..Default::default()
            },
            abstract_text: None,
            content: vec![ContentField {
                key: "Notes".to_string(),
                value: FieldValue::Text("scanned at 200 dpi".to_string()),
            }],
        };
        assert!(!document.is_empty());

        let value: serde_json::Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Foo",
                "metadata": { "authors": ["A", "B"] },
                "content": [{ "key": "Notes", "value": "scanned at 200 dpi" }]
            })
        );
    }

    #[test]
    fn test_metadata_get() {
        let metadata = Metadata {
            keywords: vec!["ocr".to_string()],
            ..Default::default()
        };
        assert_eq!(metadata.get(FieldRole::Keywords), Some(&["ocr".to_string()][..]));
        assert_eq!(metadata.get(FieldRole::Emails).map(<[String]>::len), Some(0));
        assert_eq!(metadata.get(FieldRole::Title), None);
    }
}
