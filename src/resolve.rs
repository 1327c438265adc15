//! Field key resolution.
//!
//! Upstream pipelines do not agree on field names: one version emits `AUTHORS`,
//! another `Author_List`, a third nests everything under `METADATA`. The
//! [`FieldResolver`] maps each raw key onto a canonical [`FieldRole`] and builds the
//! [`MetadataDocument`] the editor works on.
//!
//! # Matching
//!
//! - A key resolves to the first role of [`FieldRole::VOCABULARY`] whose term it
//!   contains, ignoring case. `Author_List` is authors, `AUTHOR_EMAIL` is authors too.
//! - If several keys resolve to the same role, the first one in document order wins.
//!   Later ones are kept as generic content.
//! - Keys that match nothing are kept as generic content.
//! - A grouping whose own key matches nothing but which holds role keys is a wrapper:
//!   its entries are spliced in at its position before matching.
//! - Older pipelines emit numbered section pairs (`TITLE1`, `CONTENT1`, `TITLE2`…).
//!   When nothing resolved to the abstract, a section titled "Abstract" supplies it.
//!
//! # Example
//!
//! ```
//! use docmeta::{MetadataDocument, payload::parse};
//!
//! let raw = parse(r#"{"Paper Title": "Foo", "info": {"Author_List": ["A", "B"]}}"#);
//! let document = MetadataDocument::from(raw);
//! assert_eq!(document.title.as_deref(), Some("Foo"));
//! assert_eq!(document.metadata.authors, vec!["A", "B"]);
//! ```

mod config;
mod roles;

pub use config::ResolverConfig;
pub use roles::FieldRole;

use crate::normalize::{normalize, normalize_content, normalize_scalar};
use crate::payload::{RawDocument, RawField};
use crate::regex::{Regex, escape};
use crate::utils::is_heading;
use crate::{ContentField, MetadataDocument};
use either::{Left, Right};
use itertools::Itertools;
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::LazyLock;

static DEFAULT_RESOLVER: LazyLock<FieldResolver> = LazyLock::new(FieldResolver::new);

/// Maps raw upstream keys onto canonical roles.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    /// One case-insensitive matcher per role, in vocabulary order
    matchers: Vec<(FieldRole, Regex)>,
    unwrap_wrappers: bool,
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldResolver {
    /// Creates a resolver using the fixed default vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&ResolverConfig::new())
    }

    /// Creates a resolver from a custom configuration.
    #[must_use]
    pub fn with_config(config: &ResolverConfig) -> Self {
        let matchers = config
            .vocabulary
            .iter()
            .filter(|(_, terms)| !terms.is_empty())
            .filter_map(|(role, terms)| {
                let pattern = format!("(?i)(?:{})", terms.iter().map(|t| escape(t)).join("|"));
                match Regex::new(&pattern) {
                    Ok(regex) => Some((*role, regex)),
                    Err(err) => {
                        warn!("skipping vocabulary for {role}: {err}");
                        None
                    }
                }
            })
            .collect();

        Self {
            matchers,
            unwrap_wrappers: config.unwrap_wrappers,
        }
    }

    /// Returns the role a single key resolves to, without tie-breaking.
    pub fn role_for_key(&self, key: &str) -> FieldRole {
        self.matchers
            .iter()
            .find(|(_, regex)| regex.is_match(key))
            .map_or(FieldRole::Content, |(role, _)| *role)
    }

    /// Resolves every key of a raw document and normalizes its values.
    pub fn resolve(&self, raw: RawDocument) -> MetadataDocument {
        let entries = self.unwrap_entries(raw.entries);

        let mut claimed = HashSet::new();
        let (resolved, mut unresolved): (Vec<_>, Vec<_>) =
            entries.into_iter().partition_map(|(key, value)| {
                let role = self.role_for_key(&key);
                if role == FieldRole::Content {
                    Right((key, value))
                } else if claimed.insert(role) {
                    debug!("resolved key `{key}` to {role}");
                    Left((role, value))
                } else {
                    debug!("key `{key}` also matches {role}; keeping it as content");
                    Right((key, value))
                }
            });

        let mut document = MetadataDocument::default();
        for (role, value) in resolved {
            match role {
                FieldRole::Title => document.title = normalize_scalar(&value),
                FieldRole::Abstract => document.abstract_text = normalize_scalar(&value),
                role => {
                    if let Some(slot) = document.metadata.slot_mut(role) {
                        *slot = normalize(&value);
                    }
                }
            }
        }

        if document.abstract_text.is_none() {
            document.abstract_text = self.take_abstract_section(&mut unresolved);
        }

        document.content = unresolved
            .into_iter()
            .filter_map(|(key, value)| match normalize_content(&value) {
                Some(value) => Some(ContentField { key, value }),
                None => {
                    debug!("content field `{key}` holds no data");
                    None
                }
            })
            .collect();

        document
    }

    /// Splices the entries of wrapper containers in place of the container.
    fn unwrap_entries(&self, entries: Vec<(String, RawField)>) -> Vec<(String, RawField)> {
        if !self.unwrap_wrappers {
            return entries;
        }

        let mut flattened = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            if self.is_wrapper(&key, &value) {
                debug!("unwrapping container `{key}`");
                if let RawField::Group(inner) = value {
                    flattened.extend(self.unwrap_entries(inner));
                }
            } else {
                flattened.push((key, value));
            }
        }
        flattened
    }

    /// A wrapper is a grouping under a key that matches no role, holding at least
    /// one key that does (directly or through another wrapper).
    fn is_wrapper(&self, key: &str, value: &RawField) -> bool {
        if self.role_for_key(key) != FieldRole::Content {
            return false;
        }
        value.as_group().is_some_and(|inner| {
            inner.iter().any(|(inner_key, inner_value)| {
                self.role_for_key(inner_key) != FieldRole::Content
                    || self.is_wrapper(inner_key, inner_value)
            })
        })
    }

    /// Takes the body of an "Abstract" section pair out of the unresolved entries.
    ///
    /// The heading is an entry whose key names a title and whose text is "Abstract";
    /// the body is the raw entry right after it. A pair with an empty body stays in
    /// place.
    fn take_abstract_section(&self, entries: &mut Vec<(String, RawField)>) -> Option<String> {
        let index = entries.iter().position(|(key, value)| {
            self.role_for_key(key) == FieldRole::Title
                && matches!(value, RawField::Text(text) if is_heading(text, "abstract"))
        })?;
        let text = entries
            .get(index + 1)
            .and_then(|(_, body)| normalize_scalar(body))?;

        let (body, _) = entries.remove(index + 1);
        let (heading, _) = entries.remove(index);
        debug!("using section `{body}` after heading `{heading}` as the abstract");
        Some(text)
    }
}

impl From<RawDocument> for MetadataDocument {
    fn from(raw: RawDocument) -> Self {
        DEFAULT_RESOLVER.resolve(raw)
    }
}
