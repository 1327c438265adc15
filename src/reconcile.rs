//! Document reconciliation.
//!
//! Merges a confirmed field value back into the canonical document. Reconciling
//! never touches the input: it returns a new document, so a preview that still holds
//! the previous one keeps seeing a complete, consistent state.

use crate::normalize::normalize_text;
use crate::{FieldRole, MetadataDocument, MetadataError, Result};

/// Returns a copy of `document` with the metadata value of `role` replaced by the
/// normalized `draft`.
///
/// # Errors
///
/// Returns [`MetadataError::NotEditable`] if `role` is not one of the governed list
/// roles (authors, emails, affiliations, keywords).
pub fn reconcile(document: &MetadataDocument, role: FieldRole, draft: &str) -> Result<MetadataDocument> {
    reconcile_items(document, role, normalize_text(draft))
}

/// Like [`reconcile`], for a value that is already a normalized list.
pub(crate) fn reconcile_items(
    document: &MetadataDocument,
    role: FieldRole,
    items: Vec<String>,
) -> Result<MetadataDocument> {
    if !role.is_governed() {
        return Err(MetadataError::NotEditable(role));
    }

    let mut updated = document.clone();
    if let Some(slot) = updated.metadata.slot_mut(role) {
        *slot = items;
    }
    Ok(updated)
}
