//! Per-field draft buffers and their lock state.

use crate::normalize::{normalize_text, render_draft};
use crate::{FieldRole, MetadataError, Result};
use serde::Serialize;

/// Lock state of a governed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftState {
    /// The draft can be rewritten freely
    #[default]
    Editable,
    /// The value is confirmed for the rest of the session
    Locked,
}

/// The editing buffer of one governed field.
///
/// A draft starts [`DraftState::Editable`]. Locking is one-way: once locked, the
/// draft shows the confirmed normalized value and rejects every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDraft {
    role: FieldRole,
    text: String,
    state: DraftState,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmed: Option<Vec<String>>,
}

impl FieldDraft {
    /// Seeds a draft from the canonical value of its role.
    pub(crate) fn seed(role: FieldRole, items: &[String]) -> Self {
        Self {
            role,
            text: render_draft(role, items),
            state: DraftState::Editable,
            confirmed: None,
        }
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    /// The user-facing text of the draft.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == DraftState::Locked
    }

    /// The items the draft currently normalizes to, as shown in a chip list.
    pub fn items(&self) -> Vec<String> {
        match &self.confirmed {
            Some(items) => items.clone(),
            None => normalize_text(&self.text),
        }
    }

    /// The confirmed value, once the draft is locked.
    pub fn confirmed(&self) -> Option<&[String]> {
        self.confirmed.as_deref()
    }

    pub(crate) fn ensure_editable(&self) -> Result<()> {
        match self.state {
            DraftState::Editable => Ok(()),
            DraftState::Locked => Err(MetadataError::FieldLocked(self.role)),
        }
    }

    /// Replaces the draft text.
    pub(crate) fn edit(&mut self, text: String) -> Result<()> {
        self.ensure_editable()?;
        self.text = text;
        Ok(())
    }

    /// Removes one item and re-renders the draft, returning the remaining items.
    pub(crate) fn remove_item(&mut self, index: usize) -> Result<Vec<String>> {
        self.ensure_editable()?;
        let mut items = self.items();
        if index >= items.len() {
            return Err(MetadataError::ItemOutOfRange {
                role: self.role,
                index,
                len: items.len(),
            });
        }
        items.remove(index);
        self.text = render_draft(self.role, &items);
        Ok(items)
    }

    /// Locks the draft with its confirmed value, rendered back as normalized text.
    pub(crate) fn lock(&mut self, items: Vec<String>) {
        self.text = render_draft(self.role, &items);
        self.state = DraftState::Locked;
        self.confirmed = Some(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_seed() {
        let draft = FieldDraft::seed(FieldRole::Authors, &strings(&["A", "B"]));
        assert_eq!(draft.text(), "A, B");
        assert_eq!(draft.state(), DraftState::Editable);
        assert_eq!(draft.confirmed(), None);

        let draft = FieldDraft::seed(FieldRole::Affiliations, &strings(&["Univ X, Dept Y", "Lab Z"]));
        assert_eq!(draft.text(), "Univ X, Dept Y\nLab Z");
    }

    #[test]
    fn test_edit_then_lock() {
        let mut draft = FieldDraft::seed(FieldRole::Emails, &[]);
        draft.edit("x@y.com, , z@w.com".to_string()).unwrap();
        assert_eq!(draft.items(), strings(&["x@y.com", "z@w.com"]));

        draft.lock(draft.items());
        assert!(draft.is_locked());
        assert_eq!(draft.text(), "x@y.com, z@w.com");
        assert_eq!(draft.confirmed(), Some(&strings(&["x@y.com", "z@w.com"])[..]));

        assert!(matches!(
            draft.edit("other".to_string()),
            Err(MetadataError::FieldLocked(FieldRole::Emails))
        ));
        assert!(matches!(
            draft.remove_item(0),
            Err(MetadataError::FieldLocked(FieldRole::Emails))
        ));
        assert_eq!(draft.text(), "x@y.com, z@w.com");
    }

    #[test]
    fn test_remove_item() {
        let mut draft = FieldDraft::seed(FieldRole::Keywords, &strings(&["ocr", "layout", "vision"]));
        assert_eq!(draft.remove_item(1).unwrap(), strings(&["ocr", "vision"]));
        assert_eq!(draft.text(), "ocr, vision");

        match draft.remove_item(5) {
            Err(MetadataError::ItemOutOfRange { role, index, len }) => {
                assert_eq!((role, index, len), (FieldRole::Keywords, 5, 2));
            }
            other => panic!("expected ItemOutOfRange, got {other:?}"),
        }
        assert_eq!(draft.text(), "ocr, vision");
    }

    #[test]
    fn test_locked_affiliation_keeps_confirmed_items() {
        let mut draft = FieldDraft::seed(FieldRole::Affiliations, &[]);
        draft.lock(strings(&["Univ X, Dept Y"]));
        assert_eq!(draft.text(), "Univ X, Dept Y");
        assert_eq!(draft.items(), strings(&["Univ X, Dept Y"]));
    }
}
