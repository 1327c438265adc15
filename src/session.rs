//! Editing sessions and the confirm/lock workflow.
//!
//! An [`EditorSession`] owns the canonical document of one editing session. The
//! governed fields (authors, emails, affiliations, keywords) each get a
//! [`FieldDraft`] that the user rewrites until saving it, which locks the field for
//! the rest of the session. Title and abstract are shown but not edited.
//!
//! # Workflow
//!
//! ```text
//! open(payload) ──► Editable ──save──► Locked
//!                    │    ▲
//!      set_draft /   └────┘
//!      remove_item
//! ```
//!
//! The export is offered only once every governed field is locked.
//!
//! # Example
//!
//! ```
//! use docmeta::{EditorSession, FieldRole};
//!
//! let mut session = EditorSession::open(r#"{"EMAILS": "a@b.com"}"#);
//! session.set_draft(FieldRole::Emails, "x@y.com, , z@w.com").unwrap();
//! let confirmed = session.save(FieldRole::Emails).unwrap();
//! assert_eq!(confirmed, ["x@y.com", "z@w.com"]);
//!
//! assert!(!session.all_locked());
//! assert!(session.export().is_err());
//! ```

mod draft;

pub use draft::{DraftState, FieldDraft};

use crate::export::ExportReport;
use crate::payload::{self, RawPayload};
use crate::reconcile::reconcile_items;
use crate::resolve::FieldResolver;
use crate::{FieldRole, MetadataDocument, MetadataError, Result};
use log::{debug, info};
use nanoid::nanoid;
use std::sync::Arc;

/// One editing session over a single payload.
///
/// The canonical document is only ever replaced as a whole, by the save and
/// item-removal operations. Snapshots returned by [`EditorSession::preview`]
/// therefore always show either the state before or after an update.
#[derive(Debug, Clone)]
pub struct EditorSession {
    id: String,
    document: Arc<MetadataDocument>,
    drafts: Vec<FieldDraft>,
}

impl EditorSession {
    /// Opens a session on an upstream payload, using the default resolver.
    ///
    /// Unreadable payloads open an empty session.
    pub fn open<P: Into<RawPayload>>(raw: P) -> Self {
        Self::from_document(MetadataDocument::from(payload::parse(raw)))
    }

    /// Opens a session on an upstream payload with a custom resolver.
    pub fn open_with<P: Into<RawPayload>>(raw: P, resolver: &FieldResolver) -> Self {
        Self::from_document(resolver.resolve(payload::parse(raw)))
    }

    /// Opens a session on an already resolved document.
    pub fn from_document(document: MetadataDocument) -> Self {
        let drafts = FieldRole::GOVERNED
            .iter()
            .map(|role| FieldDraft::seed(*role, document.metadata.get(*role).unwrap_or_default()))
            .collect();

        let session = Self {
            id: nanoid!(),
            document: Arc::new(document),
            drafts,
        };
        debug!("opened editing session {}", session.id);
        session
    }

    /// Random identifier of this session, used in log messages.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// A read-only snapshot of the current canonical document.
    pub fn preview(&self) -> Arc<MetadataDocument> {
        Arc::clone(&self.document)
    }

    /// The drafts of all governed fields, in display order.
    pub fn drafts(&self) -> &[FieldDraft] {
        &self.drafts
    }

    /// The draft of one governed field.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::NotEditable`] for title, abstract, and content.
    pub fn draft(&self, role: FieldRole) -> Result<&FieldDraft> {
        self.drafts
            .iter()
            .find(|draft| draft.role() == role)
            .ok_or(MetadataError::NotEditable(role))
    }

    fn draft_mut(&mut self, role: FieldRole) -> Result<&mut FieldDraft> {
        self.drafts
            .iter_mut()
            .find(|draft| draft.role() == role)
            .ok_or(MetadataError::NotEditable(role))
    }

    /// Replaces the draft text of an editable field.
    ///
    /// The canonical document is left untouched until the field is saved.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::FieldLocked`] once the field has been saved, and
    /// [`MetadataError::NotEditable`] for roles outside the workflow.
    pub fn set_draft(&mut self, role: FieldRole, text: impl Into<String>) -> Result<()> {
        self.draft_mut(role)?.edit(text.into())
    }

    /// Removes one item from an editable list field, as when a chip is dismissed.
    ///
    /// The draft is re-rendered from the remaining items and the document is
    /// updated with them right away. The field stays editable. Because the
    /// remaining items come from the current draft, unsaved text set through
    /// [`EditorSession::set_draft`] reaches the preview with them.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::ItemOutOfRange`] for an invalid index, plus the
    /// errors of [`EditorSession::set_draft`].
    pub fn remove_item(&mut self, role: FieldRole, index: usize) -> Result<()> {
        let remaining = self.draft_mut(role)?.remove_item(index)?;
        self.document = Arc::new(reconcile_items(&self.document, role, remaining)?);
        debug!("session {}: removed item {index} from {role}", self.id);
        Ok(())
    }

    /// Confirms a field: the draft is normalized, written into the document, and
    /// locked for the rest of the session. Any text is accepted, including an empty
    /// draft.
    ///
    /// Returns the confirmed value.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::FieldLocked`] if the field was already saved, and
    /// [`MetadataError::NotEditable`] for roles outside the workflow.
    pub fn save(&mut self, role: FieldRole) -> Result<&[String]> {
        let draft = self.draft(role)?;
        draft.ensure_editable()?;
        let items = draft.items();

        self.document = Arc::new(reconcile_items(&self.document, role, items.clone())?);
        info!(
            "session {}: confirmed {role} with {} item(s)",
            self.id,
            items.len()
        );

        let draft = self.draft_mut(role)?;
        draft.lock(items);
        Ok(draft.confirmed().unwrap_or_default())
    }

    /// Returns `true` once every governed field is locked.
    pub fn all_locked(&self) -> bool {
        self.drafts.iter().all(FieldDraft::is_locked)
    }

    /// The governed fields still waiting to be confirmed.
    pub fn pending_roles(&self) -> Vec<FieldRole> {
        self.drafts
            .iter()
            .filter(|draft| !draft.is_locked())
            .map(FieldDraft::role)
            .collect()
    }

    /// Builds the export report of the confirmed document.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::ExportNotReady`] while any governed field is still
    /// editable.
    pub fn export(&self) -> Result<ExportReport> {
        let pending = self.pending_roles();
        if !pending.is_empty() {
            return Err(MetadataError::ExportNotReady { pending });
        }
        info!("session {}: exporting confirmed metadata", self.id);
        Ok(ExportReport::from(self.document.as_ref()))
    }
}
