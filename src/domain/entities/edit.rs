use std::collections::BTreeMap;

use crate::domain::entities::record::{Record, RowId};

/// Working copy of one row's fields while it is being edited. Values are
/// kept as raw strings until commit, which is where validation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub row_id: RowId,
    pub fields: BTreeMap<String, String>,
}

/// Transient single-row edit state: `Idle` or `Editing(row_id, draft)`.
/// At most one row is editable system-wide; the stored row is untouched
/// until an explicit commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    active: Option<EditDraft>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing `row`, initializing the draft from its fields.
    /// Starting a new edit while another is active implicitly cancels the
    /// prior one.
    pub fn begin(&mut self, row: &Record) {
        let fields = row
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), value.as_display()))
            .collect();
        self.active = Some(EditDraft {
            row_id: row.id,
            fields,
        });
    }

    /// Updates one draft field. Silent no-op while `Idle`.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
        if let Some(draft) = self.active.as_mut() {
            draft.fields.insert(key.to_string(), value.into());
        }
    }

    /// Discards the draft unconditionally; the row store is untouched.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&EditDraft> {
        self.active.as_ref()
    }

    pub fn editing_id(&self) -> Option<RowId> {
        self.active.as_ref().map(|draft| draft.row_id)
    }

    /// Used by the commit path once validation and the store update have
    /// both succeeded.
    pub(crate) fn finish(&mut self) -> Option<EditDraft> {
        self.active.take()
    }
}
