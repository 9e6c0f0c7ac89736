use serde::{Deserialize, Serialize};

/// The four columns every dataset starts with. Import requires a non-empty
/// value for each of them before a row is accepted.
pub const REQUIRED_KEYS: [&str; 4] = ["name", "email", "age", "role"];

/// The one column with numeric semantics; every other known field is a string.
pub const NUMERIC_KEY: &str = "age";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
    pub visible: bool,
}

/// Ordered column schema. Keys are stable lowercase identifiers, unique
/// within the schema and never renamed once created; insertion order drives
/// both table-header order and CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnSchema {
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// The default schema: Name, Email, Age, Role, all visible.
    pub fn with_defaults() -> Self {
        let mut schema = Self::empty();
        for label in ["Name", "Email", "Age", "Role"] {
            schema.add_column(label);
        }
        schema
    }

    /// Rebuilds a schema from persisted descriptors through the same
    /// validation as live edits: keys are lowercased, blank or duplicate
    /// keys are skipped. Hydrated state therefore satisfies the same
    /// invariants as user-entered state.
    pub fn from_descriptors(descriptors: Vec<ColumnDescriptor>) -> Self {
        let mut schema = Self::empty();
        for descriptor in descriptors {
            let key = normalize_key(&descriptor.key);
            if key.is_empty() || schema.contains_key(&key) {
                continue;
            }
            schema.columns.push(ColumnDescriptor {
                key,
                label: descriptor.label,
                visible: descriptor.visible,
            });
        }
        schema
    }

    /// Adds a column named `name`, keyed by its lowercase form, visible and
    /// last in order. Silent no-op when `name` is blank or the key already
    /// exists. Existing rows are not backfilled. Returns whether the schema
    /// changed so the caller can notify the persistence collaborator.
    pub fn add_column(&mut self, name: &str) -> bool {
        let key = normalize_key(name);
        if key.is_empty() || self.contains_key(&key) {
            return false;
        }
        self.columns.push(ColumnDescriptor {
            key,
            label: name.trim().to_string(),
            visible: true,
        });
        true
    }

    /// Flips the visibility flag for `key`. Silent no-op for unknown keys.
    /// Returns whether the schema changed.
    pub fn set_visibility(&mut self, key: &str, visible: bool) -> bool {
        match self.columns.iter_mut().find(|column| column.key == key) {
            Some(column) if column.visible != visible => {
                column.visible = visible;
                true
            }
            _ => false,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.columns.iter().any(|column| column.key == key)
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Visible descriptors in schema insertion order.
    pub fn visible_columns(&self) -> Vec<ColumnDescriptor> {
        self.columns
            .iter()
            .filter(|column| column.visible)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Column keys are the trimmed, lowercased form of the display name.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}
