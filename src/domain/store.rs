use tracing::debug;

use crate::domain::entities::record::{CellValue, FieldMap, Record, RowId};
use crate::domain::error::TableError;

/// Owner of the dataset: an ordered sequence of records plus the id counter.
/// Insertion order is the canonical order; sorting happens in the view
/// pipeline and never reorders this collection. All other components read
/// snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowStore {
    records: Vec<Record>,
    next_id: i64,
}

impl RowStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// The dataset every fresh session starts with.
    pub fn with_seed_data() -> Self {
        let mut store = Self::new();
        store.add_batch(vec![
            seed_row("John Doe", "john@example.com", 30, "Developer"),
            seed_row("Jane Smith", "jane@example.com", 25, "Designer"),
            seed_row("Bob Johnson", "bob@example.com", 40, "Manager"),
        ]);
        store
    }

    /// Appends `batch` in input order, assigning each row a fresh id. Ids
    /// come from a never-decreasing counter, so they are strictly monotonic
    /// and never reused after deletion. Rows may carry extra or missing
    /// dynamic-column fields; unknown keys are not rejected here.
    pub fn add_batch(&mut self, batch: Vec<FieldMap>) -> Vec<RowId> {
        let mut assigned = Vec::with_capacity(batch.len());
        for fields in batch {
            let id = RowId(self.next_id);
            self.next_id += 1;
            self.records.push(Record::new(id, fields));
            assigned.push(id);
        }
        debug!(count = assigned.len(), "added batch of rows");
        assigned
    }

    /// Merges `patch` into the record with `id` (shallow field-level
    /// overwrite; fields absent from the patch are preserved). The caller is
    /// responsible for having validated field values such as a numeric
    /// `age`; the store does not re-validate types.
    pub fn update(&mut self, id: RowId, patch: FieldMap) -> Result<(), TableError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(TableError::NotFound(id.0))?;
        for (key, value) in patch {
            record.fields.insert(key, value);
        }
        Ok(())
    }

    /// Removes the record with `id` if present. Idempotent: deleting an
    /// absent id is a no-op, not an error.
    pub fn delete(&mut self, id: RowId) {
        self.records.retain(|record| record.id != id);
    }

    pub fn get(&self, id: RowId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Immutable view of the records in insertion order, for the view
    /// pipeline and for CSV export.
    pub fn snapshot(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn seed_row(name: &str, email: &str, age: i64, role: &str) -> FieldMap {
    FieldMap::from([
        ("name".to_string(), CellValue::text(name)),
        ("email".to_string(), CellValue::text(email)),
        ("age".to_string(), CellValue::Number(age)),
        ("role".to_string(), CellValue::text(role)),
    ])
}
