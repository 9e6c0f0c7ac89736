use tracing::{debug, warn};

use crate::domain::entities::edit::EditSession;
use crate::domain::entities::record::{CellValue, FieldMap, RowId};
use crate::domain::entities::schema::NUMERIC_KEY;
use crate::domain::error::TableError;
use crate::domain::store::RowStore;

/// Validates the active draft and applies it to the store.
///
/// - A non-numeric `age` fails with `Validation`; the session stays in
///   `Editing` so the user can fix the value.
/// - A row deleted while the edit was open fails with `NotFound`; the
///   session also stays in `Editing` and the caller is expected to force
///   `cancel()`.
/// - On success the draft is merged via `RowStore::update` and the session
///   returns to `Idle`.
pub fn commit(session: &mut EditSession, store: &mut RowStore) -> Result<RowId, TableError> {
    let draft = session
        .active()
        .ok_or_else(|| TableError::Validation("no edit in progress".to_string()))?;

    let patch = draft_to_patch(&draft.fields)?;
    let row_id = draft.row_id;

    if let Err(err) = store.update(row_id, patch) {
        warn!(id = row_id.0, "commit failed: {err}");
        return Err(err);
    }

    session.finish();
    debug!(id = row_id.0, "committed row edit");
    Ok(row_id)
}

/// Converts the string draft into typed field values, rejecting a
/// non-numeric `age` before anything touches the store.
fn draft_to_patch(
    fields: &std::collections::BTreeMap<String, String>,
) -> Result<FieldMap, TableError> {
    let mut patch = FieldMap::new();
    for (key, value) in fields {
        let cell = if key == NUMERIC_KEY {
            let age: i64 = value
                .trim()
                .parse()
                .map_err(|_| TableError::Validation(format!("age must be a number, got {value:?}")))?;
            CellValue::Number(age)
        } else {
            CellValue::text(value.clone())
        };
        patch.insert(key.clone(), cell);
    }
    Ok(patch)
}

/// Removes a row. Idempotent by design: deleting an id that is already gone
/// is not an error. The confirmation gate lives in the UI, not here.
pub fn delete_row(store: &mut RowStore, id: RowId) {
    store.delete(id);
    debug!(id = id.0, "deleted row");
}
