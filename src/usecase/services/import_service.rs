use tracing::{info, warn};

use crate::domain::entities::record::RowId;
use crate::domain::entities::schema::ColumnSchema;
use crate::domain::error::TableError;
use crate::domain::store::RowStore;
use crate::infra::csv::import::parse_csv;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub ids: Vec<RowId>,
    pub accepted: usize,
    pub rejected: usize,
}

/// Parses `text` and appends every accepted row to the store in file order.
/// The parse runs to completion before the store is touched, so a malformed
/// file never partially mutates the dataset. Zero accepted rows surface as
/// `InvalidFormat` and leave the store unchanged; individually rejected rows
/// are merely excluded from the batch.
pub fn import_csv(
    store: &mut RowStore,
    schema: &ColumnSchema,
    text: &str,
) -> Result<ImportOutcome, TableError> {
    let parsed = parse_csv(text, schema).map_err(|err| {
        warn!("csv parse failed: {err:#}");
        TableError::InvalidFormat
    })?;

    if parsed.accepted.is_empty() {
        return Err(TableError::InvalidFormat);
    }

    let accepted = parsed.accepted.len();
    let rejected = parsed.rejected;
    let ids = store.add_batch(parsed.accepted);
    info!(accepted, rejected, "imported csv batch");

    Ok(ImportOutcome {
        ids,
        accepted,
        rejected,
    })
}
