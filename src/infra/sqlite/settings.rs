use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::domain::entities::schema::{ColumnDescriptor, ColumnSchema};
use crate::infra::sqlite::schema::open_connection;

pub const COLUMNS_KEY: &str = "columns";
pub const THEME_KEY: &str = "theme";

pub fn save_setting(db_path: &Path, key: &str, value: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO setting(key, value)
         VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )
    .with_context(|| format!("failed to upsert setting {key:?}"))?;
    Ok(())
}

pub fn load_setting(db_path: &Path, key: &str) -> Result<Option<String>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT value FROM setting WHERE key = ?1",
        params![key],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .with_context(|| format!("failed to load setting {key:?}"))
}

/// Schema is persisted as a JSON array of column descriptors; the descriptor
/// order in the array is the schema order.
pub fn save_columns(db_path: &Path, schema: &ColumnSchema) -> Result<()> {
    let payload =
        serde_json::to_string(schema.columns()).context("failed to serialize column schema")?;
    save_setting(db_path, COLUMNS_KEY, &payload)
}

pub fn load_columns(db_path: &Path) -> Result<Option<ColumnSchema>> {
    let Some(payload) = load_setting(db_path, COLUMNS_KEY)? else {
        return Ok(None);
    };
    let descriptors: Vec<ColumnDescriptor> =
        serde_json::from_str(&payload).context("failed to deserialize column schema")?;
    Ok(Some(ColumnSchema::from_descriptors(descriptors)))
}
