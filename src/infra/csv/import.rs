use anyhow::{Context, Result};

use crate::domain::entities::record::{CellValue, FieldMap};
use crate::domain::entities::schema::{normalize_key, ColumnSchema, NUMERIC_KEY, REQUIRED_KEYS};

/// Outcome of parsing one CSV document, independent of the live store.
/// The caller decides whether to merge `accepted` into the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    pub accepted: Vec<FieldMap>,
    pub rejected: usize,
}

/// Parses header-delimited CSV text into candidate rows.
///
/// Headers are normalized to lowercase column keys, which makes exported
/// files (whose header carries display labels) readable again. A row is
/// accepted only when all four required fields are non-empty and `age`
/// parses as an integer; otherwise it counts as rejected. Extra columns that
/// match a schema key are carried through, columns unknown to the schema are
/// dropped — import never grows the schema.
pub fn parse_csv(text: &str, schema: &ColumnSchema) -> Result<ParsedCsv> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .context("failed to read headers from csv")?
        .clone();
    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }
    let keys: Vec<String> = headers.iter().map(normalize_key).collect();

    let mut accepted = Vec::new();
    let mut rejected = 0_usize;

    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        match build_row(&keys, &record, schema) {
            Some(fields) => accepted.push(fields),
            None => rejected += 1,
        }
    }

    Ok(ParsedCsv { accepted, rejected })
}

fn build_row(keys: &[String], record: &csv::StringRecord, schema: &ColumnSchema) -> Option<FieldMap> {
    let value_of = |wanted: &str| -> &str {
        keys.iter()
            .position(|key| key == wanted)
            .and_then(|idx| record.get(idx))
            .unwrap_or("")
            .trim()
    };

    for required in REQUIRED_KEYS {
        if value_of(required).is_empty() {
            return None;
        }
    }
    let age: i64 = value_of(NUMERIC_KEY).parse().ok()?;

    let mut fields = FieldMap::new();
    for (idx, key) in keys.iter().enumerate() {
        if !schema.contains_key(key) {
            continue;
        }
        let value = record.get(idx).unwrap_or("").trim();
        if value.is_empty() {
            continue;
        }
        let cell = if key == NUMERIC_KEY {
            CellValue::Number(age)
        } else {
            CellValue::text(value)
        };
        fields.insert(key.clone(), cell);
    }
    Some(fields)
}
