use anyhow::{Context, Result};

use crate::domain::entities::record::Record;
use crate::domain::entities::schema::ColumnDescriptor;

/// Serializes the full dataset (insertion order, never the current
/// sorted/filtered view) restricted to `visible_columns`. The header row
/// carries the column *labels* in schema order; a row missing a field emits
/// an empty cell. Quoting follows RFC 4180 via the csv crate, so the output
/// feeds back into the import parser.
pub fn to_csv(records: &[Record], visible_columns: &[ColumnDescriptor]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(visible_columns.iter().map(|column| column.label.as_str()))
        .context("failed to write csv header")?;

    for record in records {
        let row: Vec<String> = visible_columns
            .iter()
            .map(|column| record.field_text(&column.key))
            .collect();
        writer
            .write_record(&row)
            .context("failed to write csv row")?;
    }

    let bytes = writer
        .into_inner()
        .context("failed to flush csv writer")?;
    String::from_utf8(bytes).context("csv output was not valid utf-8")
}
