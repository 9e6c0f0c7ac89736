use std::cmp::Ordering;

use crate::domain::entities::record::{CellValue, Record};
use crate::domain::entities::view::{PageSpec, SortDirection, SortSpec, ViewResult};

/// Derives the rows to display from a snapshot of the row store. Pure: the
/// caller re-runs it on every render instead of caching, so there is no
/// invalidation to get wrong. Stages run in a fixed order: sort, then
/// filter, then paginate.
pub fn view(records: &[Record], search: &str, sort: &SortSpec, page: &PageSpec) -> ViewResult {
    let mut rows: Vec<Record> = records.to_vec();

    if let Some(key) = sort.key.as_deref() {
        // Vec::sort_by is stable, so ties keep their pre-sort relative
        // order in both directions.
        rows.sort_by(|a, b| {
            let ordering = compare_cells(a.fields.get(key), b.fields.get(key));
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let needle = search.to_lowercase();
    if !needle.is_empty() {
        rows.retain(|record| record.matches_term(&needle));
    }
    let total_count = rows.len();

    let start = (page.index * page.size).min(total_count);
    let end = (start + page.size).min(total_count);
    let rows = rows[start..end].to_vec();

    ViewResult { rows, total_count }
}

/// Natural ordering per value kind: numeric for numbers, lexicographic for
/// strings. Mixed or missing values fall back to comparing the canonical
/// string form, with absent fields reading as empty.
fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (a, b) {
        (Some(CellValue::Number(x)), Some(CellValue::Number(y))) => x.cmp(y),
        (Some(CellValue::Text(x)), Some(CellValue::Text(y))) => x.cmp(y),
        (a, b) => {
            let x = a.map(CellValue::as_display).unwrap_or_default();
            let y = b.map(CellValue::as_display).unwrap_or_default();
            x.cmp(&y)
        }
    }
}
