use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub i64);

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        RowId(value)
    }
}

impl From<RowId> for i64 {
    fn from(value: RowId) -> Self {
        value.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single cell value. Records are duck-typed mappings in the UI sense, but
/// the engine keeps the two kinds explicit so sorting and CSV handling stay
/// exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(i64),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Canonical decimal string form, used by the filter stage and by CSV
    /// export. Numbers render without padding or sign decoration.
    pub fn as_display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(number) => number.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => write!(f, "{text}"),
            CellValue::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Column key -> value mapping for one row, without the system-assigned id.
/// Absent keys are permitted and render as empty cells.
pub type FieldMap = BTreeMap<String, CellValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RowId,
    pub fields: FieldMap,
}

impl Record {
    pub fn new(id: RowId, fields: FieldMap) -> Self {
        Self { id, fields }
    }

    /// String form of a field, empty when the record has no entry for `key`.
    pub fn field_text(&self, key: &str) -> String {
        self.fields
            .get(key)
            .map(CellValue::as_display)
            .unwrap_or_default()
    }

    /// Case-insensitive substring match against every field value.
    /// `needle` must already be lowercased by the caller.
    pub fn matches_term(&self, needle: &str) -> bool {
        self.fields
            .values()
            .any(|value| value.as_display().to_lowercase().contains(needle))
    }
}
