use crate::domain::entities::schema::ColumnSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    Message(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Persistence collaborator for state that survives a restart: the column
/// schema and the theme mode. The engine only announces "schema changed" /
/// "theme changed"; how the values are stored is entirely this port's
/// concern. Hydrated schemas must be re-applied through
/// `ColumnSchema::from_descriptors` so they satisfy the same invariants as
/// live edits.
pub trait SettingsStore: Send + Sync {
    fn init(&self) -> Result<(), SettingsError>;

    fn load_columns(&self) -> Result<Option<ColumnSchema>, SettingsError>;
    fn save_columns(&self, schema: &ColumnSchema) -> Result<(), SettingsError>;

    fn load_theme(&self) -> Result<Option<String>, SettingsError>;
    fn save_theme(&self, mode: &str) -> Result<(), SettingsError>;
}
