use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::domain::entities::schema::ColumnSchema;
use crate::infra::sqlite::schema::init_db;
use crate::infra::sqlite::settings::{
    load_columns, load_setting, save_columns, save_setting, THEME_KEY,
};
use crate::usecase::ports::settings::{SettingsError, SettingsStore};

/// Sqlite-backed key/value implementation of the settings port.
pub struct SqliteSettings {
    pub db_path: PathBuf,
}

impl SettingsStore for SqliteSettings {
    fn init(&self) -> Result<(), SettingsError> {
        init_db(&self.db_path).map_err(|err| SettingsError::Message(err.to_string()))
    }

    fn load_columns(&self) -> Result<Option<ColumnSchema>, SettingsError> {
        load_columns(&self.db_path).map_err(|err| SettingsError::Message(err.to_string()))
    }

    fn save_columns(&self, schema: &ColumnSchema) -> Result<(), SettingsError> {
        save_columns(&self.db_path, schema)
            .map_err(|err| SettingsError::Message(err.to_string()))
    }

    fn load_theme(&self) -> Result<Option<String>, SettingsError> {
        load_setting(&self.db_path, THEME_KEY)
            .map_err(|err| SettingsError::Message(err.to_string()))
    }

    fn save_theme(&self, mode: &str) -> Result<(), SettingsError> {
        save_setting(&self.db_path, THEME_KEY, mode)
            .map_err(|err| SettingsError::Message(err.to_string()))
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "tableman")
        .context("failed to resolve project data directory")?;
    Ok(dirs.data_dir().join("settings.sqlite"))
}
