use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

mod app;
mod domain;
mod infra;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use crate::app::App;

/// Fixed page size of the table view.
pub const PAGE_SIZE: usize = 10;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Data Table Manager"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "tableman")
        .context("failed to resolve project data directory")?;
    let dir = dirs.data_dir().join("webview");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create webview data dir: {}", dir.display()))?;
    Ok(dir)
}
