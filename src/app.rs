use std::sync::Arc;

use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::warn;

use crate::domain::entities::schema::{ColumnDescriptor, NUMERIC_KEY};
use crate::domain::entities::view::{PageSpec, SortDirection};
use crate::domain::error::TableError;
use crate::infra::csv::export::to_csv;
use crate::infra::sqlite::repo::{default_db_path, SqliteSettings};
use crate::ui::state::app_state::{AppState, THEME_DARK, THEME_LIGHT};
use crate::usecase::ports::settings::SettingsStore;
use crate::usecase::services::{edit_service, import_service, query_service};
use crate::PAGE_SIZE;

#[component]
fn ColumnsModal(
    columns: Vec<ColumnDescriptor>,
    mut new_column_name: Signal<String>,
    on_add: EventHandler<String>,
    on_toggle: EventHandler<(String, bool)>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1100;",
            onclick: move |_| on_close.call(()),
            div {
                style: "background: #fff; color: #111827; padding: 16px; border-radius: 8px; min-width: 320px; box-shadow: 0 10px 24px rgba(0,0,0,0.25);",
                onclick: move |event| event.stop_propagation(),
                div { style: "margin-bottom: 12px; font-weight: 600;", "Manage Columns" }
                div { style: "display: flex; gap: 8px; margin-bottom: 12px;",
                    input {
                        style: "flex: 1; padding: 6px;",
                        placeholder: "New column name",
                        value: new_column_name(),
                        oninput: move |event| new_column_name.set(event.value()),
                    }
                    button {
                        onclick: move |_| on_add.call(new_column_name()),
                        "Add Column"
                    }
                }
                {columns.iter().map(|column| {
                    let key = column.key.clone();
                    let toggle_key = column.key.clone();
                    let label = column.label.clone();
                    let checked = column.visible;
                    rsx!(
                        label {
                            key: "{key}",
                            style: "display: flex; align-items: center; gap: 8px; padding: 4px 0; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: move |_| on_toggle.call((toggle_key.clone(), !checked)),
                            }
                            span { "{label}" }
                        }
                    )
                })}
                div { style: "display: flex; justify-content: flex-end; margin-top: 12px;",
                    button { onclick: move |_| on_close.call(()), "Close" }
                }
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let db_path = match default_db_path() {
        Ok(path) => path,
        Err(err) => {
            return rsx! {
                div {
                    p { "Failed to resolve the settings path: {err}" }
                }
            };
        }
    };

    let AppState {
        mut store,
        mut schema,
        mut session,
        mut search,
        mut page,
        mut sort,
        mut theme,
        mut show_columns_modal,
        mut new_column_name,
        mut busy,
        mut status,
    } = AppState::new();

    let settings = Arc::new(SqliteSettings { db_path });
    let settings_for_init = settings.clone();
    let settings_for_theme = settings.clone();
    let settings_for_column_add = settings.clone();
    let settings_for_column_toggle = settings.clone();

    // Hydrate persisted column settings and theme. The saved schema goes
    // through the same validated constructor as live edits.
    use_effect(move || {
        let hydrated = settings_for_init
            .init()
            .and_then(|_| settings_for_init.load_columns());
        match hydrated {
            Ok(Some(saved)) => {
                schema.set(saved);
                *status.write() = "Restored saved column settings".to_string();
            }
            Ok(None) => {}
            Err(err) => {
                *status.write() = format!("Failed to load saved columns: {err}");
            }
        }
        match settings_for_init.load_theme() {
            Ok(Some(mode)) => theme.set(mode),
            Ok(None) => {}
            Err(err) => {
                *status.write() = format!("Failed to load saved theme: {err}");
            }
        }
    });

    // The view is re-derived on every render; no cached state to invalidate.
    let current_schema = schema();
    let visible_columns = current_schema.visible_columns();
    let sort_snapshot = sort();
    let page_spec = PageSpec {
        index: page(),
        size: PAGE_SIZE,
    };
    let search_snapshot = search();
    let store_snapshot = store();
    let view_result = query_service::view(
        store_snapshot.snapshot(),
        &search_snapshot,
        &sort_snapshot,
        &page_spec,
    );
    let total_count = view_result.total_count;
    let page_count = total_count.div_ceil(PAGE_SIZE).max(1);
    let page_display = page() + 1;
    let session_snapshot = session();
    let editing_id = session_snapshot.editing_id();

    let dark = theme() == THEME_DARK;
    let (bg, fg, card_bg, header_bg, border) = if dark {
        ("#111827", "#f9fafb", "#1f2937", "#374151", "#4b5563")
    } else {
        ("#f3f4f6", "#111827", "#ffffff", "#e5e7eb", "#d1d5db")
    };

    rsx! {
        div {
            style: "min-height: 100vh; background: {bg}; color: {fg}; font-family: sans-serif; padding: 24px;",

            div {
                style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                h1 { style: "margin: 0; font-size: 24px;", "Data Table Manager" }
                label {
                    style: "display: flex; align-items: center; gap: 8px; cursor: pointer;",
                    input {
                        r#type: "checkbox",
                        checked: dark,
                        onclick: move |_| {
                            let next = if theme() == THEME_DARK { THEME_LIGHT } else { THEME_DARK };
                            theme.set(next.to_string());
                            if let Err(err) = settings_for_theme.save_theme(next) {
                                warn!("failed to persist theme: {err}");
                                *status.write() = format!("Failed to save theme: {err}");
                            }
                        },
                    }
                    span { "Dark Mode" }
                }
            }

            div {
                style: "display: flex; gap: 8px; margin-bottom: 16px; flex-wrap: wrap;",
                input {
                    style: "flex: 1; min-width: 200px; padding: 8px; background: {card_bg}; color: {fg}; border: 1px solid {border}; border-radius: 6px;",
                    placeholder: "Search",
                    value: search(),
                    oninput: move |event| {
                        search.set(event.value());
                        page.set(0);
                    },
                }
                button {
                    disabled: busy(),
                    onclick: move |_| show_columns_modal.set(true),
                    "Manage Columns"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file()
                        else {
                            *status.write() = "Import cancelled".to_string();
                            return;
                        };
                        *busy.write() = true;
                        let text = match std::fs::read_to_string(&path) {
                            Ok(text) => text,
                            Err(err) => {
                                *status.write() = format!("Failed to read {}: {err}", path.display());
                                *busy.write() = false;
                                return;
                            }
                        };
                        let result = {
                            let schema_snapshot = schema();
                            import_service::import_csv(&mut store.write(), &schema_snapshot, &text)
                        };
                        match result {
                            Ok(outcome) => {
                                page.set(0);
                                *status.write() = format!(
                                    "Imported {} rows ({} rejected)",
                                    outcome.accepted, outcome.rejected
                                );
                            }
                            Err(err) => {
                                *status.write() = format!("Import failed: {err}");
                            }
                        }
                        *busy.write() = false;
                    },
                    "Import CSV"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let Some(path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_file_name("table-data.csv")
                            .save_file()
                        else {
                            *status.write() = "Export cancelled".to_string();
                            return;
                        };
                        let serialized = {
                            let store_ref = store.read();
                            let visible = schema.read().visible_columns();
                            to_csv(store_ref.snapshot(), &visible)
                        };
                        match serialized.and_then(|text| {
                            std::fs::write(&path, text).map_err(anyhow::Error::from)
                        }) {
                            Ok(()) => {
                                *status.write() = format!("Exported to {}", path.display());
                            }
                            Err(err) => {
                                *status.write() = format!("Export failed: {err}");
                            }
                        }
                    },
                    "Export CSV"
                }
            }

            div {
                style: "background: {card_bg}; border: 1px solid {border}; border-radius: 8px; overflow: hidden;",
                table {
                    style: "border-collapse: collapse; width: 100%;",
                    thead {
                        tr {
                            style: "background: {header_bg}; text-align: left;",
                            {visible_columns.iter().map(|column| {
                                let key = column.key.clone();
                                let sort_key = column.key.clone();
                                let arrow = if sort_snapshot.key.as_deref() == Some(key.as_str()) {
                                    match sort_snapshot.direction {
                                        SortDirection::Asc => " \u{2191}",
                                        SortDirection::Desc => " \u{2193}",
                                    }
                                } else {
                                    ""
                                };
                                let label = column.label.clone();
                                rsx!(
                                    th {
                                        key: "{key}",
                                        style: "padding: 10px 8px; cursor: pointer; font-weight: 600;",
                                        onclick: move |_| sort.write().toggle(&sort_key),
                                        "{label}{arrow}"
                                    }
                                )
                            })}
                            th { style: "padding: 10px 8px; font-weight: 600;", "Actions" }
                        }
                    }
                    tbody {
                        {view_result.rows.iter().map(|row| {
                            let row_id = row.id;
                            let is_editing = editing_id == Some(row_id);
                            rsx!(
                                tr {
                                    key: "{row_id}",
                                    style: "border-top: 1px solid {border};",
                                    ondoubleclick: move |_| {
                                        let record = store.read().get(row_id).cloned();
                                        if let Some(record) = record {
                                            session.write().begin(&record);
                                        }
                                    },
                                    {visible_columns.iter().map(|column| {
                                        let key = column.key.clone();
                                        let cell_text = row.field_text(&key);
                                        if is_editing {
                                            let draft_value = session_snapshot
                                                .active()
                                                .and_then(|draft| draft.fields.get(&key).cloned())
                                                .unwrap_or_default();
                                            let input_type =
                                                if key == NUMERIC_KEY { "number" } else { "text" };
                                            let input_key = key.clone();
                                            rsx!(
                                                td {
                                                    key: "{key}",
                                                    style: "padding: 8px;",
                                                    input {
                                                        r#type: input_type,
                                                        style: "width: 100%; padding: 4px;",
                                                        value: draft_value,
                                                        oninput: move |event| {
                                                            session.write().set_field(&input_key, event.value());
                                                        },
                                                    }
                                                }
                                            )
                                        } else {
                                            rsx!(
                                                td {
                                                    key: "{key}",
                                                    style: "padding: 8px;",
                                                    "{cell_text}"
                                                }
                                            )
                                        }
                                    })}
                                    td {
                                        style: "padding: 8px; white-space: nowrap;",
                                        if is_editing {
                                            button {
                                                onclick: move |_| {
                                                    let result = {
                                                        let mut active_session = session.write();
                                                        let mut active_store = store.write();
                                                        edit_service::commit(
                                                            &mut active_session,
                                                            &mut active_store,
                                                        )
                                                    };
                                                    match result {
                                                        Ok(id) => {
                                                            *status.write() = format!("Saved row #{id}");
                                                        }
                                                        Err(TableError::NotFound(id)) => {
                                                            session.write().cancel();
                                                            *status.write() = format!(
                                                                "Row #{id} no longer exists; edit discarded"
                                                            );
                                                        }
                                                        Err(err) => {
                                                            *status.write() = format!("{err}");
                                                        }
                                                    }
                                                },
                                                "Save"
                                            }
                                            button {
                                                style: "margin-left: 8px;",
                                                onclick: move |_| {
                                                    session.write().cancel();
                                                    *status.write() = "Edit cancelled".to_string();
                                                },
                                                "Cancel"
                                            }
                                        } else {
                                            button {
                                                onclick: move |_| {
                                                    let confirm = MessageDialog::new()
                                                        .set_level(MessageLevel::Warning)
                                                        .set_title("Delete row")
                                                        .set_description(
                                                            "Are you sure you want to delete this row?",
                                                        )
                                                        .set_buttons(MessageButtons::YesNo)
                                                        .show();
                                                    if confirm != MessageDialogResult::Yes {
                                                        return;
                                                    }
                                                    let was_editing =
                                                        session.read().editing_id() == Some(row_id);
                                                    edit_service::delete_row(&mut store.write(), row_id);
                                                    if was_editing {
                                                        session.write().cancel();
                                                    }
                                                    *status.write() = format!("Deleted row #{row_id}");
                                                },
                                                "Delete"
                                            }
                                        }
                                    }
                                }
                            )
                        })}
                    }
                }
            }

            div {
                style: "display: flex; justify-content: space-between; align-items: center; margin-top: 12px;",
                span { "{total_count} rows" }
                div {
                    style: "display: flex; gap: 8px; align-items: center;",
                    button {
                        disabled: page() == 0,
                        onclick: move |_| {
                            let current = page();
                            if current > 0 {
                                page.set(current - 1);
                            }
                        },
                        "Previous"
                    }
                    span { "Page {page_display} of {page_count}" }
                    button {
                        disabled: (page() + 1) * PAGE_SIZE >= total_count,
                        onclick: move |_| page.set(page() + 1),
                        "Next"
                    }
                }
            }

            div {
                style: "margin-top: 12px; font-size: 13px; opacity: 0.8;",
                "{status}"
            }

            if show_columns_modal() {
                ColumnsModal {
                    columns: current_schema.columns().to_vec(),
                    new_column_name,
                    on_add: move |name: String| {
                        let added = schema.write().add_column(&name);
                        if !added {
                            *status.write() =
                                "Column name is empty or already exists".to_string();
                            return;
                        }
                        new_column_name.set(String::new());
                        if let Err(err) = settings_for_column_add.save_columns(&schema.read()) {
                            warn!("failed to persist column schema: {err}");
                            *status.write() = format!("Failed to save column settings: {err}");
                        } else {
                            *status.write() = format!("Added column {}", name.trim());
                        }
                    },
                    on_toggle: move |(key, visible): (String, bool)| {
                        if schema.write().set_visibility(&key, visible) {
                            if let Err(err) =
                                settings_for_column_toggle.save_columns(&schema.read())
                            {
                                warn!("failed to persist column schema: {err}");
                                *status.write() = format!("Failed to save column settings: {err}");
                            }
                        }
                    },
                    on_close: move |_| show_columns_modal.set(false),
                }
            }
        }
    }
}
