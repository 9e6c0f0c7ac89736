use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::edit::EditSession;
use crate::domain::entities::schema::ColumnSchema;
use crate::domain::entities::view::SortSpec;
use crate::domain::store::RowStore;

pub const THEME_LIGHT: &str = "light";
pub const THEME_DARK: &str = "dark";

/// All signal-backed UI state. The engine state (store, schema, session) is
/// owned here and handed to the services by reference; nothing in the
/// engine reaches for a global.
pub struct AppState {
    pub store: Signal<RowStore>,
    pub schema: Signal<ColumnSchema>,
    pub session: Signal<EditSession>,
    pub search: Signal<String>,
    pub page: Signal<usize>,
    pub sort: Signal<SortSpec>,
    pub theme: Signal<String>,
    pub show_columns_modal: Signal<bool>,
    pub new_column_name: Signal<String>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: use_signal(RowStore::with_seed_data),
            schema: use_signal(ColumnSchema::with_defaults),
            session: use_signal(EditSession::new),
            search: use_signal(String::new),
            page: use_signal(|| 0_usize),
            sort: use_signal(SortSpec::unsorted),
            theme: use_signal(|| THEME_LIGHT.to_string()),
            show_columns_modal: use_signal(|| false),
            new_column_name: use_signal(String::new),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
