use std::path::PathBuf;

use crate::domain::entities::edit::EditSession;
use crate::domain::entities::record::{CellValue, FieldMap, RowId};
use crate::domain::entities::schema::{ColumnDescriptor, ColumnSchema};
use crate::domain::entities::view::{PageSpec, SortDirection, SortSpec};
use crate::domain::error::TableError;
use crate::domain::store::RowStore;
use crate::infra::csv::export::to_csv;
use crate::infra::csv::import::parse_csv;
use crate::infra::sqlite::schema::init_db;
use crate::infra::sqlite::settings::{
    load_columns, load_setting, save_columns, save_setting, THEME_KEY,
};
use crate::usecase::services::{edit_service, import_service, query_service};

fn person(name: &str, email: &str, age: i64, role: &str) -> FieldMap {
    FieldMap::from([
        ("name".to_string(), CellValue::text(name)),
        ("email".to_string(), CellValue::text(email)),
        ("age".to_string(), CellValue::Number(age)),
        ("role".to_string(), CellValue::text(role)),
    ])
}

fn store_with(rows: Vec<FieldMap>) -> RowStore {
    let mut store = RowStore::new();
    store.add_batch(rows);
    store
}

fn sort_by(key: &str, direction: SortDirection) -> SortSpec {
    SortSpec {
        key: Some(key.to_string()),
        direction,
    }
}

fn temp_db(prefix: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir()
        .join(format!("tableman-{prefix}-{nanos}"))
        .join("settings.sqlite")
}

// ---------------------------------------------------------------- row store

#[test]
fn seed_data_has_three_rows_with_expected_ids() {
    let store = RowStore::with_seed_data();

    assert_eq!(store.len(), 3);
    let ids: Vec<i64> = store.snapshot().iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(store.get(RowId(1)).unwrap().field_text("name"), "John Doe");
    assert_eq!(store.get(RowId(3)).unwrap().field_text("role"), "Manager");
}

#[test]
fn add_batch_assigns_monotonic_ids_in_input_order() {
    let mut store = RowStore::new();

    let first = store.add_batch(vec![person("Amy", "a@x.com", 31, "QA")]);
    let second = store.add_batch(vec![
        person("Ben", "b@x.com", 28, "Dev"),
        person("Cleo", "c@x.com", 45, "Ops"),
    ]);

    assert_eq!(first, vec![RowId(1)]);
    assert_eq!(second, vec![RowId(2), RowId(3)]);
    assert_eq!(store.get(RowId(2)).unwrap().field_text("name"), "Ben");
}

#[test]
fn ids_are_never_reused_after_delete() {
    let mut store = store_with(vec![
        person("Amy", "a@x.com", 31, "QA"),
        person("Ben", "b@x.com", 28, "Dev"),
    ]);

    store.delete(RowId(2));
    let assigned = store.add_batch(vec![person("Cleo", "c@x.com", 45, "Ops")]);

    assert_eq!(assigned, vec![RowId(3)]);
    assert!(store.get(RowId(2)).is_none());
}

#[test]
fn delete_is_idempotent() {
    let mut store = store_with(vec![person("Amy", "a@x.com", 31, "QA")]);

    store.delete(RowId(1));
    store.delete(RowId(1));
    store.delete(RowId(99));

    assert!(store.is_empty());
}

#[test]
fn update_merges_patch_and_preserves_untouched_fields() {
    let mut store = store_with(vec![person("Amy", "a@x.com", 31, "QA")]);

    let patch = FieldMap::from([("role".to_string(), CellValue::text("Lead"))]);
    store.update(RowId(1), patch).unwrap();

    let row = store.get(RowId(1)).unwrap();
    assert_eq!(row.field_text("role"), "Lead");
    assert_eq!(row.field_text("name"), "Amy");
    assert_eq!(row.fields.get("age"), Some(&CellValue::Number(31)));
}

#[test]
fn update_unknown_id_is_not_found() {
    let mut store = store_with(vec![person("Amy", "a@x.com", 31, "QA")]);

    let result = store.update(RowId(99), FieldMap::new());

    assert_eq!(result, Err(TableError::NotFound(99)));
}

// ------------------------------------------------------------ view pipeline

#[test]
fn view_without_sort_keeps_insertion_order() {
    let store = store_with(vec![
        person("Zed", "z@x.com", 20, "Dev"),
        person("Amy", "a@x.com", 31, "QA"),
    ]);

    let result = query_service::view(store.snapshot(), "", &SortSpec::unsorted(), &PageSpec::first(10));

    let names: Vec<String> = result.rows.iter().map(|r| r.field_text("name")).collect();
    assert_eq!(names, vec!["Zed", "Amy"]);
}

#[test]
fn sort_by_text_key_is_lexicographic_and_reversible() {
    let store = store_with(vec![
        person("Cleo", "c@x.com", 45, "Ops"),
        person("Amy", "a@x.com", 31, "QA"),
        person("Ben", "b@x.com", 28, "Dev"),
    ]);

    let asc = query_service::view(
        store.snapshot(),
        "",
        &sort_by("name", SortDirection::Asc),
        &PageSpec::first(10),
    );
    let desc = query_service::view(
        store.snapshot(),
        "",
        &sort_by("name", SortDirection::Desc),
        &PageSpec::first(10),
    );

    let asc_names: Vec<String> = asc.rows.iter().map(|r| r.field_text("name")).collect();
    let desc_names: Vec<String> = desc.rows.iter().map(|r| r.field_text("name")).collect();
    assert_eq!(asc_names, vec!["Amy", "Ben", "Cleo"]);
    assert_eq!(desc_names, vec!["Cleo", "Ben", "Amy"]);
}

#[test]
fn sort_by_age_compares_numerically_not_as_text() {
    let store = store_with(vec![
        person("Amy", "a@x.com", 100, "QA"),
        person("Ben", "b@x.com", 9, "Dev"),
        person("Cleo", "c@x.com", 30, "Ops"),
    ]);

    let result = query_service::view(
        store.snapshot(),
        "",
        &sort_by("age", SortDirection::Asc),
        &PageSpec::first(10),
    );

    let ages: Vec<String> = result.rows.iter().map(|r| r.field_text("age")).collect();
    assert_eq!(ages, vec!["9", "30", "100"]);
}

#[test]
fn sort_is_stable_for_equal_keys_in_both_directions() {
    let store = store_with(vec![
        person("Amy", "first@x.com", 30, "QA"),
        person("Amy", "second@x.com", 30, "Dev"),
        person("Amy", "third@x.com", 30, "Ops"),
    ]);

    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let result = query_service::view(
            store.snapshot(),
            "",
            &sort_by("age", direction),
            &PageSpec::first(10),
        );
        let emails: Vec<String> = result.rows.iter().map(|r| r.field_text("email")).collect();
        assert_eq!(
            emails,
            vec!["first@x.com", "second@x.com", "third@x.com"],
            "ties must keep insertion order ({direction:?})"
        );
    }
}

#[test]
fn rows_missing_the_sort_key_read_as_empty() {
    let mut store = store_with(vec![person("Amy", "a@x.com", 31, "QA")]);
    store.add_batch(vec![FieldMap::from([
        ("name".to_string(), CellValue::text("Ben")),
    ])]);

    let result = query_service::view(
        store.snapshot(),
        "",
        &sort_by("email", SortDirection::Asc),
        &PageSpec::first(10),
    );

    let names: Vec<String> = result.rows.iter().map(|r| r.field_text("name")).collect();
    assert_eq!(names, vec!["Ben", "Amy"]);
}

#[test]
fn filter_matches_any_field_case_insensitively() {
    let store = store_with(vec![
        person("Amy", "a@x.com", 31, "Developer"),
        person("Ben", "b@y.com", 28, "Designer"),
    ]);

    let by_role = query_service::view(
        store.snapshot(),
        "DEVELOPER",
        &SortSpec::unsorted(),
        &PageSpec::first(10),
    );
    let by_email = query_service::view(
        store.snapshot(),
        "A@X",
        &SortSpec::unsorted(),
        &PageSpec::first(10),
    );

    assert_eq!(by_role.rows.len(), 1);
    assert_eq!(by_role.rows[0].field_text("name"), "Amy");
    assert_eq!(by_email.rows.len(), 1);
    assert_eq!(by_email.rows[0].field_text("email"), "a@x.com");
}

#[test]
fn total_count_is_the_filtered_size_before_paging() {
    let rows: Vec<FieldMap> = (0..25)
        .map(|i| person(&format!("Person {i:02}"), &format!("p{i}@x.com"), 20 + i, "Dev"))
        .collect();
    let store = store_with(rows);

    let unfiltered = query_service::view(
        store.snapshot(),
        "",
        &SortSpec::unsorted(),
        &PageSpec { index: 0, size: 10 },
    );
    let filtered = query_service::view(
        store.snapshot(),
        "person 1",
        &SortSpec::unsorted(),
        &PageSpec { index: 0, size: 5 },
    );

    assert_eq!(unfiltered.total_count, 25);
    assert_eq!(unfiltered.rows.len(), 10);
    assert_eq!(filtered.total_count, 10); // Person 10 through Person 19
    assert_eq!(filtered.rows.len(), 5);
}

#[test]
fn pages_concatenate_to_the_full_sequence() {
    let rows: Vec<FieldMap> = (0..25)
        .map(|i| person(&format!("Person {i:02}"), &format!("p{i}@x.com"), 20 + i, "Dev"))
        .collect();
    let store = store_with(rows);

    let mut seen = Vec::new();
    for index in 0..3 {
        let page = query_service::view(
            store.snapshot(),
            "",
            &SortSpec::unsorted(),
            &PageSpec { index, size: 10 },
        );
        seen.extend(page.rows.iter().map(|r| r.id));
    }

    let all: Vec<RowId> = store.snapshot().iter().map(|r| r.id).collect();
    assert_eq!(seen, all);
}

#[test]
fn out_of_range_page_is_empty_not_an_error() {
    let store = RowStore::with_seed_data();

    let result = query_service::view(
        store.snapshot(),
        "",
        &SortSpec::unsorted(),
        &PageSpec { index: 7, size: 10 },
    );

    assert!(result.rows.is_empty());
    assert_eq!(result.total_count, 3);
}

#[test]
fn toggle_flips_direction_on_the_active_key_only() {
    let mut sort = SortSpec::unsorted();

    sort.toggle("name");
    assert_eq!(sort, sort_by("name", SortDirection::Asc));

    sort.toggle("name");
    assert_eq!(sort, sort_by("name", SortDirection::Desc));

    sort.toggle("age");
    assert_eq!(sort, sort_by("age", SortDirection::Asc));
}

// ------------------------------------------------------------ column schema

#[test]
fn default_schema_lists_four_visible_columns_in_order() {
    let schema = ColumnSchema::with_defaults();

    let keys: Vec<&str> = schema.columns().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["name", "email", "age", "role"]);
    assert!(schema.columns().iter().all(|c| c.visible));
    assert_eq!(schema.columns()[0].label, "Name");
}

#[test]
fn add_column_normalizes_the_key_and_appends_last() {
    let mut schema = ColumnSchema::with_defaults();

    assert!(schema.add_column("  Team "));

    let added = schema.columns().last().unwrap();
    assert_eq!(added.key, "team");
    assert_eq!(added.label, "Team");
    assert!(added.visible);
    assert_eq!(schema.len(), 5);
}

#[test]
fn add_column_ignores_blank_and_duplicate_names() {
    let mut schema = ColumnSchema::with_defaults();

    assert!(!schema.add_column("   "));
    assert!(!schema.add_column("NAME"));

    assert_eq!(schema.len(), 4);
}

#[test]
fn set_visibility_touches_known_keys_only() {
    let mut schema = ColumnSchema::with_defaults();

    assert!(schema.set_visibility("email", false));
    assert!(!schema.set_visibility("email", false));
    assert!(!schema.set_visibility("salary", false));

    let visible_columns = schema.visible_columns();
    let visible: Vec<&str> = visible_columns.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(visible, vec!["name", "age", "role"]);
}

#[test]
fn from_descriptors_drops_blank_and_duplicate_keys() {
    let descriptors = vec![
        ColumnDescriptor {
            key: "Name".to_string(),
            label: "Name".to_string(),
            visible: true,
        },
        ColumnDescriptor {
            key: "name".to_string(),
            label: "Duplicate".to_string(),
            visible: false,
        },
        ColumnDescriptor {
            key: "   ".to_string(),
            label: "Blank".to_string(),
            visible: true,
        },
        ColumnDescriptor {
            key: "team".to_string(),
            label: "Team".to_string(),
            visible: false,
        },
    ];

    let schema = ColumnSchema::from_descriptors(descriptors);

    let keys: Vec<&str> = schema.columns().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["name", "team"]);
    assert!(!schema.columns()[1].visible);
}

// -------------------------------------------------------------- edit session

#[test]
fn begin_copies_row_fields_into_a_string_draft() {
    let store = RowStore::with_seed_data();
    let mut session = EditSession::new();

    session.begin(store.get(RowId(1)).unwrap());

    let draft = session.active().unwrap();
    assert_eq!(draft.row_id, RowId(1));
    assert_eq!(draft.fields.get("age").map(String::as_str), Some("30"));
    assert_eq!(draft.fields.get("name").map(String::as_str), Some("John Doe"));
}

#[test]
fn set_field_while_idle_is_ignored() {
    let mut session = EditSession::new();

    session.set_field("name", "Ghost");

    assert!(!session.is_editing());
    assert!(session.active().is_none());
}

#[test]
fn begin_replaces_any_active_draft() {
    let store = RowStore::with_seed_data();
    let mut session = EditSession::new();

    session.begin(store.get(RowId(1)).unwrap());
    session.set_field("name", "Changed");
    session.begin(store.get(RowId(2)).unwrap());

    assert_eq!(session.editing_id(), Some(RowId(2)));
    assert_eq!(
        session.active().unwrap().fields.get("name").map(String::as_str),
        Some("Jane Smith")
    );
}

#[test]
fn commit_applies_the_draft_and_returns_to_idle() {
    let mut store = RowStore::with_seed_data();
    let mut session = EditSession::new();
    session.begin(store.get(RowId(1)).unwrap());
    session.set_field("name", "Johnny Doe");
    session.set_field("age", "31");

    let committed = edit_service::commit(&mut session, &mut store).unwrap();

    assert_eq!(committed, RowId(1));
    assert!(!session.is_editing());
    let row = store.get(RowId(1)).unwrap();
    assert_eq!(row.field_text("name"), "Johnny Doe");
    assert_eq!(row.fields.get("age"), Some(&CellValue::Number(31)));
}

#[test]
fn commit_rejects_non_numeric_age_and_stays_editing() {
    let mut store = RowStore::with_seed_data();
    let mut session = EditSession::new();
    session.begin(store.get(RowId(1)).unwrap());
    session.set_field("age", "thirty");

    let result = edit_service::commit(&mut session, &mut store);

    assert!(matches!(result, Err(TableError::Validation(_))));
    assert!(session.is_editing());
    assert_eq!(
        store.get(RowId(1)).unwrap().fields.get("age"),
        Some(&CellValue::Number(30))
    );
}

#[test]
fn commit_after_the_row_was_deleted_is_not_found() {
    let mut store = RowStore::with_seed_data();
    let mut session = EditSession::new();
    session.begin(store.get(RowId(2)).unwrap());
    store.delete(RowId(2));

    let result = edit_service::commit(&mut session, &mut store);

    assert_eq!(result, Err(TableError::NotFound(2)));
    assert!(session.is_editing());
}

#[test]
fn commit_without_an_active_edit_is_a_validation_error() {
    let mut store = RowStore::with_seed_data();
    let mut session = EditSession::new();

    let result = edit_service::commit(&mut session, &mut store);

    assert!(matches!(result, Err(TableError::Validation(_))));
    assert_eq!(store.len(), 3);
}

#[test]
fn cancel_discards_the_draft_without_touching_the_store() {
    let mut store = RowStore::with_seed_data();
    let mut session = EditSession::new();
    session.begin(store.get(RowId(1)).unwrap());
    session.set_field("name", "Changed");

    session.cancel();

    assert!(!session.is_editing());
    assert_eq!(store.get(RowId(1)).unwrap().field_text("name"), "John Doe");
}

// ---------------------------------------------------------------- csv codec

#[test]
fn import_accepts_complete_rows_and_counts_rejects() {
    let mut store = RowStore::new();
    let schema = ColumnSchema::with_defaults();
    let text = "name,email,age,role\n\
                Amy,a@x.com,31,QA\n\
                Ben,b@x.com,abc,Dev\n\
                ,c@x.com,45,Ops\n";

    let outcome = import_service::import_csv(&mut store, &schema, text).unwrap();

    assert_eq!(outcome.accepted, 1);
    assert_eq!(outcome.rejected, 2);
    assert_eq!(outcome.ids, vec![RowId(1)]);
    assert_eq!(store.get(RowId(1)).unwrap().fields.get("age"), Some(&CellValue::Number(31)));
}

#[test]
fn import_headers_are_matched_case_insensitively() {
    let mut store = RowStore::new();
    let schema = ColumnSchema::with_defaults();
    let text = "Name,Email,Age,Role\nAmy,a@x.com,31,QA\n";

    let outcome = import_service::import_csv(&mut store, &schema, text).unwrap();

    assert_eq!(outcome.accepted, 1);
    assert_eq!(store.get(RowId(1)).unwrap().field_text("name"), "Amy");
}

#[test]
fn import_drops_columns_unknown_to_the_schema() {
    let mut schema = ColumnSchema::with_defaults();
    schema.add_column("Team");
    let text = "name,email,age,role,team,notes\nAmy,a@x.com,31,QA,Core,secret\n";

    let parsed = parse_csv(text, &schema).unwrap();

    assert_eq!(parsed.accepted.len(), 1);
    let fields = &parsed.accepted[0];
    assert_eq!(fields.get("team"), Some(&CellValue::text("Core")));
    assert!(!fields.contains_key("notes"));
}

#[test]
fn import_with_no_accepted_rows_leaves_the_store_unchanged() {
    let mut store = RowStore::with_seed_data();
    let schema = ColumnSchema::with_defaults();
    let text = "name,email,age,role\nAmy,a@x.com,not-a-number,QA\n";

    let result = import_service::import_csv(&mut store, &schema, text);

    assert_eq!(result, Err(TableError::InvalidFormat));
    assert_eq!(store.len(), 3);
}

#[test]
fn malformed_csv_is_invalid_format() {
    let mut store = RowStore::new();
    let schema = ColumnSchema::with_defaults();
    let text = "name,email,age,role\n\"Amy,a@x.com,31,QA\n";

    let result = import_service::import_csv(&mut store, &schema, text);

    assert_eq!(result, Err(TableError::InvalidFormat));
    assert!(store.is_empty());
}

#[test]
fn export_writes_labels_for_visible_columns_only() {
    let store = RowStore::with_seed_data();
    let mut schema = ColumnSchema::with_defaults();
    schema.set_visibility("email", false);

    let text = to_csv(store.snapshot(), &schema.visible_columns()).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Name,Age,Role"));
    assert_eq!(lines.next(), Some("John Doe,30,Developer"));
}

#[test]
fn export_emits_empty_cells_for_missing_fields() {
    let mut store = RowStore::new();
    store.add_batch(vec![FieldMap::from([
        ("name".to_string(), CellValue::text("Amy")),
        ("age".to_string(), CellValue::Number(31)),
    ])]);
    let schema = ColumnSchema::with_defaults();

    let text = to_csv(store.snapshot(), &schema.visible_columns()).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Name,Email,Age,Role"));
    assert_eq!(lines.next(), Some("Amy,,31,"));
}

#[test]
fn exported_csv_reimports_with_the_same_required_fields() {
    let original = RowStore::with_seed_data();
    let schema = ColumnSchema::with_defaults();

    let text = to_csv(original.snapshot(), &schema.visible_columns()).unwrap();
    let mut imported = RowStore::new();
    let outcome = import_service::import_csv(&mut imported, &schema, &text).unwrap();

    assert_eq!(outcome.accepted, 3);
    assert_eq!(outcome.rejected, 0);
    for (before, after) in original.snapshot().iter().zip(imported.snapshot()) {
        assert_eq!(before.fields, after.fields);
    }
}

// ----------------------------------------------------------- sqlite settings

#[test]
fn theme_setting_round_trips() {
    let db = temp_db("theme");
    init_db(&db).unwrap();

    save_setting(&db, THEME_KEY, "dark").unwrap();

    assert_eq!(load_setting(&db, THEME_KEY).unwrap(), Some("dark".to_string()));

    save_setting(&db, THEME_KEY, "light").unwrap();
    assert_eq!(load_setting(&db, THEME_KEY).unwrap(), Some("light".to_string()));
}

#[test]
fn missing_setting_loads_as_none() {
    let db = temp_db("missing");
    init_db(&db).unwrap();

    assert_eq!(load_setting(&db, "nonexistent").unwrap(), None);
    assert_eq!(load_columns(&db).unwrap(), None);
}

#[test]
fn column_schema_round_trips_with_order_and_visibility() {
    let db = temp_db("columns");
    init_db(&db).unwrap();

    let mut schema = ColumnSchema::with_defaults();
    schema.add_column("Team");
    schema.set_visibility("email", false);
    save_columns(&db, &schema).unwrap();

    let loaded = load_columns(&db).unwrap().unwrap();
    assert_eq!(loaded, schema);
}

#[test]
fn init_db_is_idempotent() {
    let db = temp_db("init");

    init_db(&db).unwrap();
    save_setting(&db, THEME_KEY, "dark").unwrap();
    init_db(&db).unwrap();

    assert_eq!(load_setting(&db, THEME_KEY).unwrap(), Some("dark".to_string()));
}
