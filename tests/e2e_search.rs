// Discount Card - tests/e2e_search.rs
//
// End-to-end tests for the cascade, search and export pipeline.
//
// These tests exercise a real SQLite file on disk, the real read-only
// store, the filter session and the export writer. Exported files are read
// back with the csv and calamine crates.

use discount_card::app::session::FilterSession;
use discount_card::core::export::ExportFormat;
use discount_card::core::model::{Choice, Dimension, Selection};
use discount_card::platform::sqlite::SqliteStore;
use discount_card::util::constants::{
    EXPORT_FILE_PREFIX, EXPORT_HEADERS, EXPORT_SHEET_NAME, UTF8_BOM,
};
use discount_card::util::error::{FilterError, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// Write the providers fixture database into a fresh temp directory.
fn fixture_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("discount_card.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE providers (
            provider_name TEXT, address TEXT, phone, hotline TEXT,
            agreed_prices TEXT, governorate TEXT, area TEXT,
            provider_type TEXT, main_specialty TEXT, sub_specialty TEXT
        );
        INSERT INTO providers VALUES
            ('Nile Hospital', 'Corniche St', '0223456789', '19001', '20%', 'Cairo', 'Maadi', 'Hospital', 'Surgery', 'General'),
            ('Nasr Scan', 'Abbas El Akkad', '0224567890', NULL, '15%', 'Cairo', 'Nasr City', 'Radiology', 'Imaging', 'MRI'),
            ('October Dental', 'Central Axis', 38345678, '19002', '25%', 'Giza', '6th of October', 'Clinic', 'Dentistry', 'Orthodontics'),
            ('October Labs', 'Mall of Arabia', '0238765432', NULL, '10%', 'Giza', '6th of October', 'Laboratory', 'Pathology', ''),
            ('Pyramids Eye', 'Haram St', '0235678901', '19003', '30%', 'Giza', 'Haram', 'Center', 'Ophthalmology', 'Retina'),
            ('Unassigned', NULL, NULL, NULL, NULL, NULL, '', NULL, NULL, NULL);",
    )
    .unwrap();
    (dir, path)
}

fn open_session(path: &Path) -> FilterSession {
    let store = SqliteStore::open(path).unwrap();
    FilterSession::new(Box::new(store)).unwrap()
}

fn values(choices: &[Choice]) -> Vec<&str> {
    choices.iter().filter_map(Choice::as_value).collect()
}

fn pick(value: &str) -> Choice {
    Choice::Value(value.to_string())
}

/// Read an exported CSV back, stripping the BOM. Returns (headers, rows).
fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM), "export must start with a UTF-8 BOM");
    let mut reader = csv::Reader::from_reader(&bytes[UTF8_BOM.len()..]);
    let headers = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

// =============================================================================
// Cascade E2E
// =============================================================================

#[test]
fn e2e_startup_lists_every_governorate_and_area() {
    let (_dir, path) = fixture_db();
    let session = open_session(&path);

    let governorates = session.choices(Dimension::Governorate);
    assert_eq!(governorates[0], Choice::All);
    assert_eq!(values(governorates), vec!["Cairo", "Giza"]);

    assert_eq!(
        values(session.choices(Dimension::Area)),
        vec!["6th of October", "Haram", "Maadi", "Nasr City"]
    );
}

#[test]
fn e2e_pinning_giza_narrows_areas_and_clears_downstream() {
    let (_dir, path) = fixture_db();
    let mut session = open_session(&path);

    session
        .set_selection(Dimension::Area, pick("Maadi"))
        .unwrap();
    session
        .set_selection(Dimension::Governorate, pick("Giza"))
        .unwrap();

    assert_eq!(session.selection().get(Dimension::Governorate), Some("Giza"));
    for dimension in Dimension::Governorate.downstream() {
        assert_eq!(
            session.selection().get(*dimension),
            None,
            "{dimension} must be reset by an upstream change"
        );
    }
    assert_eq!(
        values(session.choices(Dimension::Area)),
        vec!["6th of October", "Haram"]
    );
    // Governorate's own list never depends on its own pin.
    assert_eq!(
        values(session.choices(Dimension::Governorate)),
        vec!["Cairo", "Giza"]
    );
}

#[test]
fn e2e_distinct_values_skip_null_and_empty_for_every_selection() {
    let (_dir, path) = fixture_db();
    let session = open_session(&path);

    let selections = [
        Selection::default(),
        Selection::default().with(Dimension::Governorate, "Giza"),
        Selection::default()
            .with(Dimension::Governorate, "Giza")
            .with(Dimension::Area, "6th of October"),
    ];
    for selection in &selections {
        for dimension in Dimension::ALL {
            let choices = session.distinct_values(dimension, selection).unwrap();
            assert!(
                values(&choices).iter().all(|v| !v.is_empty()),
                "{dimension} offered an empty value under {selection:?}"
            );
        }
    }
}

#[test]
fn e2e_downstream_pin_does_not_constrain_upstream_choices() {
    let (_dir, path) = fixture_db();
    let session = open_session(&path);

    let pinned_area = Selection::default().with(Dimension::Area, "Maadi");
    let governorates = session
        .distinct_values(Dimension::Governorate, &pinned_area)
        .unwrap();
    assert_eq!(values(&governorates), vec!["Cairo", "Giza"]);
}

#[test]
fn e2e_unobserved_value_is_rejected() {
    let (_dir, path) = fixture_db();
    let mut session = open_session(&path);
    session
        .set_selection(Dimension::Governorate, pick("Giza"))
        .unwrap();

    let err = session
        .set_selection(Dimension::Area, pick("Maadi"))
        .unwrap_err();
    assert!(matches!(err, FilterError::UnobservedValue { .. }));
    assert_eq!(session.selection().get(Dimension::Area), None);
}

// =============================================================================
// Search E2E
// =============================================================================

#[test]
fn e2e_unconstrained_search_returns_all_rows_in_store_order() {
    let (_dir, path) = fixture_db();
    let session = open_session(&path);

    let rows = session.search_current().unwrap();
    let names: Vec<_> = rows
        .iter()
        .map(|r| r.provider_name.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(
        names,
        vec![
            "Nile Hospital",
            "Nasr Scan",
            "October Dental",
            "October Labs",
            "Pyramids Eye",
            "Unassigned"
        ]
    );
    // Integer-typed phone values are rendered as text.
    assert_eq!(rows[2].phone.as_deref(), Some("38345678"));
}

#[test]
fn e2e_search_giza_october_returns_matching_subset_idempotently() {
    let (_dir, path) = fixture_db();
    let mut session = open_session(&path);
    session
        .set_selection(Dimension::Governorate, pick("Giza"))
        .unwrap();
    session
        .set_selection(Dimension::Area, pick("6th of October"))
        .unwrap();

    let first = session.search_current().unwrap();
    let second = session.search_current().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|r| {
        r.governorate.as_deref() == Some("Giza") && r.area.as_deref() == Some("6th of October")
    }));
}

#[test]
fn e2e_quoted_value_is_bound_not_interpolated() {
    let (_dir, path) = fixture_db();
    let session = open_session(&path);

    let hostile = Selection::default().with(Dimension::Governorate, "Giza' OR '1'='1");
    assert!(session.search(&hostile).unwrap().is_empty());
}

// =============================================================================
// Export E2E
// =============================================================================

#[test]
fn e2e_export_giza_october_to_csv() {
    let (_dir, path) = fixture_db();
    let out = tempfile::tempdir().unwrap();
    let mut session = open_session(&path);
    session
        .set_selection(Dimension::Governorate, pick("Giza"))
        .unwrap();
    session
        .set_selection(Dimension::Area, pick("6th of October"))
        .unwrap();
    let rows = session.search_current().unwrap();

    let outcome = session
        .export(&rows, out.path(), ExportFormat::Csv)
        .unwrap();
    assert_eq!(outcome.rows, rows.len());

    let file_name = outcome.path.file_name().unwrap().to_str().unwrap();
    assert!(file_name.starts_with(EXPORT_FILE_PREFIX));
    assert!(file_name.ends_with(".csv"));

    let (headers, data) = read_csv(&outcome.path);
    assert_eq!(headers, EXPORT_HEADERS.to_vec());
    assert_eq!(data.len(), rows.len());
    assert_eq!(
        data[0],
        vec!["October Dental", "Central Axis", "38345678", "19002", "25%"]
    );
    // Absent hotline becomes an empty cell.
    assert_eq!(data[1][3], "");
}

#[test]
fn e2e_export_giza_october_to_xlsx() {
    use calamine::{open_workbook, Data, Reader, Xlsx};

    let (_dir, path) = fixture_db();
    let out = tempfile::tempdir().unwrap();
    let mut session = open_session(&path);
    session
        .set_selection(Dimension::Governorate, pick("Giza"))
        .unwrap();
    session
        .set_selection(Dimension::Area, pick("6th of October"))
        .unwrap();
    let rows = session.search_current().unwrap();

    let outcome = session
        .export(&rows, out.path(), ExportFormat::default())
        .unwrap();
    let file_name = outcome.path.file_name().unwrap().to_str().unwrap();
    assert!(file_name.starts_with(EXPORT_FILE_PREFIX));
    assert!(file_name.ends_with(".xlsx"));

    let mut workbook: Xlsx<_> = open_workbook(&outcome.path).unwrap();
    let range = workbook.worksheet_range(EXPORT_SHEET_NAME).unwrap();
    let sheet: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(Data::to_string).collect())
        .collect();

    assert_eq!(sheet.len(), rows.len() + 1);
    assert_eq!(sheet[0], EXPORT_HEADERS.to_vec());
    assert_eq!(
        sheet[1],
        vec!["October Dental", "Central Axis", "38345678", "19002", "25%"]
    );
    assert_eq!(sheet[2][0], "October Labs");
    assert_eq!(sheet[2][3], "");
}

#[test]
fn e2e_repeated_exports_get_distinct_names() {
    let (_dir, path) = fixture_db();
    let out = tempfile::tempdir().unwrap();
    let session = open_session(&path);
    let rows = session.search_current().unwrap();

    let first = session.export(&rows, out.path(), ExportFormat::Csv).unwrap();
    let second = session.export(&rows, out.path(), ExportFormat::Csv).unwrap();
    let third = session.export(&rows, out.path(), ExportFormat::Json).unwrap();

    assert_ne!(first.path, second.path);
    assert_ne!(first.path, third.path);
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&third.path).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), rows.len());
    assert_eq!(json[0]["Provider Name"], "Nile Hospital");
}

// =============================================================================
// Store failures
// =============================================================================

#[test]
fn e2e_missing_database_is_fatal_at_open() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nowhere.db");
    assert!(matches!(
        SqliteStore::open(&missing),
        Err(StoreError::Unreachable { .. })
    ));
    assert!(!missing.exists(), "opening must not create the database");
}

#[test]
fn e2e_store_loss_leaves_selection_unchanged() {
    let (dir, path) = fixture_db();
    let mut session = open_session(&path);
    session
        .set_selection(Dimension::Governorate, pick("Giza"))
        .unwrap();
    let areas_before: Vec<Choice> = session.choices(Dimension::Area).to_vec();

    fs::remove_file(&path).unwrap();

    let err = session
        .set_selection(Dimension::Area, pick("Haram"))
        .unwrap_err();
    assert!(matches!(err, FilterError::Store(_)));
    assert_eq!(session.selection().get(Dimension::Governorate), Some("Giza"));
    assert_eq!(session.selection().get(Dimension::Area), None);
    assert_eq!(session.choices(Dimension::Area), areas_before.as_slice());
    drop(dir);
}
