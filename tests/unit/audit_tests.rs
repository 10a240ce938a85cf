//! Unit tests for the per-row pipeline and the batch runner

use std::collections::HashMap;
use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use sql_filter_audit::audit::{audit_row, QueryRow, RowOutcome};
use sql_filter_audit::stores::FilterListStore;
use sql_filter_audit::{run_audit, AuditOptions};

fn row(path: Option<&str>, sql: Option<&str>) -> QueryRow {
    QueryRow {
        path: path.map(str::to_string),
        sql: sql.map(str::to_string),
    }
}

fn audit(row: &QueryRow, dir: &TempDir) -> RowOutcome {
    let store = FilterListStore::new(dir.path());
    audit_row(row, &store, &HashMap::new(), &HashMap::new()).unwrap()
}

#[test]
fn test_blank_sql_is_skipped() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        audit(&row(Some("/a/Report"), None), &dir),
        RowOutcome::Skipped(_)
    ));
    assert!(matches!(
        audit(&row(Some("/a/Report"), Some("   \n  ")), &dir),
        RowOutcome::Skipped(_)
    ));
}

#[test]
fn test_path_without_separator_is_invalid() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        audit(&row(Some("Report"), Some("SELECT 1")), &dir),
        RowOutcome::Commentary("Invalid Path provided.".to_string())
    );
    assert_eq!(
        audit(&row(None, Some("SELECT 1")), &dir),
        RowOutcome::Commentary("Invalid Path provided.".to_string())
    );
}

#[test]
fn test_unregistered_source_identity() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        audit(&row(Some("/shared/Mystery Report"), Some("SELECT 1")), &dir),
        RowOutcome::Commentary("Filter file 'Mystery Report.txt' not found.".to_string())
    );
}

#[test]
fn test_commentary_for_registered_source() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Sales Dashboard.txt"), "region\nfiscal_year\n").unwrap();

    let sql = "SELECT * FROM sales WHERE region IN ('east','west','north')";
    let outcome = audit(&row(Some("/shared/Sales Dashboard"), Some(sql)), &dir);

    let RowOutcome::Commentary(commentary) = outcome else {
        panic!("expected commentary");
    };
    assert!(commentary.contains("region (region): 3 filters"));
    assert!(commentary.contains("fiscal_year (fiscal_year)"));
}

#[test]
fn test_known_issue_note_appended() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Sales Dashboard.txt"), "region\n").unwrap();

    let store = FilterListStore::new(dir.path());
    let known_issues = HashMap::from([("Sales Dashboard".to_string(), "4821".to_string())]);
    let outcome = audit_row(
        &row(Some("/shared/Sales Dashboard"), Some("SELECT * FROM t WHERE region = 'east'")),
        &store,
        &HashMap::new(),
        &known_issues,
    )
    .unwrap();

    let RowOutcome::Commentary(commentary) = outcome else {
        panic!("expected commentary");
    };
    assert!(commentary.ends_with(
        "Note: A similar issue has been documented on the PSR Confluence page under PSR #4821."
    ));
}

#[test]
fn test_redesigned_workbook_note_appended() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Inventory Turns Analysis.txt"), "region\n").unwrap();

    let outcome = audit(
        &row(
            Some("/shared/Inventory Turns Analysis"),
            Some("SELECT * FROM t WHERE region = 'east'"),
        ),
        &dir,
    );

    let RowOutcome::Commentary(commentary) = outcome else {
        panic!("expected commentary");
    };
    assert!(commentary.contains("Note: In the 20.4 workbook redesign"));
}

#[test]
fn test_no_where_clause_commentary_still_gets_notes() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Sales Dashboard.txt"), "region\n").unwrap();

    let store = FilterListStore::new(dir.path());
    let known_issues = HashMap::from([("Sales Dashboard".to_string(), "77".to_string())]);
    let outcome = audit_row(
        &row(Some("/shared/Sales Dashboard"), Some("SELECT 1 FROM dual")),
        &store,
        &HashMap::new(),
        &known_issues,
    )
    .unwrap();

    let RowOutcome::Commentary(commentary) = outcome else {
        panic!("expected commentary");
    };
    assert!(commentary.starts_with("No WHERE clause found in the SQL query."));
    assert!(commentary.contains("PSR #77"));
}

#[test]
fn test_run_audit_batch_end_to_end() {
    let dir = TempDir::new().unwrap();
    let filters_dir = dir.path().join("filters");
    fs::create_dir(&filters_dir).unwrap();
    fs::write(filters_dir.join("Sales Dashboard.txt"), "region\nfiscal_year\n").unwrap();

    let display_names_path = dir.path().join("display_names.json");
    fs::write(&display_names_path, r#"{"region": "Sales Region"}"#).unwrap();

    let input_path = dir.path().join("rows.json");
    fs::write(
        &input_path,
        r#"[
            {"path": "/shared/Sales Dashboard",
             "sql": "SELECT * FROM sales WHERE region IN ('east','west') AND fiscal_year = 2024"},
            {"path": "/shared/Sales Dashboard", "sql": null},
            {"path": "Sales Dashboard", "sql": "SELECT 1"}
        ]"#,
    )
    .unwrap();

    let output_path = run_audit(AuditOptions {
        input_path: input_path.clone(),
        output_path: None,
        filters_dir,
        display_names_path: Some(display_names_path),
        known_issues_path: None,
        verbose: false,
    })
    .unwrap();

    assert_eq!(output_path, dir.path().join("rows.audited.json"));

    let audited: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let rows = audited.as_array().unwrap();
    assert_eq!(rows.len(), 3);

    let first = rows[0]["commentary"].as_str().unwrap();
    assert!(first.starts_with(
        "The customer is executing a query that includes all mandatory filters"
    ));
    assert!(first.contains("Sales Region (region): 2 filters"));

    // Blank SQL keeps a null commentary; the batch still completes
    assert!(rows[1]["commentary"].is_null());

    assert_eq!(rows[2]["commentary"], "Invalid Path provided.");
}
