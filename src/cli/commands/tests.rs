//! CLI command tests

use super::species::render_species;
use super::*;
use crate::config::{parse_args, OutputFormat};
use crate::reference::{init_schema, resolve_reference, SqliteReferenceStore};
use rusqlite::Connection;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Reference database with two ITS1 species and one synonym
fn create_test_db(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("refs.sqlite");
    let conn = Connection::open(&path).unwrap();
    init_schema(&conn).unwrap();
    conn.execute_batch(
        "INSERT INTO marker_definition (id, name) VALUES (1, 'ITS1');
         INSERT INTO taxonomy (id, genus, species) VALUES
            (1, 'Phytophthora', 'infestans'),
            (2, 'Phytophthora', 'ramorum'),
            (3, 'Peronospora', 'sparsa');
         INSERT INTO sequence_source (marker_definition_id, taxonomy_id, source_accession) VALUES
            (1, 1, 'A1'), (1, 2, 'A2'), (1, 3, 'A3');
         INSERT INTO synonym (taxonomy_id, name) VALUES (2, 'Phytophthora ramorum EU1');",
    )
    .unwrap();
    path
}

fn create_inputs(dir: &Path, prediction: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("s1.known.tsv"), "x_5\t0\tPhytophthora infestans\n").unwrap();
    fs::write(dir.join("s1.onebp.tsv"), format!("x_5\t0\t{prediction}\n")).unwrap();
}

fn assess_cli(db: &Path, inputs: &Path, out: &Path) -> crate::config::Cli {
    let argv: Vec<OsString> = vec![
        "barcode-assess".into(),
        "-q".into(),
        "assess".into(),
        "-i".into(),
        inputs.into(),
        "-m".into(),
        "onebp".into(),
        "-d".into(),
        db.into(),
        "-o".into(),
        out.join("metrics.tsv").into(),
        "--table".into(),
        out.join("table.tsv").into(),
        "--confusion".into(),
        out.join("confusion.tsv").into(),
    ];
    parse_args(argv).unwrap()
}

#[test]
fn test_run_assess_writes_reports() {
    let dir = TempDir::new().unwrap();
    let db = create_test_db(&dir);
    let inputs = dir.path().join("runs");
    create_inputs(&inputs, "Phytophthora ramorum EU1");

    run_command(assess_cli(&db, &inputs, dir.path())).unwrap();

    let table = fs::read_to_string(dir.path().join("table.tsv")).unwrap();
    assert_eq!(
        table,
        "#sample-count\tExpected\tPredicted\n1\tPhytophthora infestans\tPhytophthora ramorum\n"
    );
    let metrics = fs::read_to_string(dir.path().join("metrics.tsv")).unwrap();
    assert!(metrics.contains("\nOVERALL\t0\t1\t1\t1\t"));
    let confusion = fs::read_to_string(dir.path().join("confusion.tsv")).unwrap();
    assert!(confusion.starts_with("#Expected vs predicted\tsample count\t(TN)\t(FN)\tPhytophthora ramorum\n"));
}

#[test]
fn test_run_assess_unknown_prediction_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let db = create_test_db(&dir);
    let inputs = dir.path().join("runs");
    create_inputs(&inputs, "Zea mays");

    let err = run_command(assess_cli(&db, &inputs, dir.path())).unwrap_err();
    assert!(err.starts_with("[E030]"), "{err}");
    assert!(!dir.path().join("metrics.tsv").exists());
    assert!(!dir.path().join("table.tsv").exists());
    assert!(!dir.path().join("confusion.tsv").exists());
}

#[test]
fn test_run_assess_failed_write_leaves_no_reports() {
    let dir = TempDir::new().unwrap();
    let db = create_test_db(&dir);
    let inputs = dir.path().join("runs");
    create_inputs(&inputs, "Phytophthora infestans");

    let argv: Vec<OsString> = vec![
        "barcode-assess".into(),
        "-q".into(),
        "assess".into(),
        "-i".into(),
        inputs.into(),
        "-m".into(),
        "onebp".into(),
        "-d".into(),
        db.into(),
        "-o".into(),
        dir.path().join("metrics.tsv").into(),
        "--table".into(),
        dir.path().join("table.tsv").into(),
        "--confusion".into(),
        dir.path().join("missing-dir").join("confusion.tsv").into(),
    ];
    let err = run_command(parse_args(argv).unwrap()).unwrap_err();

    assert!(err.starts_with("[E060]"), "{err}");
    assert!(!dir.path().join("table.tsv").exists());
    assert!(!dir.path().join("metrics.tsv").exists());
}

#[test]
fn test_run_assess_missing_database() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("runs");
    create_inputs(&inputs, "Phytophthora infestans");

    let err = run_command(assess_cli(&dir.path().join("absent.sqlite"), &inputs, dir.path()))
        .unwrap_err();
    assert!(err.starts_with("[E020]"), "{err}");
}

#[test]
fn test_run_assess_invalid_config() {
    let cli = parse_args(["barcode-assess", "assess", "-m", "onebp", "-d", "refs.sqlite"]).unwrap();
    let err = run_command(cli).unwrap_err();
    assert!(err.starts_with("[E050]"), "{err}");
    assert!(err.contains("--input"));
}

#[test]
fn test_run_assess_from_yaml_config() {
    let dir = TempDir::new().unwrap();
    let db = create_test_db(&dir);
    let inputs = dir.path().join("runs");
    create_inputs(&inputs, "Phytophthora infestans");
    let metrics = dir.path().join("from-yaml.tsv");

    let config = dir.path().join("assess.yaml");
    fs::write(
        &config,
        format!(
            "inputs: [{}]\nmethod: onebp\ndatabase: {}\noutput:\n  metrics: {}\n",
            inputs.display(),
            db.display(),
            metrics.display()
        ),
    )
    .unwrap();

    let argv: Vec<OsString> =
        vec!["barcode-assess".into(), "-q".into(), "assess".into(), "--config".into(), config.into()];
    let cli = parse_args(argv).unwrap();
    run_command(cli).unwrap();

    let text = fs::read_to_string(metrics).unwrap();
    assert!(text.contains("\nPhytophthora infestans\t1\t0\t0\t0\t1.00\t0.00\t1.00\t1.00\t0.0000\t0.000\n"));
}

#[test]
fn test_render_species_text_and_json() {
    let dir = TempDir::new().unwrap();
    let store = SqliteReferenceStore::open(create_test_db(&dir)).unwrap();
    let reference = resolve_reference(&store, Some("ITS1")).unwrap();

    let text = render_species(&reference, Some("ITS1"), OutputFormat::Text).unwrap();
    assert_eq!(
        text,
        "#3 species, 1 synonyms\nPeronospora sparsa\nPhytophthora infestans\nPhytophthora ramorum\n"
    );

    let json = render_species(&reference, Some("ITS1"), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["marker"], "ITS1");
    assert_eq!(value["species"].as_array().unwrap().len(), 3);
    assert_eq!(value["synonyms"], 1);
}

#[test]
fn test_run_species_missing_database() {
    let cli = parse_args(["barcode-assess", "species", "-d", "/nonexistent/refs.sqlite"]).unwrap();
    let err = run_command(cli).unwrap_err();
    assert!(err.starts_with("[E020]"));
}

#[test]
fn test_format_error_prefixes_code() {
    let err = crate::error::AssessError::EmptyIntersection { known: 2, method: 3 };
    assert!(format_error(&err).starts_with("[E031] No samples in common"));
}
