//! Loading data and configuration files from disk.

use std::fs;
use std::path::PathBuf;

use dfc_ingest::{IngestError, list_data_files, load_config, load_dataset, load_datasets};
use dfc_model::DataType;
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, ParquetWriter, Series};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_csv_and_tsv() {
    let dir = TempDir::new().unwrap();
    let csv = write(&dir, "north.csv", "revenue,region\n10.5,east\n20,west\n");
    let tsv = write(&dir, "south.tsv", "sale_amount\tterritory\n7\teast\n8\teast\n9\twest\n");

    let north = load_dataset(&csv).unwrap();
    assert_eq!(north.name, "north");
    assert_eq!(north.row_count(), 2);
    assert_eq!(north.column_names(), vec!["revenue", "region"]);

    let south = load_dataset(&tsv).unwrap();
    assert_eq!(south.name, "south");
    assert_eq!(south.row_count(), 3);
    assert_eq!(south.column_names(), vec!["sale_amount", "territory"]);
}

#[test]
fn loads_json_records_and_lines() {
    let dir = TempDir::new().unwrap();
    let json = write(
        &dir,
        "east.json",
        r#"[{"revenue": 1.5, "region": "east"}, {"revenue": 2.0, "region": "west"}]"#,
    );
    let lines = write(
        &dir,
        "west.jsonl",
        "{\"revenue\": 3.0, \"region\": \"west\"}\n{\"revenue\": 4.5, \"region\": \"east\"}\n{\"revenue\": 5.0, \"region\": \"west\"}\n",
    );

    let east = load_dataset(&json).unwrap();
    assert_eq!(east.name, "east");
    assert_eq!(east.row_count(), 2);
    assert_eq!(east.column_names(), vec!["revenue", "region"]);

    let west = load_dataset(&lines).unwrap();
    assert_eq!(west.name, "west");
    assert_eq!(west.row_count(), 3);
}

#[test]
fn loads_parquet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("north.parquet");
    let mut frame = DataFrame::new(vec![
        Series::new("revenue".into(), vec![1.0f64, 2.0, 3.0]).into_column(),
        Series::new("region".into(), vec!["east", "west", "east"]).into_column(),
    ])
    .unwrap();
    let mut file = fs::File::create(&path).unwrap();
    ParquetWriter::new(&mut file).finish(&mut frame).unwrap();

    let north = load_dataset(&path).unwrap();
    assert_eq!(north.name, "north");
    assert_eq!(north.frame, frame);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let broken = write(&dir, "broken.json", "[{\"revenue\": ");
    assert!(matches!(
        load_dataset(&broken),
        Err(IngestError::Parse { .. })
    ));
}

#[test]
fn rejects_unknown_extensions_and_missing_files() {
    let dir = TempDir::new().unwrap();
    let xlsx = write(&dir, "book.xlsx", "not really a workbook");

    assert!(matches!(
        load_dataset(&xlsx),
        Err(IngestError::UnsupportedFormat { .. })
    ));
    assert!(matches!(
        load_dataset(&dir.path().join("missing.csv")),
        Err(IngestError::FileNotFound { .. })
    ));
}

#[test]
fn bulk_load_skips_failures() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "a.csv", "x\n1\n2\n");
    let bad = dir.path().join("gone.csv");
    let other = write(&dir, "b.csv", "x\n3\n");

    let names = vec!["first".to_string()];
    let outcome = load_datasets(&[good, bad.clone(), other], &names);

    let loaded: Vec<&str> = outcome.datasets.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(loaded, vec!["first", "b"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].path, bad);
}

#[test]
fn lists_data_files_sorted() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.tsv", "x\n1\n");
    write(&dir, "a.csv", "x\n1\n");
    write(&dir, "c.ndjson", "{\"x\": 1}\n");
    write(&dir, "notes.txt", "ignored");
    fs::create_dir(dir.path().join("nested.csv")).unwrap();

    let files = list_data_files(dir.path()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.csv", "b.tsv", "c.ndjson"]);

    assert!(matches!(
        list_data_files(&dir.path().join("absent")),
        Err(IngestError::DirectoryNotFound { .. })
    ));
}

#[test]
fn loads_toml_config() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "fields.toml",
        r#"
alpha = 0.01
title = "Quarterly sales"

[[fields]]
standard_name = "revenue"
aliases = ["sale_amount", "total_sale"]
data_type = "numeric"
description = "Gross revenue"

[[fields]]
standard_name = "region"
aliases = ["territory"]
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.alpha, 0.01);
    assert_eq!(config.fuzzy_threshold, 0.8);
    assert_eq!(config.title.as_deref(), Some("Quarterly sales"));
    assert_eq!(config.fields.len(), 2);
    assert_eq!(config.fields[0].data_type, DataType::Numeric);
    assert_eq!(config.fields[1].data_type, DataType::Unknown);
}

#[test]
fn loads_json_config() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "fields.json",
        r#"{"fuzzy_threshold": 0.9, "fields": [{"standard_name": "qty", "aliases": ["units"]}]}"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.fuzzy_threshold, 0.9);
    assert_eq!(config.fields[0].aliases, vec!["units"]);
}

#[test]
fn config_errors_are_classified() {
    let dir = TempDir::new().unwrap();

    let broken = write(&dir, "broken.toml", "alpha = [");
    assert!(matches!(
        load_config(&broken),
        Err(IngestError::ConfigParse { .. })
    ));

    let invalid = write(&dir, "invalid.toml", "alpha = 1.5");
    assert!(matches!(
        load_config(&invalid),
        Err(IngestError::InvalidConfig { .. })
    ));

    let yaml = write(&dir, "fields.yaml", "alpha: 0.05");
    assert!(matches!(
        load_config(&yaml),
        Err(IngestError::UnsupportedFormat { .. })
    ));

    assert!(matches!(
        load_config(&dir.path().join("missing.toml")),
        Err(IngestError::ConfigRead { .. })
    ));
}
