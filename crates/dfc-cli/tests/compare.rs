//! End-to-end runs of the `compare` and `fields` commands.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use dfc_cli::cli::{Cli, Command, CompareArgs, FieldsArgs};
use dfc_cli::commands::{run_compare, run_fields};

const ROWS: usize = 60;

fn write_csv(dir: &Path, name: &str, header: &str, offset: f64, wholesale_every: usize) -> PathBuf {
    let mut content = format!("{header}\n");
    for i in 0..ROWS {
        let segment = if i % wholesale_every == 0 {
            "wholesale"
        } else {
            "retail"
        };
        writeln!(content, "{:.1},{segment}", offset + i as f64 + 0.5).unwrap();
    }
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("fields.toml");
    fs::write(
        &path,
        r#"
title = "Regional sales"

[[fields]]
standard_name = "revenue"
aliases = ["sale_amount"]
data_type = "numeric"

[[fields]]
standard_name = "segment"
aliases = ["customer_segment"]
data_type = "categorical"
"#,
    )
    .unwrap();
    path
}

fn compare_args(paths: Vec<PathBuf>, config: Option<PathBuf>) -> CompareArgs {
    CompareArgs {
        paths,
        config,
        names: Vec::new(),
        alpha: None,
        threshold: None,
        title: None,
        output: None,
    }
}

#[test]
fn compares_a_directory_of_files() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    write_csv(&data, "north.csv", "sale_amount,segment", 0.0, 2);
    write_csv(&data, "south.csv", "revenue,customer_segment", 100.0, 10);
    fs::write(data.join("readme.md"), "not data").unwrap();
    let config = write_config(dir.path());

    let run = run_compare(&compare_args(vec![data], Some(config))).unwrap();

    assert!(run.failures.is_empty());
    let report = &run.report;
    assert_eq!(report.title, "Regional sales");
    assert_eq!(report.common_fields, vec!["revenue", "segment"]);
    let names: Vec<&str> = report.datasets.iter().map(|d| d.dataset.as_str()).collect();
    assert_eq!(names, vec!["north", "south"]);
    assert!(report.field("revenue").unwrap().has_significant_difference());
    assert_eq!(report.field("segment").unwrap().tests.len(), 1);
}

#[test]
fn command_line_overrides_win_over_the_file() {
    let dir = TempDir::new().unwrap();
    let north = write_csv(dir.path(), "north.csv", "sale_amount,segment", 0.0, 2);
    let south = write_csv(dir.path(), "south.csv", "revenue,customer_segment", 100.0, 10);
    let config = write_config(dir.path());

    let mut args = compare_args(vec![north, south], Some(config));
    args.alpha = Some(0.01);
    args.title = Some("Override".to_string());
    let run = run_compare(&args).unwrap();

    assert_eq!(run.report.title, "Override");
    assert_eq!(run.report.alpha, 0.01);
    assert!(run.report.test_results().all(|(_, t)| t.alpha == 0.01));
}

#[test]
fn missing_file_is_reported_and_skipped() {
    let dir = TempDir::new().unwrap();
    let north = write_csv(dir.path(), "north.csv", "revenue,segment", 0.0, 2);
    let south = write_csv(dir.path(), "south.csv", "revenue,segment", 5.0, 2);
    let missing = dir.path().join("west.csv");

    let run = run_compare(&compare_args(vec![north, missing.clone(), south], None)).unwrap();

    assert_eq!(run.report.datasets.len(), 2);
    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.failures[0].path, missing);
}

#[test]
fn fails_without_any_data_files() {
    let dir = TempDir::new().unwrap();
    let err = run_compare(&compare_args(vec![dir.path().to_path_buf()], None)).unwrap_err();
    assert!(err.to_string().contains("no data files"));
}

#[test]
fn rejects_out_of_range_alpha() {
    let dir = TempDir::new().unwrap();
    let north = write_csv(dir.path(), "north.csv", "revenue,segment", 0.0, 2);
    let mut args = compare_args(vec![north], None);
    args.alpha = Some(1.5);

    let err = run_compare(&args).unwrap_err();
    assert!(err.to_string().contains("invalid comparison configuration"));
}

#[test]
fn writes_json_report() {
    let dir = TempDir::new().unwrap();
    let north = write_csv(dir.path(), "north.csv", "revenue,segment", 0.0, 2);
    let south = write_csv(dir.path(), "south.csv", "revenue,segment", 100.0, 10);
    let output = dir.path().join("out").join("report.json");

    let mut args = compare_args(vec![north, south], None);
    args.output = Some(output.clone());
    let run = run_compare(&args).unwrap();
    assert_eq!(run.output.as_deref(), Some(output.as_path()));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert!(json["generated_at"].is_string());
    assert_eq!(json["title"], "Comparison of 2 Datasets");
    assert_eq!(json["common_fields"], serde_json::json!(["revenue", "segment"]));
    assert_eq!(json["fields"][0]["tests"][0]["kind"]["test"], "kolmogorov_smirnov");
    assert!(json.get("standardized").is_none());
}

#[test]
fn fields_command_reads_the_configuration() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    run_fields(&FieldsArgs { config }).unwrap();

    let missing = dir.path().join("absent.toml");
    assert!(run_fields(&FieldsArgs { config: missing }).is_err());
}

#[test]
fn parses_compare_arguments() {
    let cli = Cli::try_parse_from([
        "dfc",
        "-v",
        "compare",
        "a.csv",
        "b.csv",
        "--alpha",
        "0.01",
        "--name",
        "first",
        "--output",
        "report.json",
    ])
    .unwrap();

    assert!(cli.verbosity.is_present());
    let Command::Compare(args) = cli.command else {
        panic!("expected compare");
    };
    assert_eq!(args.paths, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
    assert_eq!(args.alpha, Some(0.01));
    assert_eq!(args.names, vec!["first"]);
    assert_eq!(args.output, Some(PathBuf::from("report.json")));
}

#[test]
fn compare_requires_a_path() {
    assert!(Cli::try_parse_from(["dfc", "compare"]).is_err());
}
