use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use dfc_core::{ComparisonEngine, ComparisonReport};
use dfc_ingest::{LoadFailure, list_data_files, load_config, load_datasets};
use dfc_model::ComparisonConfig;

use crate::cli::{CompareArgs, FieldsArgs};
use crate::output::write_report_json;
use crate::summary::{apply_table_style, dim_cell, header_cell};

/// Result of `dfc compare`.
#[derive(Debug)]
pub struct CompareRun {
    pub report: ComparisonReport,
    /// Files that could not be loaded and were left out.
    pub failures: Vec<LoadFailure>,
    pub output: Option<PathBuf>,
}

pub fn run_compare(args: &CompareArgs) -> Result<CompareRun> {
    let span = info_span!("compare", inputs = args.paths.len());
    let _guard = span.enter();

    let config = resolve_config(args)?;
    let files = expand_inputs(&args.paths)?;
    if files.is_empty() {
        bail!("no data files found in the given paths");
    }
    info!(files = files.len(), "loading datasets");

    let outcome = load_datasets(&files, &args.names);
    if outcome.datasets.is_empty() {
        bail!("none of the {} input files could be loaded", files.len());
    }

    let engine = ComparisonEngine::new(&config)
        .context("invalid comparison configuration")?
        .with_span(span.clone());
    let report = engine
        .compare(outcome.datasets)
        .context("comparison failed")?;

    if let Some(path) = &args.output {
        write_report_json(&report, path)?;
        info!(path = %path.display(), "wrote JSON report");
    }

    Ok(CompareRun {
        report,
        failures: outcome.failures,
        output: args.output.clone(),
    })
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let config = load_config(&args.config)
        .with_context(|| format!("load configuration {}", args.config.display()))?;
    println!("{}", fields_table(&config));
    Ok(())
}

/// Configuration file (or defaults) with command-line overrides applied.
fn resolve_config(args: &CompareArgs) -> Result<ComparisonConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("load configuration {}", path.display()))?,
        None => ComparisonConfig::default(),
    };
    if let Some(alpha) = args.alpha {
        config = config.with_alpha(alpha);
    }
    if let Some(threshold) = args.threshold {
        config = config.with_fuzzy_threshold(threshold);
    }
    if let Some(title) = &args.title {
        config = config.with_title(title.clone());
    }
    config.validate().context("invalid comparison configuration")?;
    Ok(config)
}

/// Directories expand to their data files; files are kept as given.
fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = list_data_files(path)
                .with_context(|| format!("list data files in {}", path.display()))?;
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn fields_table(config: &ComparisonConfig) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Standard name"),
        header_cell("Type"),
        header_cell("Aliases"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for field in &config.fields {
        let aliases = if field.aliases.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(field.aliases.join(", "))
        };
        let description = match &field.description {
            Some(text) => Cell::new(text),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&field.standard_name),
            Cell::new(field.data_type.as_str()),
            aliases,
            description,
        ]);
    }
    table
}
