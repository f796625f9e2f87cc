//! JSON report files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use dfc_core::ComparisonReport;

/// Timestamp format of `generated_at`.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct ReportDocument<'a> {
    generated_at: String,
    #[serde(flatten)]
    report: &'a ComparisonReport,
}

/// Write the report as pretty-printed JSON, creating parent directories.
///
/// Statistics that are NaN serialize as `null`.
pub fn write_report_json(report: &ComparisonReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let document = ReportDocument {
        generated_at: Local::now().format(GENERATED_AT_FORMAT).to_string(),
        report,
    };
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document)
        .with_context(|| format!("serialize report to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
