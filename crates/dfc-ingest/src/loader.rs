//! Reading data files into datasets.

use std::fs::File;
use std::path::{Path, PathBuf};

use dfc_model::Dataset;
use polars::prelude::{
    CsvReadOptions, DataFrame, JsonFormat, JsonReader, ParquetReader, PolarsError, SerReader,
};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};

/// Supported tabular file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Comma-separated values (`.csv`).
    Csv,
    /// Tab-separated values (`.tsv`).
    Tsv,
    /// Apache Parquet (`.parquet`).
    Parquet,
    /// A JSON array of records (`.json`).
    Json,
    /// One JSON record per line (`.jsonl`, `.ndjson`).
    JsonLines,
}

impl DataFormat {
    /// Format implied by the file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            "parquet" => Some(Self::Parquet),
            "json" => Some(Self::Json),
            "jsonl" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// A file that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: IngestError,
}

/// Result of a bulk load: everything that loaded, plus what did not.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub datasets: Vec<Dataset>,
    pub failures: Vec<LoadFailure>,
}

/// Reads one data file. The dataset is named after the file stem.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let frame = read_frame(path)?;
    let name = dataset_name(path);
    debug!(
        dataset = %name,
        rows = frame.height(),
        columns = frame.width(),
        "loaded dataset"
    );
    Ok(Dataset::new(name, frame))
}

/// Reads several files, skipping the ones that fail.
///
/// `names[i]` names the dataset from `paths[i]`; missing names fall back to
/// the file stem. A failing file is logged and reported in
/// [`LoadOutcome::failures`] without stopping the rest of the load.
pub fn load_datasets<P: AsRef<Path>>(paths: &[P], names: &[String]) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();
    for (idx, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        match load_dataset(path) {
            Ok(mut dataset) => {
                if let Some(name) = names.get(idx) {
                    dataset.name.clone_from(name);
                }
                outcome.datasets.push(dataset);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping file that failed to load");
                outcome.failures.push(LoadFailure {
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }
    info!(
        loaded = outcome.datasets.len(),
        failed = outcome.failures.len(),
        "finished loading datasets"
    );
    outcome
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    let format = DataFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let parse_error = |e: PolarsError| IngestError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    match format {
        DataFormat::Csv | DataFormat::Tsv => {
            let separator = if format == DataFormat::Tsv { b'\t' } else { b',' };
            CsvReadOptions::default()
                .with_has_header(true)
                .map_parse_options(|opts| {
                    opts.with_separator(separator).with_try_parse_dates(true)
                })
                .try_into_reader_with_file_path(Some(path.to_path_buf()))
                .map_err(parse_error)?
                .finish()
        }
        DataFormat::Parquet => ParquetReader::new(open_file(path)?).finish(),
        DataFormat::Json => JsonReader::new(open_file(path)?)
            .with_json_format(JsonFormat::Json)
            .finish(),
        DataFormat::JsonLines => JsonReader::new(open_file(path)?)
            .with_json_format(JsonFormat::JsonLines)
            .finish(),
    }
    .map_err(parse_error)
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a.csv")), Some(DataFormat::Csv));
        assert_eq!(DataFormat::from_path(Path::new("a.TSV")), Some(DataFormat::Tsv));
        assert_eq!(
            DataFormat::from_path(Path::new("a.parquet")),
            Some(DataFormat::Parquet)
        );
        assert_eq!(DataFormat::from_path(Path::new("a.json")), Some(DataFormat::Json));
        assert_eq!(
            DataFormat::from_path(Path::new("a.ndjson")),
            Some(DataFormat::JsonLines)
        );
        assert_eq!(DataFormat::from_path(Path::new("a.xlsx")), None);
        assert_eq!(DataFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn name_is_file_stem() {
        assert_eq!(dataset_name(Path::new("/data/q1_sales.csv")), "q1_sales");
    }
}
