use polars::prelude::DataFrame;

/// A named table taking part in a comparison.
///
/// Input order matters: the first dataset drives type inference.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub frame: DataFrame,
}

impl Dataset {
    pub fn new(name: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            name: name.into(),
            frame,
        }
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }
}
