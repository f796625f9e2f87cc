use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("need at least 2 usable samples to compare, got {usable}")]
    InsufficientData { usable: usize },
}
