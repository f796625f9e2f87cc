//! CLI library components for dataset comparison.

#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
pub mod summary;
