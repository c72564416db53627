//! Error types for Gridcalc core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, evaluating or saving a sheet.
///
/// Per-cell problems are never reported here; they end up as
/// [`gridcalc_engine::engine::ErrorCode`] values inside the sheet.
#[derive(Error, Debug)]
pub enum GridcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Refusing to read {}: file too large ({size} bytes, max {max})", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, GridcalcError>;
