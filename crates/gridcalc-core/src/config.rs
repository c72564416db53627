//! Load configuration.
//!
//! Read from TOML, e.g.
//!
//! ```toml
//! separator = " "
//! max_file_bytes = 1048576
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{GridcalcError, Result};

/// 16 MiB
pub const DEFAULT_MAX_FILE_BYTES: u64 = 16 * 1_048_576;

/// Upper bound for the config file itself.
const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Character between cells on a line.
    pub separator: char,
    /// Sheet files larger than this are rejected before reading.
    pub max_file_bytes: u64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            separator: ' ',
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl LoadConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_bounded(path, MAX_CONFIG_FILE_BYTES)?;
        Self::from_toml_str(&content)
    }
}

/// Read a file to a string, refusing anything larger than `max` bytes.
pub(crate) fn read_bounded(path: &Path, max: u64) -> Result<String> {
    let size = fs::metadata(path)?.len();
    if size > max {
        return Err(GridcalcError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max,
        });
    }
    Ok(fs::read_to_string(path)?)
}
