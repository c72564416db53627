use super::Sheet;
use crate::config::LoadConfig;
use crate::error::Result;
use crate::storage::{parse_sheet, parse_sheet_content, write_sheet};
use log::debug;
use std::path::Path;

impl Sheet {
    /// Parse and evaluate sheet text.
    pub fn from_content(content: &str, config: &LoadConfig) -> Self {
        Sheet::new(parse_sheet_content(content, config))
    }

    /// Read, parse and evaluate a sheet file.
    pub fn load(path: &Path, config: &LoadConfig) -> Result<Self> {
        let raw = parse_sheet(path, config)?;
        debug!("loaded {} rows from {}", raw.len(), path.display());
        Ok(Sheet::new(raw))
    }

    /// Write the evaluated sheet to a file, separating cells with
    /// `config.separator`.
    pub fn save(&self, path: &Path, config: &LoadConfig) -> Result<()> {
        write_sheet(path, self, config)
    }
}
