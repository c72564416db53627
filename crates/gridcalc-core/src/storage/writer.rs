//! Writer for evaluated sheets

use crate::config::LoadConfig;
use crate::document::{Sheet, display_cell};
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write an evaluated sheet to a file
pub fn write_sheet(path: &Path, sheet: &Sheet, config: &LoadConfig) -> Result<()> {
    let content = write_sheet_content(sheet, config);
    fs::write(path, content)?;
    Ok(())
}

/// Render an evaluated sheet, one line per row with cells separated by
/// `config.separator`, the same separator the reader splits on.
pub fn write_sheet_content(sheet: &Sheet, config: &LoadConfig) -> String {
    let separator = config.separator.to_string();
    let mut out = String::new();
    for row in sheet.grid().rows() {
        let line: Vec<String> = row.iter().map(display_cell).collect();
        out.push_str(&line.join(&separator));
        out.push('\n');
    }
    out
}
