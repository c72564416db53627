//! Dependency extraction for formula bodies.

use super::ErrorCode;
use super::cell_ref::CellRef;
use super::expr::parse;
use super::token::tokenize;

/// Extract the cells a formula body references, in order of appearance.
///
/// Fails with the same code evaluation would report for a malformed body.
pub fn extract_dependencies(body: &str) -> Result<Vec<CellRef>, ErrorCode> {
    Ok(parse(&tokenize(body))?.references())
}
