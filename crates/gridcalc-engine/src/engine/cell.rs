//! Cell data structures for the spreadsheet grid.
//!
//! This module provides the core data types for representing cells:
//! - [`CellType`] - Classification of raw cell text (number, empty, formula or invalid)
//! - [`ErrorCode`] - Terminal error states and their rendered tokens
//! - [`CellValue`] - The terminal evaluated state of a cell
//! - [`Cell`] - Raw text plus a write-once evaluated state
//! - [`Grid`] - Ragged rows of cells, indexed by [`CellRef`]

use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::fmt;
use thiserror::Error;

use super::cell_ref::CellRef;

/// Prefix marking a formula cell.
pub const FORMULA_PREFIX: char = '=';

/// Raw text of an empty cell.
pub const EMPTY_MARKER: &str = "[]";

/// Errors a cell can evaluate to.
///
/// `Display` renders the token written out for the cell. Several codes share
/// the `#ERROR` token.
#[derive(Error, Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ErrorCode {
    #[error("#INVVAL")]
    InvalidInput,
    #[error("#MISSOP")]
    MissingOperator,
    #[error("#ERROR")]
    GenericError,
    #[error("#ERROR")]
    DivByZero,
    #[error("#ERROR")]
    Cycle,
    #[error("#ERROR")]
    BadReference,
}

/// The type of content stored in a cell, derived from its raw text alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    Number(i64),
    Empty,
    /// Formula body, without the leading `=`.
    Formula(String),
    Invalid,
}

impl CellType {
    /// Classify raw cell text.
    /// - Parses as an `i64` -> Number
    /// - `[]` -> Empty
    /// - Starts with '=' -> Formula (without the '=')
    /// - Otherwise -> Invalid
    pub fn classify(raw: &str) -> CellType {
        if let Ok(n) = raw.parse::<i64>() {
            return CellType::Number(n);
        }

        if let Some(body) = raw.strip_prefix(FORMULA_PREFIX) {
            return CellType::Formula(body.to_string());
        }

        if raw == EMPTY_MARKER {
            return CellType::Empty;
        }

        CellType::Invalid
    }
}

/// Terminal evaluated state of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Number(i64),
    Error(ErrorCode),
}

impl CellValue {
    pub fn as_result(&self) -> Result<i64, ErrorCode> {
        match *self {
            CellValue::Number(n) => Ok(n),
            CellValue::Error(code) => Err(code),
        }
    }
}

impl From<Result<i64, ErrorCode>> for CellValue {
    fn from(result: Result<i64, ErrorCode>) -> Self {
        match result {
            Ok(n) => CellValue::Number(n),
            Err(code) => CellValue::Error(code),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Error(code) => write!(f, "{}", code),
        }
    }
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug)]
pub struct Cell {
    raw: String,
    contents: CellType,
    value: OnceCell<CellValue>,
}

impl Cell {
    pub fn new(raw: &str) -> Cell {
        Cell {
            raw: raw.to_string(),
            contents: CellType::classify(raw),
            value: OnceCell::new(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn contents(&self) -> &CellType {
        &self.contents
    }

    /// The terminal state, if the cell has been evaluated.
    pub fn value(&self) -> Option<&CellValue> {
        self.value.get()
    }

    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }

    pub fn is_formula(&self) -> bool {
        matches!(self.contents, CellType::Formula(_))
    }

    /// Record the terminal state. The first write wins; later writes are
    /// ignored and the stored value is returned.
    pub(crate) fn settle(&self, value: CellValue) -> CellValue {
        *self.value.get_or_init(|| value)
    }
}

/// Rectangular-ish grid of cells. Rows may differ in length.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Build a grid from raw cell text. Nothing is evaluated yet.
    pub fn from_raw<R, S>(raw: R) -> Grid
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = raw
            .into_iter()
            .map(|row| row.into_iter().map(|s| Cell::new(s.as_ref())).collect())
            .collect();
        Grid { rows }
    }

    pub fn get(&self, cell_ref: CellRef) -> Option<&Cell> {
        self.rows.get(cell_ref.row)?.get(cell_ref.col)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = CellRef> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| (0..cells.len()).map(move |col| CellRef::new(row, col)))
    }
}
