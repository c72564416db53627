//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed row/column coordinates.
//!
//! # Examples
//!
//! ```
//! use gridcalc_engine::engine::CellRef;
//!
//! let cell: CellRef = "B3".parse().unwrap();
//! assert_eq!(cell.row, 2);  // 0-indexed
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::ErrorCode;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

/// Letters immediately followed by digits, nothing else.
pub(crate) fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").unwrap())
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Decode spreadsheet notation (e.g., "A1", "B2", "AA10").
    ///
    /// Anything that is not letters followed by digits, a zero row, or a
    /// column/row too large for `usize` is [`ErrorCode::BadReference`].
    pub fn parse_a1(name: &str) -> Result<CellRef, ErrorCode> {
        let caps = reference_re()
            .captures(name)
            .ok_or(ErrorCode::BadReference)?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut col_acc = 0usize;
        for c in letters.to_ascii_uppercase().bytes() {
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc
                .checked_mul(26)
                .and_then(|acc| acc.checked_add(digit))
                .ok_or(ErrorCode::BadReference)?;
        }
        let col = col_acc.checked_sub(1).ok_or(ErrorCode::BadReference)?;

        let row = numbers
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or(ErrorCode::BadReference)?;

        Ok(CellRef::new(row, col))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl std::str::FromStr for CellRef {
    type Err = ErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            CellRef::col_to_letters(self.col),
            self.row as u128 + 1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::CellRef;
    use crate::engine::ErrorCode;

    #[test]
    fn test_parse_a1_overflow_is_bad_reference() {
        let huge = format!("{}1", "Z".repeat(40));
        assert_eq!(CellRef::parse_a1(&huge), Err(ErrorCode::BadReference));

        let huge_row = format!("A{}", "9".repeat(40));
        assert_eq!(CellRef::parse_a1(&huge_row), Err(ErrorCode::BadReference));
    }

    #[test]
    fn test_col_to_letters_handles_max_usize() {
        let letters = CellRef::col_to_letters(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_col_to_letters() {
        assert_eq!(CellRef::col_to_letters(0), "A");
        assert_eq!(CellRef::col_to_letters(25), "Z");
        assert_eq!(CellRef::col_to_letters(26), "AA");
        assert_eq!(CellRef::col_to_letters(701), "ZZ");
        assert_eq!(CellRef::col_to_letters(702), "AAA");
    }

    #[test]
    fn test_round_trip() {
        for row in 0..60 {
            for col in 0..800 {
                let cell = CellRef::new(row, col);
                assert_eq!(cell.to_string().parse::<CellRef>(), Ok(cell));
            }
        }
    }
}
