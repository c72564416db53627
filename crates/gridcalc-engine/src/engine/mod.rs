//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Cell`], [`CellType`], [`CellValue`], [`Grid`] - Data structures for cell storage
//! - [`ErrorCode`] - Cell-level evaluation errors
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`tokenize`] - Split a formula body into operators, parentheses and operands
//! - [`evaluate`], [`compile`], [`parse`] - Precedence-climbing expression evaluation
//! - [`resolve`] - On-demand, memoized cell evaluation with cycle detection
//! - [`extract_dependencies`] - Parse formula dependencies

mod cell;
mod cell_ref;
mod deps;
mod expr;
mod resolve;
mod token;

pub use cell::{Cell, CellType, CellValue, EMPTY_MARKER, ErrorCode, FORMULA_PREFIX, Grid};
pub use cell_ref::CellRef;
pub use deps::extract_dependencies;
pub use expr::{Expr, compile, evaluate, parse};
pub use resolve::{ActivePath, resolve};
pub use token::{Operator, Token, has_operator, tokenize};
