//! gridcalc - Evaluate plain-text grids of integers and arithmetic formulas.
//!
//! ```
//! use gridcalc::{CellRef, CellValue, LoadConfig, Sheet};
//!
//! let sheet = Sheet::from_content("5 =A1+3 [] =B1*2", &LoadConfig::default());
//! assert_eq!(sheet.value(CellRef::new(0, 3)), Some(&CellValue::Number(16)));
//! ```

pub use gridcalc_core::{
    CellRef, CellValue, ErrorCode, GridcalcError, LoadConfig, Result, Sheet, config, document,
    error, storage,
};
pub use gridcalc_engine::engine;
