//! gridcalc-core - Sheet model, evaluation pass and storage.

pub mod config;
pub mod document;
pub mod error;
pub mod storage;

pub use config::LoadConfig;
pub use document::Sheet;
pub use error::{GridcalcError, Result};

pub use gridcalc_engine::engine::{CellRef, CellValue, ErrorCode};
