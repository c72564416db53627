//! gridcalc_engine - Formula engine for integer spreadsheets.

pub mod engine;
