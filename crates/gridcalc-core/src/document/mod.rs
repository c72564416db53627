//! Sheet state and evaluation (UI-agnostic).

mod eval;
mod io;
mod state;

pub(crate) use eval::display_cell;
pub use state::Sheet;
