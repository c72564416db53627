use super::Sheet;
use gridcalc_engine::engine::{ActivePath, Cell, CellRef, CellType, EMPTY_MARKER, resolve};
use log::debug;

impl Sheet {
    /// Evaluate every cell.
    ///
    /// Numbers, empty cells and invalid text settle in a first linear pass;
    /// formulas are queued. Each queued formula that is still unevaluated
    /// afterwards (an earlier formula may have pulled it in) is then resolved
    /// from an empty active path.
    pub(crate) fn evaluate_all(&mut self) {
        let grid = &self.grid;
        let mut queue: Vec<CellRef> = Vec::new();
        let mut path = ActivePath::new();

        for cell_ref in grid.positions() {
            let Some(cell) = grid.get(cell_ref) else {
                continue;
            };
            if cell.is_formula() {
                queue.push(cell_ref);
            } else {
                // The outcome, error or not, is stored on the cell.
                let _ = resolve(cell_ref, grid, &mut path);
            }
        }

        debug!(
            "{} rows, {} cells, {} formulas queued",
            grid.row_count(),
            grid.cell_count(),
            queue.len()
        );

        let mut on_demand = 0usize;
        for cell_ref in queue {
            if grid.get(cell_ref).is_some_and(Cell::is_evaluated) {
                on_demand += 1;
                continue;
            }
            let _ = resolve(cell_ref, grid, &mut path);
        }

        debug!("{} formulas settled while resolving others", on_demand);
    }

    /// Get the display value for a cell: the number, the error token, or
    /// `[]` for an empty cell. Outside the grid this is an empty string.
    pub fn get_cell_display(&self, cell_ref: CellRef) -> String {
        match self.grid.get(cell_ref) {
            Some(cell) => display_cell(cell),
            None => String::new(),
        }
    }
}

pub(crate) fn display_cell(cell: &Cell) -> String {
    if matches!(cell.contents(), CellType::Empty) {
        return EMPTY_MARKER.to_string();
    }
    match cell.value() {
        Some(value) => value.to_string(),
        None => cell.raw().to_string(),
    }
}
