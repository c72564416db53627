use gridcalc_engine::engine::{Cell, CellRef, CellValue, Grid};

/// A fully evaluated sheet.
///
/// The grid is built once from raw cell text and never resized. Construction
/// runs the evaluation pass, so every cell of a `Sheet` holds a terminal
/// value.
#[derive(Debug)]
pub struct Sheet {
    pub(crate) grid: Grid,
}

impl Sheet {
    /// Build and evaluate a sheet from rows of raw cell text.
    pub fn new<R, S>(raw: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sheet = Sheet {
            grid: Grid::from_raw(raw),
        };
        sheet.evaluate_all();
        sheet
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, cell_ref: CellRef) -> Option<&Cell> {
        self.grid.get(cell_ref)
    }

    /// Evaluated value of a cell, `None` outside the grid.
    pub fn value(&self, cell_ref: CellRef) -> Option<&CellValue> {
        self.grid.get(cell_ref)?.value()
    }

    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    /// Evaluated values, row by row.
    pub fn values(&self) -> Vec<Vec<Option<CellValue>>> {
        self.grid
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| cell.value().copied()).collect())
            .collect()
    }
}
