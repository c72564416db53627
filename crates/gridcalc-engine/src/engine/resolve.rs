//! On-demand cell resolution with cycle detection.
//!
//! Resolving a formula cell evaluates its expression, which in turn needs
//! every cell it references. Pending formulas are kept on an explicit stack
//! of frames rather than the call stack, so reference chains are bounded by
//! the grid size, not by thread stack size. The cells currently being
//! evaluated are mirrored in an [`ActivePath`]; meeting one of them again
//! means the formula depends on itself.

use log::{debug, trace};
use std::collections::HashSet;

use super::ErrorCode;
use super::cell::{Cell, CellType, CellValue, Grid};
use super::cell_ref::CellRef;
use super::expr::{Expr, compile};
use super::token::tokenize;

/// Formula cells under evaluation, in entry order.
#[derive(Debug, Default)]
pub struct ActivePath {
    visiting: HashSet<CellRef>,
    path: Vec<CellRef>,
}

impl ActivePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell_ref: CellRef) -> bool {
        self.visiting.contains(&cell_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    fn push(&mut self, cell_ref: CellRef) {
        self.visiting.insert(cell_ref);
        self.path.push(cell_ref);
    }

    fn pop(&mut self) {
        if let Some(cell_ref) = self.path.pop() {
            self.visiting.remove(&cell_ref);
        }
    }

    /// The part of the path that loops back to `cell_ref`.
    fn cycle_from(&self, cell_ref: CellRef) -> &[CellRef] {
        let start = self
            .path
            .iter()
            .position(|c| *c == cell_ref)
            .unwrap_or(0);
        &self.path[start..]
    }
}

/// A formula waiting for its references to settle.
struct Frame<'g> {
    cell_ref: CellRef,
    cell: &'g Cell,
    body: &'g str,
    expr: Result<Expr, ErrorCode>,
}

impl<'g> Frame<'g> {
    fn new(cell_ref: CellRef, cell: &'g Cell, body: &'g str) -> Self {
        Frame {
            cell_ref,
            cell,
            body,
            expr: compile(&tokenize(body)),
        }
    }
}

enum Step<'g> {
    Done(Result<i64, ErrorCode>),
    /// An unevaluated formula must settle before evaluation can go on.
    Need(CellRef, &'g Cell, &'g str),
}

/// Settle a non-formula cell from its raw text. `None` for formulas.
fn settle_literal(cell: &Cell) -> Option<Result<i64, ErrorCode>> {
    let result = match cell.contents() {
        CellType::Number(n) => Ok(*n),
        CellType::Empty => Ok(0),
        CellType::Invalid => Err(ErrorCode::InvalidInput),
        CellType::Formula(_) => return None,
    };
    Some(cell.settle(CellValue::from(result)).as_result())
}

fn cycle_error(cell_ref: CellRef, path: &ActivePath) -> ErrorCode {
    debug!(
        "circular reference: {} -> {}",
        path.cycle_from(cell_ref)
            .iter()
            .map(CellRef::to_string)
            .collect::<Vec<_>>()
            .join(" -> "),
        cell_ref
    );
    ErrorCode::Cycle
}

/// Evaluate `expr` against what is settled so far.
///
/// Operands are read left to right, so the first unsettled formula met is
/// the one a depth-first evaluation would descend into next.
fn step<'g>(expr: &Expr, grid: &'g Grid, path: &ActivePath) -> Step<'g> {
    let mut need = None;
    let result = expr.eval(&mut |dep: CellRef| {
        let Some(cell) = grid.get(dep) else {
            debug!("{} is outside the grid", dep);
            return Err(ErrorCode::BadReference);
        };
        if let Some(value) = cell.value() {
            return value.as_result();
        }
        if path.contains(dep) {
            return Err(cycle_error(dep, path));
        }
        match cell.contents() {
            CellType::Formula(body) => {
                need = Some((dep, cell, body.as_str()));
                // Stops evaluation; the value is discarded.
                Err(ErrorCode::GenericError)
            }
            _ => settle_literal(cell).unwrap_or(Err(ErrorCode::GenericError)),
        }
    });

    match need {
        Some((dep, cell, body)) => Step::Need(dep, cell, body),
        None => Step::Done(result),
    }
}

/// Resolve a cell to its terminal value, evaluating it (and whatever it
/// references) if that has not happened yet.
///
/// - Outside the grid, or past the end of a short row: [`ErrorCode::BadReference`].
/// - Already evaluated: the stored value.
/// - Already on `path`: [`ErrorCode::Cycle`]. The cell itself is not settled
///   here; the frame that is evaluating it records the outcome.
///
/// Every other outcome is written to the cell before it is returned, so each
/// cell is evaluated at most once. `path` is left as it was given.
pub fn resolve(cell_ref: CellRef, grid: &Grid, path: &mut ActivePath) -> Result<i64, ErrorCode> {
    let Some(cell) = grid.get(cell_ref) else {
        debug!("{} is outside the grid", cell_ref);
        return Err(ErrorCode::BadReference);
    };

    if let Some(value) = cell.value() {
        return value.as_result();
    }

    if path.contains(cell_ref) {
        return Err(cycle_error(cell_ref, path));
    }

    let body = match cell.contents() {
        CellType::Formula(body) => body.as_str(),
        _ => return settle_literal(cell).unwrap_or(Err(ErrorCode::GenericError)),
    };

    let mut frames = vec![Frame::new(cell_ref, cell, body)];
    path.push(cell_ref);

    while let Some(frame) = frames.last() {
        let outcome = match &frame.expr {
            Ok(expr) => step(expr, grid, path),
            Err(code) => Step::Done(Err(*code)),
        };

        match outcome {
            Step::Need(dep, dep_cell, dep_body) => {
                frames.push(Frame::new(dep, dep_cell, dep_body));
                path.push(dep);
            }
            Step::Done(result) => {
                trace!("{} = {} -> {}", frame.cell_ref, frame.body, CellValue::from(result));
                frame.cell.settle(CellValue::from(result));
                frames.pop();
                path.pop();
            }
        }
    }

    cell.value().map_or(Err(ErrorCode::GenericError), CellValue::as_result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::from_raw(rows.iter().map(|r| r.iter().copied()))
    }

    fn at(name: &str) -> CellRef {
        name.parse().unwrap()
    }

    #[test]
    fn test_resolve_literals() {
        let g = grid(&[&["5", "[]", "x"]]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A1"), &g, &mut path), Ok(5));
        assert_eq!(resolve(at("B1"), &g, &mut path), Ok(0));
        assert_eq!(resolve(at("C1"), &g, &mut path), Err(ErrorCode::InvalidInput));
        assert!(path.is_empty());
    }

    #[test]
    fn test_resolve_out_of_bounds() {
        let g = grid(&[&["1", "2"], &["3"]]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A3"), &g, &mut path), Err(ErrorCode::BadReference));
        assert_eq!(resolve(at("C1"), &g, &mut path), Err(ErrorCode::BadReference));
        // Row 2 is shorter than row 1.
        assert_eq!(resolve(at("B2"), &g, &mut path), Err(ErrorCode::BadReference));
    }

    #[test]
    fn test_resolve_chain_settles_dependencies() {
        let g = grid(&[&["=B1*2", "=C1+1", "4"]]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A1"), &g, &mut path), Ok(10));
        assert_eq!(g.get(at("B1")).unwrap().value(), Some(&CellValue::Number(5)));
        assert_eq!(g.get(at("C1")).unwrap().value(), Some(&CellValue::Number(4)));
        assert!(path.is_empty());
    }

    #[test]
    fn test_resolve_self_cycle() {
        let g = grid(&[&["=A1+1"]]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A1"), &g, &mut path), Err(ErrorCode::Cycle));
        assert_eq!(
            g.get(at("A1")).unwrap().value(),
            Some(&CellValue::Error(ErrorCode::Cycle))
        );
        assert!(path.is_empty());
    }

    #[test]
    fn test_resolve_mutual_cycle_marks_both() {
        let g = grid(&[&["=B1+1", "=A1+1"]]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A1"), &g, &mut path), Err(ErrorCode::Cycle));
        assert_eq!(
            g.get(at("B1")).unwrap().value(),
            Some(&CellValue::Error(ErrorCode::Cycle))
        );
        assert_eq!(resolve(at("B1"), &g, &mut path), Err(ErrorCode::Cycle));
    }

    #[test]
    fn test_repeated_reference_is_not_a_cycle() {
        let g = grid(&[&["=B1+B1", "=C1*C1", "3"]]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A1"), &g, &mut path), Ok(18));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let g = grid(&[&["=B1+C1", "=D1+1", "=D1*2", "5"]]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A1"), &g, &mut path), Ok(16));
    }

    #[test]
    fn test_error_propagates_through_chain() {
        let g = grid(&[&["=B1+1", "=C1+1", "oops"]]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A1"), &g, &mut path), Err(ErrorCode::InvalidInput));
        assert_eq!(
            g.get(at("B1")).unwrap().value(),
            Some(&CellValue::Error(ErrorCode::InvalidInput))
        );
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let cells: Vec<String> = (0..10_000)
            .map(|col| match col {
                9_999 => "1".to_string(),
                _ => format!("={}+1", CellRef::new(0, col + 1)),
            })
            .collect();
        let g = Grid::from_raw(vec![cells]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A1"), &g, &mut path), Ok(10_000));
        assert!(path.is_empty());
    }

    #[test]
    fn test_first_error_wins_over_later_cycle() {
        // A1 stops at the invalid B1 and never reaches C1, so C1 later reads
        // the settled A1 instead of finding it on the path.
        let g = grid(&[&["=B1+C1", "x", "=A1+1"]]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A1"), &g, &mut path), Err(ErrorCode::InvalidInput));
        assert_eq!(resolve(at("C1"), &g, &mut path), Err(ErrorCode::InvalidInput));
    }

    #[test]
    fn test_resolve_is_memoized() {
        let g = grid(&[&["=1+1"]]);
        let mut path = ActivePath::new();
        assert_eq!(resolve(at("A1"), &g, &mut path), Ok(2));
        assert!(g.get(at("A1")).unwrap().is_evaluated());
        assert_eq!(resolve(at("A1"), &g, &mut path), Ok(2));
    }
}
