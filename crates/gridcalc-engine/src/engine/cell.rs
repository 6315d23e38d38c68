//! Cell data structures for the spreadsheet grid.
//!
//! - [`CellStatus`] - Where a cell is in its evaluation lifecycle
//! - [`Cell`] - A cell with its expression and cached evaluation state
//! - [`Grid`] - Dense row-major storage for every cell of a sheet

use std::rc::Rc;

use super::cell_ref::{CellRef, MAX_ROWS};
use super::token::Expression;
use crate::error::GridError;

/// Evaluation state of a cell.
///
/// `InProgress` means the cell is on the active recursion path; seeing it
/// again from that path is a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellStatus {
    #[default]
    Unvisited,
    InProgress,
    Done,
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(super) at: CellRef,
    pub(super) expression: Rc<Expression>,
    pub(super) value: Option<f64>,
    pub(super) status: CellStatus,
    /// Reference token this cell was resolving most recently.
    pub(super) triggering_reference: Option<String>,
}

impl Cell {
    pub fn new(at: CellRef, expression: &str) -> Cell {
        Cell {
            at,
            expression: Rc::new(Expression::parse(expression)),
            value: None,
            status: CellStatus::Unvisited,
            triggering_reference: None,
        }
    }

    pub fn at(&self) -> CellRef {
        self.at
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// The evaluated value, once the cell is `Done`.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn status(&self) -> CellStatus {
        self.status
    }

    pub fn triggering_reference(&self) -> Option<&str> {
        self.triggering_reference.as_deref()
    }
}

/// Upper bound on cells reserved up front; larger grids grow as cells arrive.
const MAX_PREALLOCATED_CELLS: usize = 1 << 16;

/// Every cell of a `rows x cols` sheet, stored row-major.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    pub(super) evaluations: usize,
}

impl Grid {
    /// Build a grid from row-major expression text.
    ///
    /// Exactly `rows * cols` non-blank expressions are required.
    pub fn new<I, S>(rows: usize, cols: usize, expressions: I) -> Result<Grid, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if rows == 0 || cols == 0 || rows > MAX_ROWS {
            return Err(GridError::Dimensions { rows, cols });
        }
        let expected = rows.checked_mul(cols).ok_or(GridError::Dimensions { rows, cols })?;

        let mut cells = Vec::with_capacity(expected.min(MAX_PREALLOCATED_CELLS));
        for (idx, text) in expressions.into_iter().enumerate() {
            if idx >= expected {
                return Err(GridError::CellCount {
                    expected,
                    found: idx + 1,
                });
            }
            let at = CellRef::new(idx / cols, idx % cols);
            let text = text.as_ref();
            if text.trim().is_empty() {
                return Err(GridError::EmptyExpression { at });
            }
            cells.push(Cell::new(at, text));
        }
        if cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                found: cells.len(),
            });
        }

        Ok(Grid {
            rows,
            cols,
            cells,
            evaluations: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(super) fn index(&self, at: CellRef) -> Option<usize> {
        (at.row < self.rows && at.col < self.cols).then(|| at.row * self.cols + at.col)
    }

    pub fn get(&self, at: CellRef) -> Option<&Cell> {
        self.index(at).map(|idx| &self.cells[idx])
    }

    pub(super) fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    pub(super) fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Final values in row-major order, or `None` while any cell is unevaluated.
    pub fn values(&self) -> Option<Vec<f64>> {
        self.cells
            .iter()
            .map(|cell| match cell.status {
                CellStatus::Done => cell.value,
                _ => None,
            })
            .collect()
    }

    /// How many times a cell expression has been run through the evaluator.
    pub fn evaluation_count(&self) -> usize {
        self.evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_lays_out_row_major() {
        let grid = Grid::new(2, 3, ["1", "2", "3", "4", "5", "6"]).unwrap();
        assert_eq!(grid.len(), 6);
        let b1 = grid.get(CellRef::new(1, 0)).unwrap();
        assert_eq!(b1.expression().text(), "4");
        assert_eq!(b1.at(), CellRef::new(1, 0));
        assert_eq!(b1.status(), CellStatus::Unvisited);
        assert_eq!(b1.value(), None);
        assert!(grid.get(CellRef::new(2, 0)).is_none());
        assert!(grid.get(CellRef::new(0, 3)).is_none());
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert_eq!(
            Grid::new(0, 1, ["1"]).unwrap_err(),
            GridError::Dimensions { rows: 0, cols: 1 }
        );
        assert_eq!(
            Grid::new(1, 0, Vec::<String>::new()).unwrap_err(),
            GridError::Dimensions { rows: 1, cols: 0 }
        );
        assert!(matches!(
            Grid::new(27, 1, vec!["1"; 27]),
            Err(GridError::Dimensions { rows: 27, .. })
        ));
    }

    #[test]
    fn test_new_rejects_wrong_cell_count() {
        assert_eq!(
            Grid::new(1, 2, ["1"]).unwrap_err(),
            GridError::CellCount {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            Grid::new(1, 2, ["1", "2", "3"]).unwrap_err(),
            GridError::CellCount {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_new_with_huge_dimensions_counts_cells() {
        assert_eq!(
            Grid::new(1, usize::MAX, ["1"]).unwrap_err(),
            GridError::CellCount {
                expected: usize::MAX,
                found: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_blank_expression() {
        assert_eq!(
            Grid::new(1, 2, ["1", "  "]).unwrap_err(),
            GridError::EmptyExpression {
                at: CellRef::new(0, 1)
            }
        );
    }

    #[test]
    fn test_values_absent_before_calculation() {
        let grid = Grid::new(1, 1, ["1"]).unwrap();
        assert_eq!(grid.values(), None);
    }
}
