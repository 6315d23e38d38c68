//! Dependency-aware evaluation across cells.
//!
//! [`Grid::resolve`] computes a cell, recursively resolving the cells its
//! expression references. Finished cells are memoized; a cell seen again
//! while it is still on the evaluation path is a cyclic dependency.

use std::rc::Rc;

use tracing::{debug, info};

use super::cycle::{Cycle, EvalPath};
use super::eval::evaluate_postfix;
use super::stack::ensure_sufficient_stack;
use super::{CellRef, CellStatus, Grid};
use crate::error::{EvalError, Result};

impl Grid {
    /// Resolve the value of the cell at `at`.
    ///
    /// `path` holds the cells currently being evaluated above this call.
    /// A top-level caller passes a fresh, empty path.
    pub fn resolve(&mut self, at: CellRef, path: &mut EvalPath) -> Result<f64> {
        let Some(idx) = self.index(at) else {
            return Err(EvalError::ReferenceOutOfBounds {
                at,
                token: at.to_string(),
                rows: self.rows(),
                cols: self.cols(),
            });
        };

        let cell = self.cell(idx);
        match (cell.status, cell.value) {
            (CellStatus::Done, Some(value)) => return Ok(value),
            (CellStatus::InProgress, _) if path.contains(&at) => {
                return Err(self.cycle_error(at, path));
            }
            _ => {}
        }

        let expression = Rc::clone(&cell.expression);
        self.cell_mut(idx).status = CellStatus::InProgress;
        path.push(at);
        self.evaluations += 1;
        debug!(cell = %at, expression = %expression, depth = path.len(), "evaluating cell");

        let dims = (self.rows(), self.cols());
        let value = evaluate_postfix(at, &expression, dims, |target, token| {
            self.cell_mut(idx).triggering_reference = Some(token.to_string());
            ensure_sufficient_stack(|| self.resolve(target, &mut *path))
        })?;

        let cell = self.cell_mut(idx);
        cell.value = Some(value);
        cell.status = CellStatus::Done;
        path.pop();
        debug!(cell = %at, value, "cell done");
        Ok(value)
    }

    /// Evaluate every cell in row-major order.
    ///
    /// Stops at the first failure; cells evaluated before it keep their values.
    pub fn calculate(&mut self) -> Result<()> {
        for idx in 0..self.len() {
            let at = self.cell(idx).at;
            let mut path = EvalPath::new();
            self.resolve(at, &mut path)?;
        }
        info!(
            cells = self.len(),
            evaluations = self.evaluations,
            "grid calculated"
        );
        Ok(())
    }

    fn cycle_error(&self, revisited: CellRef, path: &EvalPath) -> EvalError {
        // The innermost cell on the path is the one whose reference led back here.
        let trigger = path.last().unwrap_or(revisited);
        let trigger_cell = self.get(trigger);
        let cycle = Cycle {
            trigger,
            trigger_expression: trigger_cell
                .map(|c| c.expression.text().to_string())
                .unwrap_or_default(),
            reference: trigger_cell
                .and_then(|c| c.triggering_reference.clone())
                .unwrap_or_else(|| revisited.to_string()),
            revisited,
            revisited_expression: self
                .get(revisited)
                .map(|c| c.expression.text().to_string())
                .unwrap_or_default(),
            chain: path.loop_through(revisited),
        };
        debug!(
            trigger = %cycle.trigger,
            revisited = %cycle.revisited,
            reference = %cycle.reference,
            "cyclic dependency"
        );
        EvalError::CyclicDependency(Box::new(cycle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(rows: usize, cols: usize, cells: &[&str]) -> Grid {
        Grid::new(rows, cols, cells.iter().copied()).unwrap()
    }

    #[test]
    fn test_end_to_end_two_by_two() {
        let mut g = grid(2, 2, &["3 4 +", "10", "A1 A2 *", "5 --"]);
        g.calculate().unwrap();
        assert_eq!(g.values().unwrap(), vec![7.0, 10.0, 70.0, 4.0]);
        assert!(g.cells().all(|c| c.status() == CellStatus::Done));
    }

    #[test]
    fn test_forward_references() {
        let mut g = grid(1, 3, &["A2 A3 +", "A3 2 *", "5"]);
        g.calculate().unwrap();
        assert_eq!(g.values().unwrap(), vec![15.0, 10.0, 5.0]);
    }

    #[test]
    fn test_memoized_value_is_reused() {
        let mut g = grid(1, 3, &["A3", "A3 A3 +", "2 3 *"]);
        let mut path = EvalPath::new();
        let first = g.resolve(CellRef::new(0, 2), &mut path).unwrap();
        assert_eq!(g.evaluation_count(), 1);
        let again = g.resolve(CellRef::new(0, 2), &mut EvalPath::new()).unwrap();
        assert_eq!(first.to_bits(), again.to_bits());
        assert_eq!(g.evaluation_count(), 1);

        g.calculate().unwrap();
        assert_eq!(g.evaluation_count(), 3);
        assert!(path.is_empty());
    }

    #[test]
    fn test_two_cell_cycle() {
        let mut g = grid(1, 2, &["A2", "A1"]);
        let err = g.calculate().unwrap_err();
        let EvalError::CyclicDependency(cycle) = err else {
            panic!("expected cycle, got {err:?}");
        };
        assert_eq!(cycle.trigger, CellRef::new(0, 1));
        assert_eq!(cycle.revisited, CellRef::new(0, 0));
        assert_eq!(cycle.reference, "A1");
        assert_eq!(
            cycle.chain,
            vec![CellRef::new(0, 0), CellRef::new(0, 1), CellRef::new(0, 0)]
        );
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let mut g = grid(1, 1, &["A1 1 +"]);
        let err = g.calculate().unwrap_err();
        assert!(matches!(err, EvalError::CyclicDependency(ref c) if c.chain.len() == 2));
        assert_eq!(err.cell(), CellRef::new(0, 0));
    }

    #[test]
    fn test_cycle_names_the_token_that_closed_it() {
        // A1 finishes B1 first, then loops through C1.
        let mut g = grid(3, 1, &["B1 C1 +", "1", "A1"]);
        let err = g.calculate().unwrap_err();
        let EvalError::CyclicDependency(cycle) = err else {
            panic!("expected cycle, got {err:?}");
        };
        assert_eq!(cycle.trigger, CellRef::new(2, 0));
        assert_eq!(cycle.reference, "A1");
        assert_eq!(g.get(CellRef::new(0, 0)).unwrap().triggering_reference(), Some("C1"));
        assert_eq!(g.get(CellRef::new(2, 0)).unwrap().triggering_reference(), Some("A1"));
        assert_eq!(g.get(CellRef::new(1, 0)).unwrap().triggering_reference(), None);
        assert_eq!(
            cycle.chain,
            vec![CellRef::new(0, 0), CellRef::new(2, 0), CellRef::new(0, 0)]
        );
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let mut g = grid(2, 2, &["A2 B1 +", "B2", "B2", "1"]);
        g.calculate().unwrap();
        assert_eq!(g.values().unwrap(), vec![2.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_errors_in_referenced_cells_propagate() {
        let mut g = grid(2, 2, &["B2 1 +", "1", "1", "C1"]);
        let err = g.calculate().unwrap_err();
        assert_eq!(
            err,
            EvalError::ReferenceOutOfBounds {
                at: CellRef::new(1, 1),
                token: "C1".to_string(),
                rows: 2,
                cols: 2,
            }
        );
    }

    #[test]
    fn test_stack_errors_from_grid() {
        let mut g = grid(1, 1, &["+"]);
        assert!(matches!(g.calculate(), Err(EvalError::StackUnderflow { .. })));

        let mut g = grid(1, 1, &["3 4"]);
        assert!(matches!(g.calculate(), Err(EvalError::ArityMismatch { remaining: 2, .. })));
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let cols = 20_000;
        let mut cells: Vec<String> = (1..cols).map(|c| format!("A{} ++", c + 1)).collect();
        cells.push("0".to_string());
        let mut g = Grid::new(1, cols, &cells).unwrap();
        g.calculate().unwrap();
        assert_eq!(g.get(CellRef::new(0, 0)).unwrap().value(), Some((cols - 1) as f64));
    }

    #[test]
    fn test_resolve_outside_grid() {
        let mut g = grid(1, 1, &["1"]);
        assert!(matches!(
            g.resolve(CellRef::new(3, 0), &mut EvalPath::new()),
            Err(EvalError::ReferenceOutOfBounds { .. })
        ));
    }
}
