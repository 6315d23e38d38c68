//! Evaluation path tracking and cycle reports.
//!
//! Every top-level resolution owns a fresh [`EvalPath`]. A cell is on the
//! path while it (and anything it references) is being evaluated; reaching
//! a cell that is already on the path means the references loop.

use std::collections::HashSet;
use std::fmt;

use super::CellRef;

/// Insertion-ordered set of the cells on the active recursion chain.
#[derive(Clone, Debug, Default)]
pub struct EvalPath {
    visiting: HashSet<CellRef>,
    order: Vec<CellRef>,
}

impl EvalPath {
    pub fn new() -> EvalPath {
        EvalPath::default()
    }

    /// Returns `false` if the cell was already on the path.
    pub fn push(&mut self, cell: CellRef) -> bool {
        if !self.visiting.insert(cell) {
            return false;
        }
        self.order.push(cell);
        true
    }

    pub fn pop(&mut self) -> Option<CellRef> {
        let cell = self.order.pop()?;
        self.visiting.remove(&cell);
        Some(cell)
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        self.visiting.contains(cell)
    }

    /// The innermost cell being evaluated.
    pub fn last(&self) -> Option<CellRef> {
        self.order.last().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellRef> {
        self.order.iter()
    }

    /// The loop closed by re-entering `cell`: from `cell` to the tail of the
    /// path and back to `cell`.
    pub fn loop_through(&self, cell: CellRef) -> Vec<CellRef> {
        let start = self.order.iter().position(|c| *c == cell).unwrap_or(0);
        let mut chain = self.order[start..].to_vec();
        chain.push(cell);
        chain
    }
}

/// A detected cyclic dependency.
#[derive(Clone, Debug, PartialEq)]
pub struct Cycle {
    /// Cell whose reference closed the loop.
    pub trigger: CellRef,
    pub trigger_expression: String,
    /// The reference token being resolved in `trigger`.
    pub reference: String,
    /// Cell that was already being evaluated.
    pub revisited: CellRef,
    pub revisited_expression: String,
    /// `revisited -> ... -> trigger -> revisited`.
    pub chain: Vec<CellRef>,
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cyclical dependency detected while calculating `{}` in expression `{}` at cell {}: \
             cell {} (`{}`) is already being calculated (",
            self.reference,
            self.trigger_expression,
            self.trigger,
            self.revisited,
            self.revisited_expression,
        )?;
        for (i, cell) in self.chain.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", cell)?;
        }
        f.write_str(")")
    }
}
