//! Error types for the evaluation engine.

use thiserror::Error;

use crate::engine::{CellRef, Cycle};

/// Why a reference token could not be turned into grid coordinates.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("not a single row letter followed by a column number")]
    Malformed,

    #[error("outside the {rows}x{cols} grid")]
    OutOfBounds { rows: usize, cols: usize },
}

/// A grid that cannot be built from the supplied expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid size {rows}x{cols}: rows must be 1..=26 and columns at least 1")]
    Dimensions { rows: usize, cols: usize },

    #[error("grid needs {expected} expressions but {found} were supplied")]
    CellCount { expected: usize, found: usize },

    #[error("expression for cell {at} is empty")]
    EmptyExpression { at: CellRef },
}

/// Errors that abort evaluation of a grid.
///
/// Every variant names the cell whose expression failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Wrong cell reference `{token}` in cell {at}")]
    MalformedReference { at: CellRef, token: String },

    #[error("Wrong cell reference `{token}` in cell {at}: outside the {rows}x{cols} grid")]
    ReferenceOutOfBounds {
        at: CellRef,
        token: String,
        rows: usize,
        cols: usize,
    },

    #[error("Mismatch of operands and operator in expression `{expression}` at cell {at}: `{operator}` has too few operands")]
    StackUnderflow {
        at: CellRef,
        expression: String,
        operator: String,
    },

    #[error("Mismatch of operands and operator in expression `{expression}` at cell {at}: {remaining} values left on the stack")]
    ArityMismatch {
        at: CellRef,
        expression: String,
        remaining: usize,
    },

    #[error("{0}")]
    CyclicDependency(Box<Cycle>),
}

impl EvalError {
    /// Attach the referencing cell and token to a resolver failure.
    pub fn reference(at: CellRef, token: &str, err: ReferenceError) -> EvalError {
        let token = token.to_string();
        match err {
            ReferenceError::Malformed => EvalError::MalformedReference { at, token },
            ReferenceError::OutOfBounds { rows, cols } => EvalError::ReferenceOutOfBounds {
                at,
                token,
                rows,
                cols,
            },
        }
    }

    /// The cell whose expression triggered the failure.
    pub fn cell(&self) -> CellRef {
        match self {
            EvalError::MalformedReference { at, .. }
            | EvalError::ReferenceOutOfBounds { at, .. }
            | EvalError::StackUnderflow { at, .. }
            | EvalError::ArityMismatch { at, .. } => *at,
            EvalError::CyclicDependency(cycle) => cycle.trigger,
        }
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
