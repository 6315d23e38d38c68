//! Error types for Gridcalc core.

use thiserror::Error;

use gridcalc_engine::engine::CellRef;
use gridcalc_engine::{EvalError, GridError};

/// Problems with the sheet description itself, found before evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Input is empty: expected a '<columns> <rows>' header line")]
    MissingHeader,

    #[error("No. of arguments in the first line of input is not 2 (found {found})")]
    HeaderArity { found: usize },

    #[error("The given row or column argument `{value}` is not a number")]
    InvalidDimension { value: String },

    #[error("Column size cannot be 0")]
    ZeroColumns,

    #[error("Row size cannot be 0")]
    ZeroRows,

    #[error("Row size cannot be greater than 26 (got {rows})")]
    TooManyRows { rows: usize },

    #[error("The given number of cell values do not match with the given spreadsheet size: more than {expected} expressions")]
    TooManyCells { expected: usize },

    #[error("The given number of cell values do not match with the given spreadsheet size: expected {expected}, found {found}")]
    TooFewCells { expected: usize, found: usize },

    #[error("Expression for cell {at} (line {line}) is empty")]
    EmptyExpression { line: usize, at: CellRef },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Errors that can occur in Gridcalc
#[derive(Error, Debug)]
pub enum GridcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("Sheet has not been calculated")]
    NotCalculated,
}

pub type Result<T> = std::result::Result<T, GridcalcError>;
