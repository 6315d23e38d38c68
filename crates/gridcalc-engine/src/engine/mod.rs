//! Spreadsheet engine API.
//!
//! This module provides the evaluation engine for a grid of postfix cells:
//!
//! - [`Cell`], [`CellStatus`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`Expression`], [`Token`] - Token classification of cell expressions
//! - [`evaluate_postfix`] - Stack evaluation of a single expression
//! - [`Grid::resolve`], [`Grid::calculate`] - Recursive, memoized evaluation
//! - [`EvalPath`], [`Cycle`] - Cycle detection state and reports
//! - [`format_number`] - Format values for output

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod eval;
mod format;
mod stack;
mod token;

pub use cell::{Cell, CellStatus, Grid};
pub use cell_ref::{CellRef, MAX_ROWS};
pub use cycle::{Cycle, EvalPath};
pub use eval::evaluate_postfix;
pub use format::format_number;
pub use token::{BinaryOp, Expression, Token, UnaryOp};
