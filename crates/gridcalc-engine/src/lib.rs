//! gridcalc_engine - Postfix cell evaluation with references and cycle detection.

pub mod engine;
pub mod error;

pub use error::{EvalError, GridError, ReferenceError, Result};
