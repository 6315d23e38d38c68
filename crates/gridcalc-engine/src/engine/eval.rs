//! Postfix evaluation of a single cell.
//!
//! The evaluator knows nothing about other cells: reference tokens are
//! turned into coordinates and handed to a lookup callback, which owns
//! recursion and cycle bookkeeping.

use tracing::trace;

use super::{CellRef, Expression, Token};
use crate::error::{EvalError, Result};

/// Evaluate `expr`, the expression of cell `at`, in a `rows x cols` grid.
///
/// `lookup` receives the resolved coordinates and the reference token
/// and returns the referenced cell's value.
pub fn evaluate_postfix<F>(
    at: CellRef,
    expr: &Expression,
    (rows, cols): (usize, usize),
    mut lookup: F,
) -> Result<f64>
where
    F: FnMut(CellRef, &str) -> Result<f64>,
{
    let mut stack: Vec<f64> = Vec::with_capacity(expr.tokens().len());

    for token in expr.tokens() {
        trace!(cell = %at, %token, depth = stack.len(), "postfix token");
        match token {
            Token::Number(n) => stack.push(*n),
            Token::Binary(op) => {
                let (rhs, lhs) = match (stack.pop(), stack.pop()) {
                    (Some(rhs), Some(lhs)) => (rhs, lhs),
                    _ => return Err(underflow(at, expr, op.symbol())),
                };
                stack.push(op.apply(lhs, rhs));
            }
            Token::Unary(op) => {
                let operand = stack.pop().ok_or_else(|| underflow(at, expr, op.symbol()))?;
                stack.push(op.apply(operand));
            }
            Token::Reference(text) => {
                let target = CellRef::resolve(text, rows, cols)
                    .map_err(|e| EvalError::reference(at, text, e))?;
                stack.push(lookup(target, text.as_str())?);
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        rest => Err(EvalError::ArityMismatch {
            at,
            expression: expr.text().to_string(),
            remaining: rest.len(),
        }),
    }
}

fn underflow(at: CellRef, expr: &Expression, operator: &str) -> EvalError {
    EvalError::StackUnderflow {
        at,
        expression: expr.text().to_string(),
        operator: operator.to_string(),
    }
}
