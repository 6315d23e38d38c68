//! Reader for the sheet description format.
//!
//! ```text
//! <columns> <rows>
//! <expression for A1>
//! <expression for A2>
//! ...
//! ```
//!
//! Expressions follow in row-major order: every column of row A, then row B.

use std::io::BufRead;

use gridcalc_engine::engine::{CellRef, Grid, MAX_ROWS};
use tracing::{debug, info};

use crate::error::{LoadError, Result};

/// Parse sheet content from a string.
pub fn parse_sheet_content(content: &str) -> Result<Grid> {
    read_sheet(content.as_bytes())
}

/// Read a sheet description, stopping at the first malformed line.
pub fn read_sheet<R: BufRead>(reader: R) -> Result<Grid> {
    let mut lines = reader.lines();

    let header = lines.next().ok_or(LoadError::MissingHeader)??;
    let (cols, rows) = parse_header(&header)?;
    let expected = cols.checked_mul(rows).ok_or_else(|| LoadError::InvalidDimension {
        value: header.trim().to_string(),
    })?;
    debug!(cols, rows, "sheet header");

    // Sized by the lines actually read, never by the declared dimensions.
    let mut expressions = Vec::new();
    for (offset, line) in lines.enumerate() {
        let line = line?;
        let idx = expressions.len();
        if idx == expected {
            return Err(LoadError::TooManyCells { expected }.into());
        }
        if line.trim().is_empty() {
            return Err(LoadError::EmptyExpression {
                line: offset + 2,
                at: CellRef::new(idx / cols, idx % cols),
            }
            .into());
        }
        expressions.push(line);
    }
    if expressions.len() < expected {
        return Err(LoadError::TooFewCells {
            expected,
            found: expressions.len(),
        }
        .into());
    }

    let grid = Grid::new(rows, cols, &expressions).map_err(LoadError::from)?;
    info!(rows, cols, "sheet loaded");
    Ok(grid)
}

/// Parse `<columns> <rows>`.
fn parse_header(line: &str) -> std::result::Result<(usize, usize), LoadError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [cols, rows] = fields.as_slice() else {
        return Err(LoadError::HeaderArity {
            found: fields.len(),
        });
    };
    let cols = parse_dimension(cols)?;
    let rows = parse_dimension(rows)?;

    if cols == 0 {
        return Err(LoadError::ZeroColumns);
    }
    if rows == 0 {
        return Err(LoadError::ZeroRows);
    }
    if rows > MAX_ROWS {
        return Err(LoadError::TooManyRows { rows });
    }
    Ok((cols, rows))
}

fn parse_dimension(value: &str) -> std::result::Result<usize, LoadError> {
    value.parse::<usize>().map_err(|_| LoadError::InvalidDimension {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridcalcError;
    use pretty_assertions::assert_eq;

    fn load_err(content: &str) -> LoadError {
        match parse_sheet_content(content) {
            Err(GridcalcError::Load(e)) => e,
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_sheet() {
        let grid = parse_sheet_content("2 2\n3 4 +\n10\nA1 A2 *\n5 --\n").unwrap();
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.rows(), 2);
        let b1 = grid.get(CellRef::new(1, 0)).unwrap();
        assert_eq!(b1.expression().text(), "A1 A2 *");
    }

    #[test]
    fn test_parse_crlf() {
        let grid = parse_sheet_content("1 1\r\n4 ++\r\n").unwrap();
        assert_eq!(grid.get(CellRef::new(0, 0)).unwrap().expression().text(), "4 ++");
    }

    #[test]
    fn test_header_errors() {
        assert_eq!(load_err(""), LoadError::MissingHeader);
        assert_eq!(load_err("2\n1"), LoadError::HeaderArity { found: 1 });
        assert_eq!(load_err("1 2 3\n1"), LoadError::HeaderArity { found: 3 });
        assert_eq!(
            load_err("x 2\n1"),
            LoadError::InvalidDimension {
                value: "x".to_string()
            }
        );
        assert_eq!(
            load_err("2 -1\n1"),
            LoadError::InvalidDimension {
                value: "-1".to_string()
            }
        );
        assert_eq!(load_err("0 2\n1"), LoadError::ZeroColumns);
        assert_eq!(load_err("2 0\n1"), LoadError::ZeroRows);
        assert_eq!(load_err("1 27\n1"), LoadError::TooManyRows { rows: 27 });
    }

    #[test]
    fn test_cell_count_errors() {
        assert_eq!(
            load_err("1 2\n1\n"),
            LoadError::TooFewCells {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(load_err("1 1\n1\n2\n"), LoadError::TooManyCells { expected: 1 });
    }

    #[test]
    fn test_empty_expression_names_the_cell() {
        assert_eq!(
            load_err("2 2\n1\n2\n\n4\n"),
            LoadError::EmptyExpression {
                line: 4,
                at: CellRef::new(1, 0)
            }
        );
        assert_eq!(
            load_err("1 1\n   \n"),
            LoadError::EmptyExpression {
                line: 2,
                at: CellRef::new(0, 0)
            }
        );
    }

    #[test]
    fn test_huge_header_is_too_few_cells() {
        assert_eq!(
            load_err("18446744073709551615 1\n1\n"),
            LoadError::TooFewCells {
                expected: usize::MAX,
                found: 1
            }
        );
        assert_eq!(
            load_err("1000000000000 1\n1\n"),
            LoadError::TooFewCells {
                expected: 1_000_000_000_000,
                found: 1
            }
        );
    }

    #[test]
    fn test_max_rows_accepted() {
        let content = format!("1 26\n{}", "1\n".repeat(26));
        let grid = parse_sheet_content(&content).unwrap();
        assert_eq!(grid.rows(), 26);
    }
}
