//! Writer for evaluated sheets.

use std::io::Write;

use gridcalc_engine::engine::{Grid, format_number};

use crate::error::{GridcalcError, Result};

/// Fractional digits written per value unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 5;

/// Write `<columns> <rows>` followed by one value per line, row-major.
///
/// Fails without writing anything if any cell is still unevaluated.
pub fn write_sheet<W: Write>(out: &mut W, grid: &Grid, precision: usize) -> Result<()> {
    let values = grid.values().ok_or(GridcalcError::NotCalculated)?;

    writeln!(out, "{} {}", grid.cols(), grid.rows())?;
    for value in values {
        writeln!(out, "{}", format_number(value, precision))?;
    }
    out.flush()?;
    Ok(())
}
