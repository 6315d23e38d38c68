//! Document model: a loaded sheet and where it came from.

mod io;

use std::path::PathBuf;

use gridcalc_engine::engine::Grid;
use tracing::debug;

use crate::error::Result;

/// A sheet loaded from a description, evaluated at most once.
#[derive(Debug)]
pub struct Document {
    pub grid: Grid,
    /// File the sheet was read from; `None` for standard input.
    pub source: Option<PathBuf>,
    calculated: bool,
}

impl Document {
    pub fn new(grid: Grid, source: Option<PathBuf>) -> Document {
        Document {
            grid,
            source,
            calculated: false,
        }
    }

    /// Evaluate every cell. Calling again is a no-op.
    pub fn calculate(&mut self) -> Result<()> {
        if self.calculated {
            debug!("sheet already calculated");
            return Ok(());
        }
        self.grid.calculate()?;
        self.calculated = true;
        Ok(())
    }

    pub fn is_calculated(&self) -> bool {
        self.calculated
    }
}
