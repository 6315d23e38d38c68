use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::info;

use super::Document;
use crate::error::Result;
use crate::storage::{read_sheet, write_sheet};

impl Document {
    /// Load a sheet description from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Document> {
        Ok(Document::new(read_sheet(reader)?, None))
    }

    /// Load a sheet description from a file.
    pub fn open(path: &Path) -> Result<Document> {
        let file = File::open(path)?;
        let grid = read_sheet(BufReader::new(file))?;
        info!(path = %path.display(), "opened sheet");
        Ok(Document::new(grid, Some(path.to_path_buf())))
    }

    /// Write the evaluated sheet; fails if it has not been calculated.
    pub fn write_results<W: Write>(&self, out: &mut W, precision: usize) -> Result<()> {
        write_sheet(out, &self.grid, precision)
    }
}
