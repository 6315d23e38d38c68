//! Reading sheet descriptions and writing evaluated sheets.

mod reader;
mod writer;

pub use reader::{parse_sheet_content, read_sheet};
pub use writer::{DEFAULT_PRECISION, write_sheet};
