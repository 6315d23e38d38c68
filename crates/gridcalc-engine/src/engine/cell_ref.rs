//! Cell reference parsing and formatting.
//!
//! A reference is a single row letter followed by a 1-based column number
//! ("A1", "C12"). Internally both coordinates are zero-indexed.
//!
//! # Examples
//!
//! ```
//! use gridcalc_engine::engine::CellRef;
//!
//! let cell: CellRef = "B3".parse().unwrap();
//! assert_eq!(cell.row, 1);
//! assert_eq!(cell.col, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::ReferenceError;

/// Number of addressable rows: one per letter of the alphabet.
pub const MAX_ROWS: usize = 26;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse the `<Letter><Digits>` shape without any bounds check.
    ///
    /// Returns `None` when the token does not have the reference shape.
    /// A shape-valid token whose column number is `0` yields `Some(None)`:
    /// it names column -1, which no grid contains.
    fn parse_shape(token: &str) -> Option<Option<CellRef>> {
        let caps = reference_re().captures(token)?;
        let letter = caps["letter"].as_bytes()[0].to_ascii_uppercase();
        let row = (letter - b'A') as usize;
        let number = caps["number"].parse::<usize>().ok()?;
        Some(number.checked_sub(1).map(|col| CellRef::new(row, col)))
    }

    /// Resolve a reference token against a grid of `rows x cols`.
    ///
    /// Row letters are case-insensitive. The column number is 1-based.
    pub fn resolve(token: &str, rows: usize, cols: usize) -> Result<CellRef, ReferenceError> {
        match CellRef::parse_shape(token).ok_or(ReferenceError::Malformed)? {
            Some(cell) if cell.row < rows && cell.col < cols => Ok(cell),
            _ => Err(ReferenceError::OutOfBounds { rows, cols }),
        }
    }

    /// Convert a row index to its letter (0 -> A, 25 -> Z).
    ///
    /// Returns `None` for rows past `Z`.
    pub fn row_letter(row: usize) -> Option<char> {
        (row < MAX_ROWS).then(|| (b'A' + row as u8) as char)
    }
}

fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Za-z])(?<number>[0-9]+)$")
            .expect("cell reference regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match CellRef::parse_shape(s) {
            Some(Some(cell)) => Ok(cell),
            _ => Err(format!("Invalid cell reference: {}", s)),
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match CellRef::row_letter(self.row) {
            Some(letter) => write!(f, "{}{}", letter, self.col + 1),
            None => write!(f, "R{}C{}", self.row + 1, self.col + 1),
        }
    }
}
