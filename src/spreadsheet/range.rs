use crate::error::GateSheetError;
use regex::Regex;
use thiserror::Error;

/// Errors related to Excel-style range parsing.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid range format '{0}'")]
    FormatError(String),
}

/// Represents an Excel-style cell range with optional boundaries.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Range {
    /// Lower row bound (0-based index), None for unbounded
    pub row_lower_bound: Option<usize>,
    /// Upper row bound (0-based index), None for unbounded
    pub row_upper_bound: Option<usize>,
    /// Lower column bound (0-based index), None for unbounded
    pub col_lower_bound: Option<usize>,
    /// Upper column bound (0-based index), None for unbounded
    pub col_upper_bound: Option<usize>,
}

impl TryFrom<&str> for Range {
    type Error = GateSheetError;

    /// Parses an Excel-style range string (e.g., "A1", "B2:C5", "A:BF", "1:61").
    /// A single reference anchors the top-left corner and leaves the far side open.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let pattern = Regex::new(r"^([A-Z]*)(\d*)(:([A-Z]*)(\d*))?$").expect("Hardcode regex pattern");
        let value = value.trim().to_ascii_uppercase();
        let captures = pattern
            .captures(value.as_str())
            .ok_or_else(|| RangeError::FormatError(value.to_owned()))?;
        Ok(Range {
            col_lower_bound: captures
                .get(1)
                .map(|matcher| matcher.as_str())
                .and_then(col_to_index),
            row_lower_bound: captures
                .get(2)
                .map(|matcher| matcher.as_str())
                .and_then(row_to_index),
            col_upper_bound: captures
                .get(4)
                .map(|matcher| matcher.as_str())
                .and_then(col_to_index),
            row_upper_bound: captures
                .get(5)
                .map(|matcher| matcher.as_str())
                .and_then(row_to_index),
        })
    }
}

impl std::str::FromStr for Range {
    type Err = GateSheetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Range::try_from(value)
    }
}

/// Converts column letters ("A", "BF") to a 0-based column index.
pub fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters.bytes().try_fold(0usize, |index, byte| {
        if byte.is_ascii_uppercase() {
            index.checked_mul(26)?.checked_add((byte - b'A') as usize + 1)
        } else {
            None
        }
    }).map(|index| index - 1)
}

/// Converts a 1-based row number ("1", "61") to a 0-based row index.
pub fn row_to_index(digits: &str) -> Option<usize> {
    digits.parse::<usize>().ok().filter(|row| *row > 0).map(|row| row - 1)
}

/// Convert 0-based row & column indexes to an Excel-style cell position.
pub fn cell_position(row: usize, column: usize) -> String {
    let mut column = column + 1;
    let mut position = String::new();
    while column > 0 {
        column -= 1;
        position.insert(0, (b'A' + (column % 26) as u8) as char);
        column /= 26;
    }
    position.push_str((row + 1).to_string().as_str());
    position
}
