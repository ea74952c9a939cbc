use crate::gate::schema::COLUMN_COUNT;
use crate::spreadsheet::range::Range;
use glob::Pattern;
use std::collections::HashSet;

/// Criteria for selecting and decoding the gate sheet from a workbook.
#[derive(Clone, Debug)]
pub struct Criteria {
    /// Sheet name patterns; the first matching sheet is read.
    pub sheet_name_patterns: Option<Vec<Pattern>>,

    /// Data range within the sheet to extract.
    pub range: Option<Range>,

    /// Minimum row width when the range leaves the upper column open.
    pub min_columns: usize,

    /// null literals (default: empty string)
    pub nulls: HashSet<String>,

    /// Convert error cells to null values instead of keeping the error code.
    pub error_as_null: bool,
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria {
            sheet_name_patterns: None,
            range: None,
            min_columns: COLUMN_COUNT,
            nulls: HashSet::from(["".to_string()]),
            error_as_null: false,
        }
    }
}

impl Criteria {
    /// Checks if a sheet name matches the criteria patterns.
    /// Returns true if no patterns are specified or if name matches any pattern.
    pub fn accept(&self, sheet_name: &str) -> bool {
        if let Some(patterns) = &self.sheet_name_patterns {
            patterns.iter().any(|pattern| pattern.matches(sheet_name))
        } else {
            true
        }
    }
}
