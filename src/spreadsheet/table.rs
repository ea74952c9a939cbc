use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::range::cell_position;

/// A rectangular block of decoded cells: one header row followed by data rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    /// Sheet coordinates (row, column) of the top-left cell, 0-based
    pub origin: (usize, usize),
    /// All rows, header first
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Creates a table anchored at `A1`.
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        RawTable { origin: (0, 0), rows }
    }

    /// Returns true if the table has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the header row if present.
    pub fn header(&self) -> Option<&[CellValue]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Returns the data rows (everything after the header).
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Excel-style sheet position of a cell in the `data_index`-th data row.
    pub fn data_cell_position(&self, data_index: usize, column: usize) -> String {
        cell_position(self.origin.0 + data_index + 1, self.origin.1 + column)
    }
}
