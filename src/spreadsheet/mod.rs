//! # Spreadsheet Adapter Module
//!
//! Turns a workbook decoded by `calamine` into a [`RawTable`]: a header row
//! followed by data rows of [`CellValue`]s, with missing cells represented as
//! [`CellValue::Null`]. Binary format decoding itself stays inside calamine;
//! this module only selects the sheet, clips the requested range and applies
//! the null/error policy from [`Criteria`].
use crate::error::{GateSheetError, ResultMessage};
use crate::spreadsheet::SpreadsheetError::{EmptySheet, SheetNotFound};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub mod cell;
pub mod criteria;
pub mod range;
pub mod table;

pub use cell::CellValue;
pub use criteria::Criteria;
pub use range::Range;
pub use table::RawTable;

/// Custom error types for spreadsheet operations.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// Workbook could not be opened or decoded
    #[error("Invalid workbook: {0}")]
    InvalidWorkbook(#[from] calamine::Error),

    /// Requested sheet not found or spreadsheet is empty
    #[error("Sheet not found or spreadsheet is empty")]
    SheetNotFound,

    /// Sheet exists but contains no data in the requested range
    #[error("Empty sheet or missing data")]
    EmptySheet,
}

/// Opens a workbook from disk and reads the selected sheet into a [`RawTable`].
///
/// The format is detected from the file extension (`.xlsx`, `.xlsm`, `.xlsb`,
/// `.xls`, `.ods`).
#[instrument(level = "info", skip(path, criteria), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P, criteria: &Criteria) -> Result<RawTable, GateSheetError> {
    let mut workbook = open_workbook_auto(path.as_ref())
        .map_err(|error| GateSheetError::from(SpreadsheetError::from(error)))
        .with_prefix(&format!("Open '{}' failed", path.as_ref().display()))?;
    read_sheet(&mut workbook, criteria)
}

/// Reads the selected sheet from an in-memory workbook.
#[instrument(level = "info", skip(bytes, criteria), fields(size = bytes.len()))]
pub fn load_table_from_bytes(bytes: Vec<u8>, criteria: &Criteria) -> Result<RawTable, GateSheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|error| GateSheetError::from(SpreadsheetError::from(error)))
        .with_prefix("Open workbook from memory failed")?;
    read_sheet(&mut workbook, criteria)
}

fn read_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>, criteria: &Criteria) -> Result<RawTable, GateSheetError> {
    let sheet_name = workbook
        .sheet_names()
        .into_iter()
        .find(|name| criteria.accept(name))
        .ok_or(SheetNotFound)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|error| GateSheetError::from(SpreadsheetError::from(error)))
        .with_prefix(&format!("Read sheet '{}' failed", sheet_name))?;
    let table = table_from_range(&range, criteria)?;
    info!(
        sheet = %sheet_name,
        rows = table.rows.len(),
        columns = table.header().map(<[CellValue]>::len).unwrap_or(0),
        "loaded sheet"
    );
    Ok(table)
}

/// Converts a decoded calamine range into a [`RawTable`].
///
/// Unbounded sides of `criteria.range` follow the sheet's used range. Rows are
/// clipped to the used range; columns are padded with nulls up to an explicit
/// upper bound, or to `criteria.min_columns` when the upper bound is open, so
/// trailing blank columns still reach the caller.
pub fn table_from_range(range: &calamine::Range<Data>, criteria: &Criteria) -> Result<RawTable, SpreadsheetError> {
    let (start, end) = range.start().zip(range.end()).ok_or(EmptySheet)?;
    let bounds = criteria.range.unwrap_or_default();

    let row_lower = bounds.row_lower_bound.unwrap_or(start.0 as usize);
    let row_upper = bounds.row_upper_bound.unwrap_or(end.0 as usize).min(end.0 as usize);
    let col_lower = bounds.col_lower_bound.unwrap_or(start.1 as usize);
    let col_upper = bounds
        .col_upper_bound
        .unwrap_or_else(|| (end.1 as usize).max((col_lower + criteria.min_columns).saturating_sub(1)));
    if row_lower > row_upper || col_lower > col_upper {
        return Err(EmptySheet);
    }
    debug!(row_lower, row_upper, col_lower, col_upper, "clipping sheet range");

    let rows = (row_lower..=row_upper)
        .map(|row| {
            (col_lower..=col_upper)
                .map(|col| {
                    range
                        .get_value((row as u32, col as u32))
                        .map(|data| CellValue::from_data(data, &criteria.nulls, criteria.error_as_null))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    Ok(RawTable {
        origin: (row_lower, col_lower),
        rows,
    })
}
