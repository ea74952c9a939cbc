use crate::gate::record::{group_index, reverse_joints, GateRecord};
use crate::gate::schema::{
    Field, SlotRange, BLANK_STATUS, COLUMN_COUNT, EXPECTED_ROWS, JOINT_STATUSES, SKIRT_STATUSES, SLOT_COUNT,
};
use crate::gate::{GateError, GateSet};
use crate::spreadsheet::{CellValue, RawTable};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Options for building gate records.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Data-row count a complete sheet is expected to have
    pub expected_rows: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            expected_rows: EXPECTED_ROWS,
        }
    }
}

/// Reasons a single data row cannot become a gate record.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RowError {
    #[error("Row has {actual} cells, expected at least {expected}")]
    ShortRow { expected: usize, actual: usize },

    #[error("Invalid cell value at '{position}' ({field}): {message}")]
    InvalidCell {
        position: String,
        field: &'static str,
        message: String,
    },
}

/// A data row that was dropped from the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowFailure {
    pub row_index: usize,
    pub reason: RowError,
}

/// Advisory findings that never block a build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BuildWarning {
    RowCountMismatch { expected: usize, actual: usize },
    ColumnCountMismatch { expected: usize, actual: usize },
    /// An unreadable value that was treated as absent; the gate was kept.
    #[serde(rename_all = "camelCase")]
    InvalidCell {
        row_index: usize,
        position: String,
        field: &'static str,
        message: String,
    },
}

/// Builds gate records from a decoded table.
///
/// The header row is only checked for its width. Every data row is mapped
/// independently; a row that fails is reported in [`GateSet::failures`] and
/// the build carries on with the next one. Unreadable values outside the
/// integer fields are treated as absent and reported in [`GateSet::warnings`].
///
/// # Errors
///
/// Returns [`GateError::DataEmpty`] if the table has no data rows.
#[instrument(level = "info", skip(table, options), fields(rows = table.rows.len()))]
pub fn build(table: &RawTable, options: &BuildOptions) -> Result<GateSet, GateError> {
    let data_rows = table.data_rows();
    if data_rows.is_empty() {
        return Err(GateError::DataEmpty);
    }

    let mut warnings = Vec::new();
    if let Some(header) = table.header().filter(|header| header.len() != COLUMN_COUNT) {
        warn!(expected = COLUMN_COUNT, actual = header.len(), "header column count mismatch");
        warnings.push(BuildWarning::ColumnCountMismatch {
            expected: COLUMN_COUNT,
            actual: header.len(),
        });
    }
    if data_rows.len() != options.expected_rows {
        warn!(expected = options.expected_rows, actual = data_rows.len(), "data row count mismatch");
        warnings.push(BuildWarning::RowCountMismatch {
            expected: options.expected_rows,
            actual: data_rows.len(),
        });
    }

    let mut records = Vec::with_capacity(data_rows.len());
    let mut failures = Vec::new();
    for (row_index, cells) in data_rows.iter().enumerate() {
        let mut row = RowReader {
            table,
            row_index,
            cells,
            skipped: Vec::new(),
        };
        match row.to_record() {
            Ok(record) => {
                debug!(row_index, gate_id = ?record.gate_id, group = record.group_index, "built gate");
                records.push(record);
                if !row.skipped.is_empty() {
                    warn!(row_index, skipped = row.skipped.len(), "kept gate with unreadable values");
                    warnings.append(&mut row.skipped);
                }
            }
            Err(reason) => {
                warn!(row_index, %reason, "dropping gate row");
                failures.push(RowFailure { row_index, reason });
            }
        }
    }

    info!(records = records.len(), dropped = failures.len(), "built gate records");
    Ok(GateSet {
        records,
        failures,
        warnings,
    })
}

/// Typed access to the cells of one data row.
struct RowReader<'a> {
    table: &'a RawTable,
    row_index: usize,
    cells: &'a [CellValue],
    skipped: Vec<BuildWarning>,
}

impl<'a> RowReader<'a> {
    fn to_record(&mut self) -> Result<GateRecord, RowError> {
        if self.cells.len() < COLUMN_COUNT {
            return Err(RowError::ShortRow {
                expected: COLUMN_COUNT,
                actual: self.cells.len(),
            });
        }

        let gate_id = self.text(Field::GateId);
        let rev_flag = self.integer(Field::RevFlag)?;
        let is_reverse = rev_flag == 1;

        let mut joint_statuses = self.slots(&JOINT_STATUSES)?.map(Some);
        if is_reverse {
            reverse_joints(&mut joint_statuses);
        }

        Ok(GateRecord {
            group_index: group_index(gate_id.as_deref()),
            gate_id,
            section_id: self.text(Field::SectionId),
            rev_flag,
            work_order_id: self.text(Field::WorkOrderId),
            current_process: self.text(Field::CurrentProcess),
            status: self.text(Field::Status),
            working_rate_pct: self.number(Field::WorkingRatePct),
            start_time: self.text(Field::StartTime),
            end_time: self.text(Field::EndTime),
            planned_start_time: self.text(Field::PlannedStartTime),
            planned_end_time: self.text(Field::PlannedEndTime),
            standard_time: self.text(Field::StandardTime),
            worker_id: self.text(Field::WorkerId),
            worker_name: self.text(Field::WorkerName),
            skirt_qty: self.integer(Field::SkirtQty)?,
            project_color: self.text(Field::ProjectColor),
            current_time: self.text(Field::CurrentTime),
            plant: self.text(Field::Plant),
            joint_statuses,
            skirt_statuses: self.slots(&SKIRT_STATUSES)?,
            row_index: self.row_index,
            is_reverse,
        })
    }

    fn invalid(&self, column: usize, field: &'static str, message: String) -> RowError {
        RowError::InvalidCell {
            position: self.table.data_cell_position(self.row_index, column),
            field,
            message,
        }
    }

    /// Records a value that is treated as absent.
    fn skip(&mut self, column: usize, field: &'static str, message: String) {
        let position = self.table.data_cell_position(self.row_index, column);
        debug!(row_index = self.row_index, %position, field, %message, "skipping unreadable value");
        self.skipped.push(BuildWarning::InvalidCell {
            row_index: self.row_index,
            position,
            field,
            message,
        });
    }

    /// Normalized cell at `column`; error cells count as absent.
    fn cell(&mut self, column: usize, field: &'static str) -> Option<&'a CellValue> {
        let cells = self.cells;
        match cells[column].normalize() {
            Some(CellValue::Error(code)) => {
                self.skip(column, field, format!("error cell {}", code));
                None
            }
            cell => cell,
        }
    }

    fn text(&mut self, field: Field) -> Option<String> {
        self.cell(field.offset(), field.as_str()).map(CellValue::to_string)
    }

    /// Integer field, 0 when absent. Anything else that is not an integer
    /// rejects the row.
    fn integer(&self, field: Field) -> Result<i64, RowError> {
        let column = field.offset();
        match self.cells[column].normalize() {
            None => Ok(0),
            Some(CellValue::Number(value)) if value.fract() == 0.0 => Ok(*value as i64),
            Some(CellValue::Text(value)) => value
                .trim()
                .parse::<i64>()
                .map_err(|_| self.invalid(column, field.as_str(), format!("parse '{}' to integer failed", value))),
            Some(CellValue::Error(code)) => Err(self.invalid(column, field.as_str(), format!("error cell {}", code))),
            Some(other) => Err(self.invalid(column, field.as_str(), format!("'{}' is not an integer", other))),
        }
    }

    fn number(&mut self, field: Field) -> Option<f64> {
        let column = field.offset();
        let parsed = match self.cell(column, field.as_str())? {
            CellValue::Number(value) => Ok(*value),
            CellValue::Text(value) => value
                .trim()
                .trim_end_matches('%')
                .trim_end()
                .parse::<f64>()
                .map_err(|_| format!("parse '{}' to number failed", value)),
            other => Err(format!("'{}' is not a number", other)),
        };
        match parsed {
            Ok(value) => Some(value),
            Err(message) => {
                self.skip(column, field.as_str(), message);
                None
            }
        }
    }

    /// Status codes of a slot run; absent slots become the blank sentinel.
    fn slots(&mut self, slots: &SlotRange) -> Result<[String; SLOT_COUNT], RowError> {
        let mut codes = Vec::with_capacity(slots.len);
        for column in slots.columns() {
            let code = self.cell(column, slots.name).map(CellValue::to_string);
            codes.push(code.unwrap_or_else(|| BLANK_STATUS.to_string()));
        }
        codes.try_into().map_err(|codes: Vec<String>| RowError::ShortRow {
            expected: slots.end(),
            actual: slots.start + codes.len(),
        })
    }
}
