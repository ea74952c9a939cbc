//! # Gate Sheet
//!
//! Reads the gate tracking spreadsheet (one header row, 60 gate rows, 58
//! columns) into typed gate records and answers simple queries over them.
//!
//! ## Features
//!
//! - **Multi-format input**: Excel (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`) and
//!   OpenDocument (`.ods`) workbooks, decoded by `calamine`
//! - **Declarative layout**: every column offset lives in [`gate::schema`]
//! - **Row-level fault isolation**: a malformed row is dropped and reported,
//!   the rest of the sheet still loads
//! - **Queries**: lookup by gate id, filtering by gate group and a summary of
//!   groups, statuses and reversed gates
//!
//! ## Example
//!
//! ```no_run
//! use gate_sheet::gate::{build, BuildOptions};
//! use gate_sheet::spreadsheet::{load_table, Criteria};
//!
//! # fn main() -> Result<(), gate_sheet::GateSheetError> {
//! let table = load_table("gates.xlsx", &Criteria::default())?;
//! let gates = build(&table, &BuildOptions::default())?;
//! println!("{:?}", gates.find_by_gate_id("G05"));
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod gate;
pub mod spreadsheet;
mod telemetry;

pub use error::GateSheetError;
pub use telemetry::init_tracing;
