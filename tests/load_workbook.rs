use anyhow::Result;
use gate_sheet::gate::schema::{Field, COLUMN_COUNT, JOINT_STATUSES, SKIRT_STATUSES};
use gate_sheet::gate::{build, BuildOptions, BuildWarning, GateBook};
use gate_sheet::spreadsheet::{load_table, load_table_from_bytes, Criteria, Range};
use glob::Pattern;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_gate_sheet(worksheet: &mut Worksheet, rows: u32) -> Result<(), XlsxError> {
    for column in 0..COLUMN_COUNT as u16 {
        worksheet.write_string(0, column, format!("column{}", column + 1))?;
    }
    for row in 1..=rows {
        worksheet.write_string(row, Field::GateId.offset() as u16, format!("G{:02}", row))?;
        worksheet.write_string(row, Field::SectionId.offset() as u16, "S1")?;
        worksheet.write_number(row, Field::RevFlag.offset() as u16, if row == 3 { 1 } else { 0 })?;
        worksheet.write_string(row, Field::Status.offset() as u16, if row % 2 == 0 { "R" } else { "W" })?;
        worksheet.write_number(row, Field::WorkingRatePct.offset() as u16, 50.0 + row as f64)?;
        worksheet.write_number(row, Field::SkirtQty.offset() as u16, 3)?;
        worksheet.write_string(row, Field::Plant.offset() as u16, "P2")?;
        for (slot, column) in JOINT_STATUSES.columns().enumerate() {
            worksheet.write_string(row, column as u16, format!("J{}", slot))?;
        }
        // leave the last skirt slot empty
        for column in SKIRT_STATUSES.columns().take(SKIRT_STATUSES.len - 1) {
            worksheet.write_string(row, column as u16, "C")?;
        }
    }
    Ok(())
}

fn write_workbook(dir: &Path, rows: u32) -> Result<PathBuf> {
    let path = dir.join("gates.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("Notes")?.write_string(0, 0, "not gates")?;
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Gates")?;
    write_gate_sheet(worksheet, rows)?;
    workbook.save(&path)?;
    Ok(path)
}

fn gate_criteria() -> Criteria {
    Criteria {
        sheet_name_patterns: Some(vec![Pattern::new("Gate*").unwrap()]),
        ..Criteria::default()
    }
}

#[test]
fn loads_and_builds_a_full_workbook() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_workbook(dir.path(), 60)?;

    let table = load_table(&path, &gate_criteria())?;
    assert_eq!(table.rows.len(), 61);
    assert_eq!(table.header().map(|header| header.len()), Some(COLUMN_COUNT));

    let set = build(&table, &BuildOptions::default())?;
    assert_eq!(set.records.len(), 60);
    assert!(set.failures.is_empty());
    assert!(set.warnings.is_empty());

    let g03 = set.find_by_gate_id("G03").unwrap();
    assert!(g03.is_reverse);
    assert_eq!(g03.joint_statuses[0], None);
    assert_eq!(g03.joint_statuses[1].as_deref(), Some("J19"));
    assert_eq!(g03.working_rate_pct, Some(53.0));
    assert_eq!(g03.skirt_qty, 3);
    assert_eq!(g03.skirt_statuses[19], "B");

    let summary = set.summarize();
    assert_eq!(summary.total, 60);
    assert_eq!(summary.groups.values().sum::<usize>(), 60);
    assert_eq!(summary.statuses.get("R"), Some(&30));
    assert_eq!(summary.statuses.get("W"), Some(&30));
    assert_eq!(summary.reverse_count, 1);
    Ok(())
}

#[test]
fn loads_from_bytes_with_range() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_workbook(dir.path(), 60)?;
    let bytes = std::fs::read(&path)?;

    let criteria = Criteria {
        range: Some(Range::try_from("A1:BF56")?),
        ..gate_criteria()
    };
    let table = load_table_from_bytes(bytes, &criteria)?;

    let mut book = GateBook::default();
    let set = book.load(&table)?;
    assert_eq!(set.len(), 55);
    assert_eq!(
        set.warnings,
        vec![BuildWarning::RowCountMismatch {
            expected: 60,
            actual: 55
        }]
    );
    assert_eq!(book.filter_by_group(Some(3)).len(), 15);
    Ok(())
}

#[test]
fn missing_sheet_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_workbook(dir.path(), 2)?;
    let criteria = Criteria {
        sheet_name_patterns: Some(vec![Pattern::new("Inventory")?]),
        ..Criteria::default()
    };
    let error = load_table(&path, &criteria).unwrap_err();
    assert_eq!(error.to_string(), "Sheet not found or spreadsheet is empty");
    Ok(())
}
