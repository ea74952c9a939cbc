use crate::gate::builder::{build, BuildOptions};
use crate::gate::record::GateRecord;
use crate::gate::{GateError, GateSet};
use crate::spreadsheet::RawTable;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Status key for records without a status.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Groups always reported by [`Summary`], even when empty.
pub const SUMMARY_GROUPS: [u32; 3] = [1, 2, 3];

/// Aggregate counts over a gate set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    /// Record count for groups 1, 2 and 3
    pub groups: BTreeMap<u32, usize>,
    /// Record count per status code, missing statuses under "Unknown"
    pub statuses: BTreeMap<String, usize>,
    pub reverse_count: usize,
}

impl GateSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose gate id equals `gate_id`.
    pub fn find_by_gate_id(&self, gate_id: &str) -> Option<&GateRecord> {
        self.records
            .iter()
            .find(|record| record.gate_id.as_deref() == Some(gate_id))
    }

    /// Records in `group`, or every record when no group is given.
    pub fn filter_by_group(&self, group: Option<u32>) -> Vec<&GateRecord> {
        match group {
            Some(group) => self
                .records
                .iter()
                .filter(|record| record.group_index == group)
                .collect(),
            None => self.records.iter().collect(),
        }
    }

    pub fn summarize(&self) -> Summary {
        let mut groups: BTreeMap<u32, usize> = SUMMARY_GROUPS.iter().map(|group| (*group, 0)).collect();
        let mut statuses: BTreeMap<String, usize> = BTreeMap::new();
        let mut reverse_count = 0;
        for record in &self.records {
            if let Some(count) = groups.get_mut(&record.group_index) {
                *count += 1;
            }
            let status = record.status.as_deref().unwrap_or(UNKNOWN_STATUS);
            *statuses.entry(status.to_owned()).or_default() += 1;
            if record.is_reverse {
                reverse_count += 1;
            }
        }
        Summary {
            total: self.records.len(),
            groups,
            statuses,
            reverse_count,
        }
    }
}

/// Caller-owned holder of the most recently built gate set.
#[derive(Debug, Default)]
pub struct GateBook {
    options: BuildOptions,
    current: Option<GateSet>,
}

impl GateBook {
    pub fn new(options: BuildOptions) -> Self {
        GateBook { options, current: None }
    }

    /// Builds `table` and replaces the current set with the result.
    /// A failed build keeps the previous set.
    pub fn load(&mut self, table: &RawTable) -> Result<&GateSet, GateError> {
        let set = build(table, &self.options)?;
        if let Some(previous) = &self.current {
            info!(previous = previous.len(), current = set.len(), "replacing gate set");
        }
        Ok(self.current.insert(set))
    }

    pub fn current(&self) -> Option<&GateSet> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn find_by_gate_id(&self, gate_id: &str) -> Option<&GateRecord> {
        self.current.as_ref()?.find_by_gate_id(gate_id)
    }

    pub fn filter_by_group(&self, group: Option<u32>) -> Vec<&GateRecord> {
        self.current
            .as_ref()
            .map(|set| set.filter_by_group(group))
            .unwrap_or_default()
    }

    pub fn summarize(&self) -> Result<Summary, GateError> {
        self.current
            .as_ref()
            .map(GateSet::summarize)
            .ok_or(GateError::NotLoaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::schema::Field;
    use crate::gate::test_support::gate_table;
    use crate::spreadsheet::CellValue;

    fn built(rows: usize) -> GateSet {
        build(&gate_table(rows), &BuildOptions::default()).unwrap()
    }

    #[test]
    fn finds_gate_by_id() {
        let set = built(60);
        let record = set.find_by_gate_id("G05").unwrap();
        assert_eq!(record.gate_id.as_deref(), Some("G05"));
        assert_eq!(record.row_index, 4);
        assert!(set.find_by_gate_id("G99").is_none());
    }

    #[test]
    fn find_returns_first_match() {
        let mut table = gate_table(3);
        table.rows[3][Field::GateId.offset()] = CellValue::text("G01");
        let set = build(&table, &BuildOptions::default()).unwrap();
        assert_eq!(set.find_by_gate_id("G01").unwrap().row_index, 0);
    }

    #[test]
    fn filters_by_group() {
        let set = built(60);
        let second = set.filter_by_group(Some(2));
        assert_eq!(second.len(), 20);
        assert!(second.iter().all(|record| record.group_index == 2));
        assert_eq!(second[0].gate_id.as_deref(), Some("G21"));
        assert!(set.filter_by_group(Some(7)).is_empty());
    }

    #[test]
    fn filter_without_group_returns_everything() {
        let set = built(45);
        assert_eq!(set.filter_by_group(None).len(), 45);
    }

    #[test]
    fn summarizes_groups_statuses_and_reverses() {
        let mut table = gate_table(45);
        table.rows[1][Field::Status.offset()] = CellValue::Null;
        table.rows[2][Field::Status.offset()] = CellValue::text("D");
        table.rows[3][Field::RevFlag.offset()] = CellValue::Number(1.0);
        table.rows[4][Field::RevFlag.offset()] = CellValue::Number(1.0);
        let set = build(&table, &BuildOptions::default()).unwrap();

        let summary = set.summarize();
        assert_eq!(summary.total, 45);
        assert_eq!(summary.groups, BTreeMap::from([(1, 20), (2, 20), (3, 5)]));
        assert_eq!(summary.statuses.get(UNKNOWN_STATUS), Some(&1));
        assert_eq!(summary.statuses.get("D"), Some(&1));
        assert_eq!(summary.statuses.get("R"), Some(&43));
        assert_eq!(summary.statuses.values().sum::<usize>(), summary.total);
        assert_eq!(summary.reverse_count, 2);
    }

    #[test]
    fn summary_reports_empty_groups() {
        let summary = built(5).summarize();
        assert_eq!(summary.groups, BTreeMap::from([(1, 5), (2, 0), (3, 0)]));
    }

    #[test]
    fn book_requires_a_load_before_summary() {
        let mut book = GateBook::default();
        assert_eq!(book.summarize(), Err(GateError::NotLoaded));
        assert!(book.find_by_gate_id("G01").is_none());
        assert!(book.filter_by_group(None).is_empty());

        book.load(&gate_table(60)).unwrap();
        let summary = book.summarize().unwrap();
        assert_eq!(summary.total, 60);
        assert_eq!(book.find_by_gate_id("G60").unwrap().group_index, 3);
    }

    #[test]
    fn book_replaces_set_wholesale_and_keeps_it_on_failure() {
        let mut book = GateBook::new(BuildOptions { expected_rows: 10 });
        book.load(&gate_table(10)).unwrap();
        assert_eq!(book.current().unwrap().len(), 10);

        book.load(&gate_table(4)).unwrap();
        assert_eq!(book.current().unwrap().len(), 4);
        assert!(book.find_by_gate_id("G09").is_none());

        assert_eq!(book.load(&RawTable::default()), Err(GateError::DataEmpty));
        assert_eq!(book.current().unwrap().len(), 4);

        book.clear();
        assert_eq!(book.summarize(), Err(GateError::NotLoaded));
    }
}
