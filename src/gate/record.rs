use crate::gate::schema::{GROUP_SIZE, JOINT_PLACEHOLDER_SLOT, SLOT_COUNT};
use serde::Serialize;

/// One gate, built from one data row of the gate sheet.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateRecord {
    pub gate_id: Option<String>,
    pub section_id: Option<String>,
    /// 1 marks a gate whose joints are numbered in reverse
    pub rev_flag: i64,
    pub work_order_id: Option<String>,
    pub current_process: Option<String>,
    pub status: Option<String>,
    pub working_rate_pct: Option<f64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub planned_start_time: Option<String>,
    pub planned_end_time: Option<String>,
    pub standard_time: Option<String>,
    pub worker_id: Option<String>,
    pub worker_name: Option<String>,
    pub skirt_qty: i64,
    pub project_color: Option<String>,
    pub current_time: Option<String>,
    pub plant: Option<String>,
    /// Band of 20 gates the record belongs to, 0 when the id has no number
    pub group_index: u32,
    /// Joint status codes; only the placeholder slot of a reversed gate is empty
    pub joint_statuses: [Option<String>; SLOT_COUNT],
    pub skirt_statuses: [String; SLOT_COUNT],
    /// Zero-based position among the data rows of the source table
    pub row_index: usize,
    pub is_reverse: bool,
}

/// Derives the group of a gate from the numeric suffix of its id.
///
/// One leading non-digit prefix character (the `G` of `G01`) is stripped and
/// the leading digits of the remainder are parsed. Ids without a number
/// belong to group 0.
pub fn group_index(gate_id: Option<&str>) -> u32 {
    let number = gate_id.map(numeric_suffix).unwrap_or(0);
    number.div_ceil(GROUP_SIZE)
}

fn numeric_suffix(gate_id: &str) -> u32 {
    let gate_id = gate_id.trim();
    let digits = match gate_id.chars().next() {
        Some(prefix) if !prefix.is_ascii_digit() => &gate_id[prefix.len_utf8()..],
        _ => gate_id,
    };
    let end = digits
        .char_indices()
        .find(|(_, char)| !char.is_ascii_digit())
        .map(|(index, _)| index)
        .unwrap_or(digits.len());
    digits[..end].parse::<u32>().unwrap_or(0)
}

/// Applies the reverse numbering rule to joint statuses in place: the slots
/// after the placeholder are reversed and the placeholder slot is cleared.
pub fn reverse_joints(joints: &mut [Option<String>; SLOT_COUNT]) {
    joints[JOINT_PLACEHOLDER_SLOT + 1..].reverse();
    joints[JOINT_PLACEHOLDER_SLOT] = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_gates_in_bands_of_twenty() {
        assert_eq!(group_index(Some("G01")), 1);
        assert_eq!(group_index(Some("G20")), 1);
        assert_eq!(group_index(Some("G21")), 2);
        assert_eq!(group_index(Some("G40")), 2);
        assert_eq!(group_index(Some("G60")), 3);
        assert_eq!(group_index(Some("G61")), 4);
    }

    #[test]
    fn missing_or_unparseable_ids_fall_into_group_zero() {
        assert_eq!(group_index(None), 0);
        assert_eq!(group_index(Some("")), 0);
        assert_eq!(group_index(Some("G")), 0);
        assert_eq!(group_index(Some("Gate")), 0);
        assert_eq!(group_index(Some("G00")), 0);
        assert_eq!(group_index(Some("G99999999999")), 0);
    }

    #[test]
    fn parses_leading_digits_only() {
        assert_eq!(group_index(Some("G05a")), 1);
        assert_eq!(group_index(Some("25")), 2);
        assert_eq!(group_index(Some(" G41 ")), 3);
    }

    #[test]
    fn reverse_clears_placeholder_and_flips_tail() {
        let mut joints: [Option<String>; SLOT_COUNT] =
            std::array::from_fn(|index| Some(format!("J{}", index)));
        reverse_joints(&mut joints);
        assert_eq!(joints[0], None);
        for position in 1..SLOT_COUNT {
            assert_eq!(joints[position], Some(format!("J{}", SLOT_COUNT - position)));
        }
    }
}
