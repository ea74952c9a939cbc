//! Column layout of the gate sheet.
//!
//! Every offset the builder reads is declared here once: the 18 scalar
//! fields and the two 20-slot status collections. Offsets are 0-based
//! positions within a table row.

/// Total number of columns in a gate row.
pub const COLUMN_COUNT: usize = 58;

/// Number of data rows a complete gate sheet carries.
pub const EXPECTED_ROWS: usize = 60;

/// Number of slots in each status collection.
pub const SLOT_COUNT: usize = 20;

/// Sentinel status code for a blank slot.
pub const BLANK_STATUS: &str = "B";

/// Width of a gate group: gates 1-20 form group 1, 21-40 group 2, and so on.
pub const GROUP_SIZE: u32 = 20;

/// Joint slot that has no physical joint behind it. Reversed gates leave it empty.
pub const JOINT_PLACEHOLDER_SLOT: usize = 0;

/// Scalar fields of a gate row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    GateId,
    SectionId,
    RevFlag,
    WorkOrderId,
    CurrentProcess,
    Status,
    WorkingRatePct,
    StartTime,
    EndTime,
    PlannedStartTime,
    PlannedEndTime,
    StandardTime,
    WorkerId,
    WorkerName,
    SkirtQty,
    ProjectColor,
    CurrentTime,
    Plant,
}

impl Field {
    /// All scalar fields in column order.
    pub const ALL: [Field; 18] = [
        Field::GateId,
        Field::SectionId,
        Field::RevFlag,
        Field::WorkOrderId,
        Field::CurrentProcess,
        Field::Status,
        Field::WorkingRatePct,
        Field::StartTime,
        Field::EndTime,
        Field::PlannedStartTime,
        Field::PlannedEndTime,
        Field::StandardTime,
        Field::WorkerId,
        Field::WorkerName,
        Field::SkirtQty,
        Field::ProjectColor,
        Field::CurrentTime,
        Field::Plant,
    ];

    /// Column offset of the field within a row.
    pub const fn offset(&self) -> usize {
        match self {
            Field::GateId => 0,
            Field::SectionId => 1,
            Field::RevFlag => 2,
            Field::WorkOrderId => 3,
            Field::CurrentProcess => 4,
            Field::Status => 5,
            Field::WorkingRatePct => 6,
            Field::StartTime => 7,
            Field::EndTime => 8,
            Field::PlannedStartTime => 9,
            Field::PlannedEndTime => 10,
            Field::StandardTime => 11,
            Field::WorkerId => 12,
            Field::WorkerName => 13,
            Field::SkirtQty => 14,
            Field::ProjectColor => 15,
            Field::CurrentTime => 16,
            Field::Plant => 37,
        }
    }

    /// Field name as it appears in serialized records and diagnostics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::GateId => "gateId",
            Field::SectionId => "sectionId",
            Field::RevFlag => "revFlag",
            Field::WorkOrderId => "workOrderId",
            Field::CurrentProcess => "currentProcess",
            Field::Status => "status",
            Field::WorkingRatePct => "workingRatePct",
            Field::StartTime => "startTime",
            Field::EndTime => "endTime",
            Field::PlannedStartTime => "plannedStartTime",
            Field::PlannedEndTime => "plannedEndTime",
            Field::StandardTime => "standardTime",
            Field::WorkerId => "workerId",
            Field::WorkerName => "workerName",
            Field::SkirtQty => "skirtQty",
            Field::ProjectColor => "projectColor",
            Field::CurrentTime => "currentTime",
            Field::Plant => "plant",
        }
    }
}

/// A run of consecutive status columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotRange {
    pub name: &'static str,
    pub start: usize,
    pub len: usize,
}

impl SlotRange {
    /// One past the last column of the run.
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn columns(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }
}

pub const JOINT_STATUSES: SlotRange = SlotRange {
    name: "jointStatuses",
    start: 17,
    len: SLOT_COUNT,
};

pub const SKIRT_STATUSES: SlotRange = SlotRange {
    name: "skirtStatuses",
    start: 38,
    len: SLOT_COUNT,
};
