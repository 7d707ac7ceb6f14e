use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Validated employee identifier (always > 0).
pub type EmployeeId = u64;

/// One employee's attendance, keyed by canonical date.
pub type EmployeeRecords = BTreeMap<NaiveDate, Status>;

/// Every employee's attendance.
pub type Records = BTreeMap<EmployeeId, EmployeeRecords>;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Status {
    Present,
    Absent,
    Leave,
}

impl Status {
    /// "Present, Absent, Leave"
    pub fn vocabulary() -> String {
        Status::iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Per-status record counts for one employee.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "Present": 3, "Absent": 1, "Leave": 0 }))]
pub struct Summary {
    #[serde(rename = "Present")]
    pub present: usize,
    #[serde(rename = "Absent")]
    pub absent: usize,
    #[serde(rename = "Leave")]
    pub leave: usize,
}

impl Summary {
    pub fn from_records(records: &EmployeeRecords) -> Self {
        let mut summary = Summary::default();
        for status in records.values() {
            match status {
                Status::Present => summary.present += 1,
                Status::Absent => summary.absent += 1,
                Status::Leave => summary.leave += 1,
            }
        }
        summary
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Present => self.present,
            Status::Absent => self.absent,
            Status::Leave => self.leave,
        }
    }

    pub fn total(&self) -> usize {
        self.present + self.absent + self.leave
    }
}
