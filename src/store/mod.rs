pub mod flat_file;

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{AttendanceError, Result};
use crate::model::attendance::{EmployeeId, EmployeeRecords, Records, Status, Summary};

pub use flat_file::ExportFormat;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Four-digit year, one or two digit month and day. No sign, no whitespace.
static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("date pattern compiles"));

/// Rejects zero and negative identifiers.
pub fn validate_employee_id(raw: i64) -> Result<EmployeeId> {
    if raw <= 0 {
        return Err(AttendanceError::InvalidEmployeeId);
    }
    Ok(raw as EmployeeId)
}

/// Parses a `YYYY-MM-DD` calendar date (year 0001 or later). The returned value
/// renders canonically, so its text form is always fixed width.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    if !DATE_SHAPE.is_match(raw) {
        return Err(AttendanceError::InvalidDateFormat);
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| AttendanceError::InvalidDateFormat)?;
    if date.year() < 1 {
        return Err(AttendanceError::InvalidDateFormat);
    }
    Ok(date)
}

pub fn parse_status(raw: &str) -> Result<Status> {
    Status::from_str(raw).map_err(|_| AttendanceError::InvalidStatus)
}

/// In-memory attendance data: employee -> date -> status.
///
/// Not synchronized. Servers share it behind a single `Mutex`.
#[derive(Debug, Default, Clone)]
pub struct AttendanceStore {
    records: Records,
}

impl AttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates raw input (id, then date, then status) and writes the record.
    /// An existing record for the same date is overwritten.
    pub fn add(&mut self, employee_id: i64, date: &str, status: &str) -> Result<()> {
        let employee_id = validate_employee_id(employee_id)?;
        let date = parse_date(date)?;
        let status = parse_status(status)?;
        self.insert(employee_id, date, status);
        Ok(())
    }

    /// Typed write; returns the status it replaced, if any.
    pub fn insert(
        &mut self,
        employee_id: EmployeeId,
        date: NaiveDate,
        status: Status,
    ) -> Option<Status> {
        let previous = self
            .records
            .entry(employee_id)
            .or_default()
            .insert(date, status);

        debug!(employee_id, %date, %status, overwrite = previous.is_some(), "Attendance recorded");
        previous
    }

    pub fn get_records(&self, employee_id: EmployeeId) -> Option<&EmployeeRecords> {
        self.records.get(&employee_id)
    }

    /// Owned copy of the whole store.
    pub fn get_all_records(&self) -> Records {
        self.records.clone()
    }

    pub fn get_summary(&self, employee_id: EmployeeId) -> Option<Summary> {
        self.records.get(&employee_id).map(Summary::from_records)
    }

    pub fn get_all_summaries(&self) -> BTreeMap<EmployeeId, Summary> {
        self.records
            .iter()
            .map(|(id, records)| (*id, Summary::from_records(records)))
            .collect()
    }

    /// Percentage of the employee's records marked `Present`, unrounded.
    pub fn get_attendance_rate(&self, employee_id: EmployeeId) -> Option<f64> {
        let summary = self.get_summary(employee_id)?;
        let total = summary.total();
        if total == 0 {
            return Some(0.0);
        }
        Some(summary.present as f64 / total as f64 * 100.0)
    }

    /// Removes one record. The date is validated even when the employee is unknown.
    /// An employee left without records is dropped from the store.
    pub fn delete(&mut self, employee_id: EmployeeId, date: &str) -> Result<bool> {
        let date = parse_date(date)?;

        let Some(records) = self.records.get_mut(&employee_id) else {
            return Ok(false);
        };
        if records.remove(&date).is_none() {
            return Ok(false);
        }
        if records.is_empty() {
            self.records.remove(&employee_id);
        }

        debug!(employee_id, %date, "Attendance deleted");
        Ok(true)
    }

    /// Records with `start <= date <= end`, both bounds inclusive.
    /// Employees with nothing in range are left out. `start > end` yields an empty map.
    pub fn filter_by_date_range(&self, start_date: &str, end_date: &str) -> Result<Records> {
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;

        let filtered = self
            .records
            .iter()
            .filter_map(|(id, records)| {
                let in_range: EmployeeRecords = records
                    .iter()
                    .filter(|(date, _)| start <= **date && **date <= end)
                    .map(|(date, status)| (*date, *status))
                    .collect();
                (!in_range.is_empty()).then_some((*id, in_range))
            })
            .collect();

        Ok(filtered)
    }

    /// Total number of (employee, date) records.
    pub fn len(&self) -> usize {
        self.records.values().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn employee_count(&self) -> usize {
        self.records.len()
    }
}
