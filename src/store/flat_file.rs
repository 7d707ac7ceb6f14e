//! Flat-file dump and load for [`AttendanceStore`].
//!
//! CSV carries one `Employee_ID,Date,Status` row per record and is the only
//! format that can be imported. JSON is export only.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use csv::StringRecord;
use strum_macros::{Display, EnumString};
use tracing::{info, warn};

use super::AttendanceStore;
use crate::error::Result;

pub const CSV_HEADER: [&str; 3] = ["Employee_ID", "Date", "Status"];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Guesses the format from a `.csv` / `.json` extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "attendance_data.csv",
            ExportFormat::Json => "attendance_data.json",
        }
    }
}

/// Column positions resolved from the header row.
struct Columns {
    employee_id: Option<usize>,
    date: Option<usize>,
    status: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Self {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        Self {
            employee_id: find(CSV_HEADER[0]),
            date: find(CSV_HEADER[1]),
            status: find(CSV_HEADER[2]),
        }
    }

    fn is_complete(&self) -> bool {
        self.employee_id.is_some() && self.date.is_some() && self.status.is_some()
    }

    fn field<'r>(row: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
        index.and_then(|i| row.get(i))
    }
}

impl AttendanceStore {
    /// Header plus one row per record, employees then dates ascending.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(CSV_HEADER)?;
        for (employee_id, records) in &self.records {
            for (date, status) in records {
                writer.write_record([
                    employee_id.to_string(),
                    date.to_string(),
                    status.to_string(),
                ])?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// `{"<employee id>": {"<date>": "<status>"}}`, pretty printed.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.records)?;
        Ok(())
    }

    pub fn write_flat<W: Write>(&self, writer: W, format: ExportFormat) -> Result<()> {
        match format {
            ExportFormat::Csv => self.write_csv(writer),
            ExportFormat::Json => self.write_json(writer),
        }
    }

    /// Best-effort CSV load: each row goes through [`AttendanceStore::add`] and
    /// rows that are incomplete or rejected are skipped. Returns the number added.
    pub fn read_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = Columns::from_header(reader.headers()?);
        if !columns.is_complete() {
            warn!("CSV header lacks one of {:?}; no rows can be imported", CSV_HEADER);
        }

        let mut imported = 0usize;
        for (index, row) in reader.records().enumerate() {
            // header is line 1
            let line = index + 2;
            let row = match row {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!(line, error = %e, "Skipping unreadable CSV row");
                    continue;
                }
            };

            let (Some(raw_id), Some(date), Some(status)) = (
                Columns::field(&row, columns.employee_id),
                Columns::field(&row, columns.date),
                Columns::field(&row, columns.status),
            ) else {
                warn!(line, "Skipping incomplete CSV row");
                continue;
            };

            let Ok(employee_id) = raw_id.trim().parse::<i64>() else {
                warn!(line, employee_id = raw_id, "Skipping CSV row with non-integer employee ID");
                continue;
            };

            match self.add(employee_id, date, status) {
                Ok(()) => imported += 1,
                Err(e) => warn!(line, error = %e, "Skipping invalid CSV row"),
            }
        }

        Ok(imported)
    }

    /// Writes the whole store to `path`. A failure part way through is returned, not retried.
    pub fn export_to_flat_file(&self, path: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_flat(&mut writer, format)?;
        writer.flush()?;

        info!(path = %path.display(), %format, records = self.len(), "Attendance exported");
        Ok(())
    }

    /// Loads a CSV dump from `path` into this store.
    pub fn import_from_flat_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let imported = self.read_csv(BufReader::new(File::open(path)?))?;

        info!(path = %path.display(), imported, "Attendance imported");
        Ok(imported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::Summary;
    use std::str::FromStr;

    fn sample_store() -> AttendanceStore {
        let mut store = AttendanceStore::new();
        store.add(102, "2026-02-02", "Absent").unwrap();
        store.add(101, "2026-02-03", "Leave").unwrap();
        store.add(101, "2026-02-01", "Present").unwrap();
        store
    }

    #[test]
    fn csv_export_is_sorted_with_header() {
        let mut out = Vec::new();
        sample_store().write_csv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Employee_ID,Date,Status\n\
             101,2026-02-01,Present\n\
             101,2026-02-03,Leave\n\
             102,2026-02-02,Absent\n"
        );
    }

    #[test]
    fn json_export_keys_employees_as_text() {
        let mut out = Vec::new();
        sample_store().write_json(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "101": { "2026-02-01": "Present", "2026-02-03": "Leave" },
                "102": { "2026-02-02": "Absent" }
            })
        );
    }

    #[test]
    fn csv_round_trip_reproduces_store() {
        let original = sample_store();
        let mut out = Vec::new();
        original.write_csv(&mut out).unwrap();

        let mut restored = AttendanceStore::new();
        let count = restored.read_csv(out.as_slice()).unwrap();

        assert_eq!(count, original.len());
        assert_eq!(restored.get_all_records(), original.get_all_records());
    }

    #[test]
    fn import_skips_bad_rows_and_counts_good_ones() {
        let csv = "Employee_ID,Date,Status\n\
                   1,2026-02-01,Present\n\
                   2,2026-02-01\n\
                   3,2026-02-01,Late\n\
                   -4,2026-02-01,Absent\n\
                   abc,2026-02-01,Absent\n\
                   6,01-02-2026,Absent\n\
                   7,2026-02-02,Leave\n";

        let mut store = AttendanceStore::new();
        let count = store.read_csv(csv.as_bytes()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(store.employee_count(), 2);
        assert_eq!(store.get_summary(7), Some(Summary { present: 0, absent: 0, leave: 1 }));
    }

    #[test]
    fn import_matches_columns_by_name() {
        let csv = "Status,Note,Date,Employee_ID\nAbsent,sick,2026-02-04, 12\n";
        let mut store = AttendanceStore::new();
        assert_eq!(store.read_csv(csv.as_bytes()).unwrap(), 1);
        assert_eq!(store.get_summary(12).unwrap().absent, 1);
    }

    #[test]
    fn import_without_required_columns_adds_nothing() {
        let csv = "Employee_ID,Date\n1,2026-02-01\n";
        let mut store = AttendanceStore::new();
        assert_eq!(store.read_csv(csv.as_bytes()).unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn files_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("out.csv");
        let json_path = dir.path().join("out.json");

        let original = sample_store();
        original.export_to_flat_file(&csv_path, ExportFormat::Csv).unwrap();
        original.export_to_flat_file(&json_path, ExportFormat::Json).unwrap();
        assert!(json_path.exists());

        let mut restored = AttendanceStore::new();
        assert_eq!(restored.import_from_flat_file(&csv_path).unwrap(), 3);
        assert_eq!(restored.get_all_summaries(), original.get_all_summaries());
    }

    #[test]
    fn import_from_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AttendanceStore::new();
        assert!(store.import_from_flat_file(dir.path().join("missing.csv")).is_err());
    }

    #[test]
    fn export_format_parsing() {
        assert_eq!(ExportFormat::from_str("CSV").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
        assert!(ExportFormat::from_str("xml").is_err());
        assert_eq!(
            ExportFormat::from_path(Path::new("dump/attendance.json")),
            Some(ExportFormat::Json)
        );
        assert_eq!(ExportFormat::from_path(Path::new("attendance")), None);
        assert_eq!(ExportFormat::Csv.to_string(), "csv");
    }
}
