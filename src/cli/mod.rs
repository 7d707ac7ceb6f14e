//! `attendance` command line: parses arguments, runs one store operation and
//! prints the outcome.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::model::attendance::{EmployeeId, Status, Summary};
use crate::store::{AttendanceStore, ExportFormat};

#[derive(Parser, Debug)]
#[command(name = "attendance")]
#[command(author, version, about = "Smart Attendance CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// CSV file the store is loaded from and, after a change, saved back to
    #[arg(long, env = "ATTENDANCE_DATA_FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add an attendance record
    Add {
        /// Employee ID
        #[arg(allow_negative_numbers = true)]
        emp_id: i64,
        /// Date in YYYY-MM-DD format
        date: String,
        /// Present, Absent or Leave
        status: String,
    },

    /// Show summary for an employee
    Summary {
        /// Employee ID
        emp_id: EmployeeId,
    },

    /// List summaries for all employees
    List,

    /// Show every record of an employee
    Records {
        /// Employee ID
        emp_id: EmployeeId,
    },

    /// Delete one record
    Delete {
        /// Employee ID
        emp_id: EmployeeId,
        /// Date in YYYY-MM-DD format
        date: String,
    },

    /// Show records between two dates (inclusive)
    Filter {
        /// First day, YYYY-MM-DD
        start_date: String,
        /// Last day, YYYY-MM-DD
        end_date: String,
    },

    /// Write all records to a CSV or JSON file
    Export {
        path: PathBuf,
        /// csv or json; guessed from the extension when omitted
        #[arg(long)]
        format: Option<ExportFormat>,
    },

    /// Load records from a CSV file, skipping invalid rows
    Import { path: PathBuf },
}

impl Command {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add { .. } | Command::Delete { .. } | Command::Import { .. }
        )
    }
}

fn load(data_file: Option<&Path>) -> Result<AttendanceStore> {
    let mut store = AttendanceStore::new();
    if let Some(path) = data_file.filter(|p| p.exists()) {
        let imported = store
            .import_from_flat_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        debug!(path = %path.display(), imported, "Loaded data file");
    }
    Ok(store)
}

fn format_summary(summary: &Summary, rate: f64) -> String {
    let counts: Vec<String> = Status::iter()
        .map(|status| format!("{status}: {}", summary.count(status)))
        .collect();
    format!("{}  Rate: {rate:.1}%", counts.join("  "))
}

/// Runs one command, writing human-readable output to `out`.
/// Validation and file errors come back as `Err`; "not found" is normal output.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let data_file = cli.data_file.as_deref();
    let mut store = load(data_file)?;
    let mutates = cli.command.mutates();

    match cli.command {
        Command::Add {
            emp_id,
            date,
            status,
        } => {
            store.add(emp_id, &date, &status)?;
            writeln!(out, "Record added.")?;
        }

        Command::Summary { emp_id } => match store.get_summary(emp_id) {
            Some(summary) => {
                let rate = store.get_attendance_rate(emp_id).unwrap_or(0.0);
                writeln!(out, "Employee {emp_id}: {}", format_summary(&summary, rate))?;
            }
            None => writeln!(out, "No records found for this employee.")?,
        },

        Command::List => {
            let summaries = store.get_all_summaries();
            if summaries.is_empty() {
                writeln!(out, "No attendance records yet.")?;
            }
            for (emp_id, summary) in &summaries {
                let rate = store.get_attendance_rate(*emp_id).unwrap_or(0.0);
                writeln!(out, "{emp_id}  {}", format_summary(summary, rate))?;
            }
        }

        Command::Records { emp_id } => match store.get_records(emp_id) {
            Some(records) => {
                for (date, status) in records {
                    writeln!(out, "{date}  {status}")?;
                }
            }
            None => writeln!(out, "No records found for this employee.")?,
        },

        Command::Delete { emp_id, date } => {
            if store.delete(emp_id, &date)? {
                writeln!(out, "Record deleted.")?;
            } else {
                writeln!(out, "Record not found.")?;
            }
        }

        Command::Filter {
            start_date,
            end_date,
        } => {
            let filtered = store.filter_by_date_range(&start_date, &end_date)?;
            if filtered.is_empty() {
                writeln!(out, "No records found in the selected date range.")?;
            }
            for (emp_id, records) in &filtered {
                for (date, status) in records {
                    writeln!(out, "{emp_id}  {date}  {status}")?;
                }
            }
        }

        Command::Export { path, format } => {
            let format = format
                .or_else(|| ExportFormat::from_path(&path))
                .unwrap_or(ExportFormat::Csv);
            store.export_to_flat_file(&path, format)?;
            writeln!(
                out,
                "Exported {} records to {}",
                store.len(),
                path.display()
            )?;
        }

        Command::Import { path } => {
            let imported = store.import_from_flat_file(&path)?;
            writeln!(out, "Imported {imported} records.")?;
        }
    }

    if mutates {
        if let Some(path) = data_file {
            store
                .export_to_flat_file(path, ExportFormat::Csv)
                .with_context(|| format!("failed to save {}", path.display()))?;
            info!(path = %path.display(), records = store.len(), "Saved data file");
        }
    }

    Ok(())
}
