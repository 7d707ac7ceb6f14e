//! Daily attendance tracking: one status per employee per date, with summaries,
//! attendance rates, date-range filters and flat-file export/import.
//!
//! The HTTP server (`attendance-tracker`) and the CLI (`attendance`) are thin
//! layers over [`AttendanceStore`].

pub mod api;
pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;
pub mod utils;

pub use error::{AttendanceError, Result};
pub use model::attendance::{EmployeeId, EmployeeRecords, Records, Status, Summary};
pub use store::{AttendanceStore, ExportFormat};
