use thiserror::Error;

use crate::model::attendance::Status;

#[derive(Error, Debug)]
pub enum AttendanceError {
    #[error("Invalid employee ID")]
    InvalidEmployeeId,

    #[error("Date must be in YYYY-MM-DD format")]
    InvalidDateFormat,

    #[error("Status must be one of {}", Status::vocabulary())]
    InvalidStatus,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AttendanceError {
    /// true for bad caller input, false for file/codec failures
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AttendanceError::InvalidEmployeeId
                | AttendanceError::InvalidDateFormat
                | AttendanceError::InvalidStatus
        )
    }
}

pub type Result<T> = std::result::Result<T, AttendanceError>;
