use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use utoipa::ToSchema;

use super::{SharedStore, bad_request, lock, not_found};
use crate::error::AttendanceError;
use crate::model::attendance::{EmployeeId, EmployeeRecords, Records};

/// `emp_id` as clients send it: an integer, a float or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawEmployeeId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawEmployeeId {
    /// Floats truncate toward zero; text is trimmed and must hold an integer.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Int(id) => Some(*id),
            Self::Float(id) if id.is_finite() => Some(id.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(raw) => raw.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct AddRecord {
    #[schema(example = 101, value_type = Option<i64>)]
    pub emp_id: Option<RawEmployeeId>,
    #[schema(example = "2026-02-01", format = "date", value_type = String)]
    pub date: Option<String>,
    #[schema(example = "Present", value_type = String)]
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RecordsResponse {
    pub success: bool,
    #[schema(value_type = Object, example = json!({ "101": { "2026-02-01": "Present" } }))]
    pub records: Records,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeRecordsResponse {
    pub success: bool,
    #[schema(example = 101)]
    pub emp_id: EmployeeId,
    #[schema(value_type = Object, example = json!({ "2026-02-01": "Present" }))]
    pub records: EmployeeRecords,
}

/// Add (or overwrite) an attendance record
#[utoipa::path(
    post,
    path = "/api/records",
    request_body = AddRecord,
    responses(
        (status = 201, description = "Record stored", body = MessageResponse, example = json!({
            "success": true,
            "message": "Record added for employee 101"
        })),
        (status = 400, description = "Missing field or invalid ID, date or status", body = ErrorResponse)
    ),
    tag = "Records"
)]
pub async fn add_record(
    store: SharedStore,
    payload: web::Json<AddRecord>,
) -> actix_web::Result<HttpResponse> {
    let AddRecord { emp_id, date, status } = payload.into_inner();

    let (Some(emp_id), Some(date), Some(status)) = (emp_id, date, status) else {
        return Ok(bad_request("emp_id, date and status are required"));
    };
    let Some(emp_id) = emp_id.to_i64() else {
        warn!("Rejected non-numeric employee ID");
        return Ok(bad_request(AttendanceError::InvalidEmployeeId));
    };

    let result = lock(&store)?.add(emp_id, &date, &status);
    match result {
        Ok(()) => {
            info!(emp_id, %date, %status, "Record added");
            Ok(HttpResponse::Created().json(json!({
                "success": true,
                "message": format!("Record added for employee {emp_id}")
            })))
        }
        Err(e) => {
            warn!(error = %e, emp_id, "Rejected attendance record");
            Ok(bad_request(e))
        }
    }
}

/// All attendance records
#[utoipa::path(
    get,
    path = "/api/records",
    responses(
        (status = 200, description = "Every record, keyed by employee then date", body = RecordsResponse)
    ),
    tag = "Records"
)]
pub async fn list_records(store: SharedStore) -> actix_web::Result<HttpResponse> {
    let records = lock(&store)?.get_all_records();
    Ok(HttpResponse::Ok().json(RecordsResponse {
        success: true,
        records,
    }))
}

/// Records of one employee
#[utoipa::path(
    get,
    path = "/api/records/{emp_id}",
    params(
        ("emp_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Records of the employee", body = EmployeeRecordsResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Records"
)]
pub async fn get_employee_records(
    store: SharedStore,
    path: web::Path<EmployeeId>,
) -> actix_web::Result<HttpResponse> {
    let emp_id = path.into_inner();

    let records = lock(&store)?.get_records(emp_id).cloned();
    match records {
        Some(records) => Ok(HttpResponse::Ok().json(EmployeeRecordsResponse {
            success: true,
            emp_id,
            records,
        })),
        None => Ok(not_found("Employee not found")),
    }
}

/// Delete one record
#[utoipa::path(
    delete,
    path = "/api/records/{emp_id}/{date}",
    params(
        ("emp_id" = u64, Path, description = "Employee ID"),
        ("date" = String, Path, description = "Date in YYYY-MM-DD format")
    ),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 400, description = "Malformed date", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse)
    ),
    tag = "Records"
)]
pub async fn delete_record(
    store: SharedStore,
    path: web::Path<(EmployeeId, String)>,
) -> actix_web::Result<HttpResponse> {
    let (emp_id, date) = path.into_inner();

    let result = lock(&store)?.delete(emp_id, &date);
    match result {
        Ok(true) => {
            info!(emp_id, %date, "Record deleted");
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Record deleted"
            })))
        }
        Ok(false) => Ok(not_found("Record not found")),
        Err(e) => Ok(bad_request(e)),
    }
}
