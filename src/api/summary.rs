use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use super::{SharedStore, lock, not_found, round2};
use crate::model::attendance::{EmployeeId, Summary};
use crate::store::AttendanceStore;

#[derive(Serialize, ToSchema)]
pub struct EmployeeSummary {
    #[schema(example = 103)]
    pub emp_id: EmployeeId,
    pub summary: Summary,
    /// Percentage of records marked Present, two decimals
    #[schema(example = 50.0)]
    pub attendance_rate: f64,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeSummaryResponse {
    pub success: bool,
    #[serde(flatten)]
    pub data: EmployeeSummary,
}

#[derive(Serialize, ToSchema)]
pub struct SummaryListResponse {
    pub success: bool,
    pub data: Vec<EmployeeSummary>,
}

fn summarize(store: &AttendanceStore, emp_id: EmployeeId) -> Option<EmployeeSummary> {
    let summary = store.get_summary(emp_id)?;
    let rate = store.get_attendance_rate(emp_id).unwrap_or(0.0);
    Some(EmployeeSummary {
        emp_id,
        summary,
        attendance_rate: round2(rate),
    })
}

/// Summary and attendance rate of one employee
#[utoipa::path(
    get,
    path = "/api/summary/{emp_id}",
    params(
        ("emp_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Status counts and rate", body = Object, example = json!({
            "success": true,
            "emp_id": 103,
            "summary": { "Present": 1, "Absent": 1, "Leave": 0 },
            "attendance_rate": 50.0
        })),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Summary"
)]
pub async fn employee_summary(
    store: SharedStore,
    path: web::Path<EmployeeId>,
) -> actix_web::Result<HttpResponse> {
    let emp_id = path.into_inner();

    let store = lock(&store)?;
    let data = summarize(&store, emp_id);
    match data {
        Some(data) => Ok(HttpResponse::Ok().json(EmployeeSummaryResponse { success: true, data })),
        None => Ok(not_found("Employee not found")),
    }
}

/// Summaries of every employee, ascending by ID
#[utoipa::path(
    get,
    path = "/api/summary",
    responses(
        (status = 200, description = "One entry per employee", body = SummaryListResponse)
    ),
    tag = "Summary"
)]
pub async fn all_summaries(store: SharedStore) -> actix_web::Result<HttpResponse> {
    let store = lock(&store)?;

    let data = store
        .get_all_summaries()
        .into_iter()
        .map(|(emp_id, summary)| EmployeeSummary {
            emp_id,
            summary,
            attendance_rate: round2(store.get_attendance_rate(emp_id).unwrap_or(0.0)),
        })
        .collect();

    Ok(HttpResponse::Ok().json(SummaryListResponse {
        success: true,
        data,
    }))
}
