use crate::api::filter::DateRange;
use crate::api::records::{AddRecord, EmployeeRecordsResponse, RecordsResponse};
use crate::api::summary::{EmployeeSummary, SummaryListResponse};
use crate::api::transfer::{ExportQuery, ImportResponse};
use crate::api::{ErrorResponse, MessageResponse};
use crate::model::attendance::{Status, Summary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Smart Attendance API",
        version = "1.0.0",
        description = r#"
## Smart Attendance

Daily attendance per employee: one status (**Present**, **Absent** or **Leave**) per employee per calendar date.

### 🔹 Key Features
- **Records**
  - Add, overwrite, list and delete daily records
  - Filter by an inclusive date range
- **Summary**
  - Status counts and attendance rate per employee
- **Transfer**
  - CSV / JSON export, best-effort CSV import

### 📦 Response Format
- JSON envelope with a `success` flag plus `message`, `error` or payload
- Validation failures answer 400, unknown employees or records 404

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health,

        crate::api::records::add_record,
        crate::api::records::list_records,
        crate::api::records::get_employee_records,
        crate::api::records::delete_record,
        crate::api::filter::filter_records,

        crate::api::summary::employee_summary,
        crate::api::summary::all_summaries,

        crate::api::transfer::export_records,
        crate::api::transfer::import_records
    ),
    components(
        schemas(
            Status,
            Summary,
            AddRecord,
            RecordsResponse,
            EmployeeRecordsResponse,
            DateRange,
            EmployeeSummary,
            SummaryListResponse,
            ExportQuery,
            ImportResponse,
            MessageResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Records", description = "Attendance record APIs"),
        (name = "Summary", description = "Per-employee counts and rates"),
        (name = "Transfer", description = "Flat-file export and import"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/health",
            "/api/records",
            "/api/records/{emp_id}",
            "/api/records/{emp_id}/{date}",
            "/api/filter",
            "/api/summary",
            "/api/summary/{emp_id}",
            "/api/export",
            "/api/import",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
