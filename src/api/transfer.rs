use actix_web::{HttpResponse, http::header, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};

use super::{SharedStore, bad_request, internal_error, lock};
use crate::store::ExportFormat;

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    #[schema(example = "csv")]
    /// `csv` (default) or `json`
    pub format: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ImportResponse {
    pub success: bool,
    #[schema(example = 12)]
    pub imported: usize,
    #[schema(example = "Imported 12 records")]
    pub message: String,
}

/// Download every record as a CSV or JSON file
#[utoipa::path(
    get,
    path = "/api/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "File contents", body = String, content_type = "text/csv"),
        (status = 400, description = "Unknown format", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Transfer"
)]
pub async fn export_records(
    store: SharedStore,
    query: web::Query<ExportQuery>,
) -> actix_web::Result<HttpResponse> {
    let format = match query.format.as_deref() {
        None | Some("") => ExportFormat::Csv,
        Some(raw) => match raw.parse::<ExportFormat>() {
            Ok(format) => format,
            Err(_) => return Ok(bad_request("format must be csv or json")),
        },
    };

    let mut body = Vec::new();
    lock(&store)?.write_flat(&mut body, format).map_err(|e| {
        error!(error = %e, %format, "Export failed");
        internal_error()
    })?;

    Ok(HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", format.file_name()),
        ))
        .body(body))
}

/// Upload a CSV dump; bad rows are skipped
#[utoipa::path(
    post,
    path = "/api/import",
    request_body(content = String, content_type = "text/csv", description = "Employee_ID,Date,Status rows with header"),
    responses(
        (status = 200, description = "Rows added", body = ImportResponse),
        (status = 400, description = "Body is not readable CSV", body = ErrorResponse)
    ),
    tag = "Transfer"
)]
pub async fn import_records(store: SharedStore, body: web::Bytes) -> actix_web::Result<HttpResponse> {
    let result = lock(&store)?.read_csv(body.as_ref());
    match result {
        Ok(imported) => {
            info!(imported, bytes = body.len(), "CSV upload imported");
            Ok(HttpResponse::Ok().json(ImportResponse {
                success: true,
                imported,
                message: format!("Imported {imported} records"),
            }))
        }
        Err(e) => Ok(bad_request(e)),
    }
}
