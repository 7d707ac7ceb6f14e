pub mod filter;
pub mod records;
pub mod summary;
pub mod transfer;

use std::sync::{Mutex, MutexGuard};

use actix_web::{
    Error, HttpRequest, HttpResponse, Responder,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
    web,
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::store::AttendanceStore;

/// The one store every handler works on, behind a single coarse lock.
pub type SharedStore = web::Data<Mutex<AttendanceStore>>;

pub fn shared_store(store: AttendanceStore) -> SharedStore {
    web::Data::new(Mutex::new(store))
}

pub(crate) fn lock(store: &SharedStore) -> actix_web::Result<MutexGuard<'_, AttendanceStore>> {
    store.lock().map_err(|_| {
        tracing::error!("Attendance store lock poisoned");
        internal_error()
    })
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Record deleted")]
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Date must be in YYYY-MM-DD format")]
    pub error: String,
}

pub(crate) fn error_body(message: impl ToString) -> serde_json::Value {
    json!({ "success": false, "error": message.to_string() })
}

pub(crate) fn bad_request(message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(error_body(message))
}

pub(crate) fn not_found(message: impl ToString) -> HttpResponse {
    HttpResponse::NotFound().json(error_body(message))
}

/// 500 in the same envelope as every other failure.
pub(crate) fn internal_error() -> Error {
    let response = HttpResponse::InternalServerError().json(error_body("Internal server error"));
    InternalError::from_response("internal server error", response).into()
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "status": "healthy",
            "service": "Smart Attendance API"
        }))
    ),
    tag = "Health"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "Smart Attendance API"
    }))
}

/// Fallback for unmatched routes
pub async fn endpoint_not_found() -> HttpResponse {
    not_found("Endpoint not found")
}

// -------------------- Extractor error envelopes --------------------

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = bad_request(&err);
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let response = bad_request(&err);
    InternalError::from_response(err, response).into()
}

/// Path segments that don't parse (e.g. a negative employee ID) never matched a route.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> Error {
    let response = not_found("Endpoint not found");
    InternalError::from_response(err, response).into()
}

/// Rounds a rate for display.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
