use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use super::records::RecordsResponse;
use super::{SharedStore, bad_request, lock};

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DateRange {
    #[schema(example = "2026-02-01")]
    /// First day included (YYYY-MM-DD)
    pub start_date: Option<String>,
    #[schema(example = "2026-02-03")]
    /// Last day included (YYYY-MM-DD)
    pub end_date: Option<String>,
}

/// Records whose date falls in an inclusive range
#[utoipa::path(
    get,
    path = "/api/filter",
    params(DateRange),
    responses(
        (status = 200, description = "Matching records; employees with none are omitted", body = RecordsResponse),
        (status = 400, description = "Missing or malformed bound", body = ErrorResponse)
    ),
    tag = "Records"
)]
pub async fn filter_records(
    store: SharedStore,
    query: web::Query<DateRange>,
) -> actix_web::Result<HttpResponse> {
    let DateRange {
        start_date,
        end_date,
    } = query.into_inner();

    let (Some(start_date), Some(end_date)) = (
        start_date.filter(|s| !s.is_empty()),
        end_date.filter(|s| !s.is_empty()),
    ) else {
        return Ok(bad_request("start_date and end_date are required"));
    };

    let result = lock(&store)?.filter_by_date_range(&start_date, &end_date);
    match result {
        Ok(records) => {
            debug!(%start_date, %end_date, employees = records.len(), "Filtered records");
            Ok(HttpResponse::Ok().json(RecordsResponse {
                success: true,
                records,
            }))
        }
        Err(e) => Ok(bad_request(e)),
    }
}
