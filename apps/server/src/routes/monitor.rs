use actix_web::{HttpResponse, post, web};
use sentinel::{BatchRunner, MonitorRequest, validate_monitor_request};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

macros_utils::routes! {
    route monitor_route,
}

/// Probe every endpoint of the request and return the scored batch.
///
/// Per-endpoint failures are part of the 200 response body; only a request
/// that fails validation is rejected.
#[post("/monitor/api")]
pub async fn monitor_route(
    state: web::Data<AppState>,
    request: web::Json<MonitorRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    info!(
        "Monitor request: {} endpoints, timeout {}s, expected keys {}",
        request.endpoints.len(),
        request.timeout,
        request.expected_keys().map_or(0, <[String]>::len)
    );

    validate_monitor_request(&request, &state.limits)?;

    let response = BatchRunner::for_request(&request).run(&request).await;
    Ok(HttpResponse::Ok().json(response))
}
