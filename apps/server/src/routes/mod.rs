use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};

use crate::error::ErrorBody;
use crate::state::AppState;

mod health;
mod monitor;
mod reports;

macros_utils::routes! {
    module health,
    module monitor,
    module reports,
}

/// Register shared state, extractor limits and every route.
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<AppState>) {
    let limit = state.max_payload_bytes;

    cfg.app_data(state)
        .app_data(json_config(limit))
        .app_data(web::PayloadConfig::new(limit));

    routes(cfg);
}

/// JSON extraction failures are schema errors: 422, or 413 when oversized.
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit).error_handler(|err, _req| {
        let status = if matches!(err, JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. }) {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        let response = HttpResponse::build(status).json(ErrorBody { error: err.to_string() });
        InternalError::from_response(err, response).into()
    })
}
