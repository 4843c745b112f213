use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;

use crate::state::AppState;

macros_utils::routes! {
    route health_route,
}

/// Names of the services this process exposes
pub const SERVICES: [&str; 2] = ["api_monitor", "report_generator"];

#[derive(Debug, Serialize)]
struct HealthResponse {
    operational: bool,
    version: &'static str,
    uptime: u64,
    services: [&'static str; 2],
}

/// Health check route
#[get("/")]
pub async fn health_route(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        operational: true,
        version: sentinel::VERSION,
        uptime: state.uptime_secs(),
        services: SERVICES,
    })
}
