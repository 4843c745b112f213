use actix_web::http::header::{CONTENT_DISPOSITION, ContentType};
use actix_web::{HttpResponse, get, post, web};
use sentinel::report::{DataFrame, sanitize_name};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

macros_utils::routes! {
    route analyze_csv_route,
    route analyze_dataframe_route,
    route download_route,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    filename: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReportCreated {
    message: &'static str,
    report: String,
}

fn created(name: &str) -> HttpResponse {
    HttpResponse::Ok().json(ReportCreated { message: "Analysis complete", report: format!("/download/{name}") })
}

/// Profile an uploaded CSV file sent as the raw request body
#[post("/analyze/")]
pub async fn analyze_csv_route(
    state: web::Data<AppState>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadPayload("Uploaded file is empty".into()));
    }

    let filename = query.into_inner().filename.unwrap_or_else(|| "upload.csv".to_string());
    info!("Profiling CSV upload {} ({} bytes)", filename, body.len());

    let name = state.reports.generate_from_csv(&filename, &body).await?;
    Ok(created(&name))
}

/// Profile a typed column set
#[post("/analyze/dataframe/")]
pub async fn analyze_dataframe_route(
    state: web::Data<AppState>,
    frame: web::Json<DataFrame>,
) -> Result<HttpResponse, ApiError> {
    info!("Profiling data frame with {} columns", frame.columns.len());

    let name = state.reports.generate_from_frame(&frame).await?;
    Ok(created(&name))
}

/// Download a generated report
#[get("/download/{filename}")]
pub async fn download_route(
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let name = sanitize_name(&filename);
    let contents = state.reports.load(&name).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((CONTENT_DISPOSITION, format!("attachment; filename=\"report_{name}.html\"")))
        .body(contents))
}
