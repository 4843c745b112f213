use std::io::Error as IoError;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sentinel::{ReportError, ValidationError};
use serde::Serialize;
use thiserror::Error;

use crate::config;

/// Startup failures of the server binary
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
    #[error("Address parsing error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),
}

/// Errors returned to API callers as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("{0}")]
    BadPayload(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadPayload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Report(ReportError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Report(ReportError::Csv(_) | ReportError::Schema(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Report(ReportError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            Self::Report(ReportError::NotFound(_)) => "File not found".to_string(),
            Self::Report(ReportError::Io(_)) => "Failed to store report".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody { error })
    }
}
