//! API error types with IntoResponse
//!
//! Every handler returns `Result<_, ApiError>`, and extractor rejections are
//! mapped into it, so all failures render as
//! `{"error": code, "message": text}` with the status picked here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::{InvalidListQuery, PokemonId, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Unreadable request body (400)
    BadRequest { message: String },

    /// Path id is not an integer (400)
    InvalidId { raw: String },

    /// `count`/`after` are not integers (400)
    InvalidListQuery,

    /// Document failed schema validation (400)
    Validation(ValidationError),

    /// No record with this id (404)
    NotFound { id: PokemonId },

    /// Id already taken (409)
    Conflict { id: PokemonId },

    /// Database error (500, logged)
    Database(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. }
            | Self::InvalidId { .. }
            | Self::InvalidListQuery
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the `error` field
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "bad_request",
            Self::InvalidId { .. } => "missing_id",
            Self::InvalidListQuery => "invalid_query",
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Database(_) => "internal_error",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::BadRequest { message } => message.clone(),
            Self::InvalidId { raw } if raw.is_empty() => "Missing ID".to_string(),
            Self::InvalidId { raw } => format!("Missing ID: '{}' is not a pokemon id", raw),
            Self::InvalidListQuery => InvalidListQuery.to_string(),
            Self::Validation(e) => e.to_string(),
            Self::NotFound { .. } => "Pokemon Not Found".to_string(),
            Self::Conflict { id } => format!("Pokemon {} already exists", id),
            Self::Database(_) => "Pokemon DB Error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Database(e) = &self {
            // Log the actual error, return generic message
            tracing::error!("Database error: {}", e);
        }

        let body = json!({
            "error": self.code(),
            "message": self.message()
        });

        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<InvalidListQuery> for ApiError {
    fn from(_: InvalidListQuery) -> Self {
        Self::InvalidListQuery
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate { id } => Self::Conflict { id },
            _ => Self::Database(e),
        }
    }
}
