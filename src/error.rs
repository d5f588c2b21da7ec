use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("movie lookup timed out")]
    LookupTimeout,

    #[error("movie lookup unavailable: {0}")]
    LookupUnavailable(#[source] reqwest::Error),

    #[error("movie lookup failed: {0}")]
    LookupNotFound(String),

    #[error("database error: {0}")]
    Database(#[source] DbErr),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::LookupTimeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::LookupUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::LookupNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => {
                AppError::ConstraintViolation(message)
            },
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                AppError::ConstraintViolation(message)
            },
            _ => AppError::Database(err),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { AppError::LookupTimeout } else { AppError::LookupUnavailable(err) }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Html(crate::templates::error_page(&self.to_string()))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
