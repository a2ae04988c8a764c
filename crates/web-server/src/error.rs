use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
}

/// Converts our custom `AppError` into an HTTP response carrying the
/// `{success: false, error, details}` failure envelope.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch storefront data".to_string(),
                    db_err.to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
            "details": details,
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::DbError;

    #[test]
    fn database_errors_map_to_internal_server_error() {
        let err = AppError::Database(DbError::ConnectionConfigError(
            "DATABASE_URL must be set.".to_string(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
