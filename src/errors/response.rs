use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::errors::AppError;

// The IntoResponse trait implementation converts AppError into a well-formed HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Authentication errors redirect to the login page
            AppError::Auth(msg) => {
                tracing::warn!("Authentication failure: {}", msg);
                Redirect::to("/login").into_response()
            }

            // File errors are internal server errors
            AppError::File(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("File error: {}", e),
            )
                .into_response(),
        }
    }
}
