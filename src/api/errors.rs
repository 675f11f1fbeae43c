use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::SitescopeError;

impl IntoResponse for SitescopeError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            SitescopeError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            SitescopeError::Config(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
