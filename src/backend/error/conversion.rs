/**
 * Error Conversion
 *
 * Conversion implementations for backend errors: the Axum `IntoResponse`
 * impl and `From` impls for the policy and config layers.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 *
 * Validation failures also carry `"field"`.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;
use crate::backend::policy::Denied;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self);
        } else {
            tracing::debug!("Request failed ({}): {}", status.as_u16(), message);
        }

        let mut body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });
        if let BackendError::SharedError(shared) = &self {
            if let Some(field) = shared.field() {
                body["field"] = serde_json::Value::from(field);
            }
        }

        (status, Json(body)).into_response()
    }
}

impl From<Denied> for BackendError {
    fn from(denied: Denied) -> Self {
        BackendError::forbidden(denied.reason)
    }
}
