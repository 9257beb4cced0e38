//! API error rendering.
//!
//! The handlers surface core errors as JSON `{error, message}` descriptors,
//! where `error` is the taxonomy's stable category tag. Raw driver errors
//! never reach a response body; they are logged server-side instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use seedbed_core::{ProvisionError, RetrieveError};

/// API error type with automatic HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
    Provision(ProvisionError),
    Retrieve(RetrieveError),
}

impl ApiError {
    fn category(&self) -> &'static str {
        match self {
            Self::Provision(e) => e.category(),
            Self::Retrieve(e) => e.category(),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Provision(e) => e.to_string(),
            Self::Retrieve(e) => e.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self.category() {
            "connection" => StatusCode::BAD_GATEWAY,
            "timeout" => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, category, message) = (self.status(), self.category(), self.message());

        // Log the full chain including driver causes; the body carries
        // only the category and the human message.
        match &self {
            Self::Provision(e) => tracing::error!("provisioning failed: {e:?}"),
            Self::Retrieve(e) => tracing::error!("retrieval failed: {e:?}"),
        }

        let body = Json(json!({
            "error": category,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<ProvisionError> for ApiError {
    fn from(e: ProvisionError) -> Self {
        Self::Provision(e)
    }
}

impl From<RetrieveError> for ApiError {
    fn from(e: RetrieveError) -> Self {
        Self::Retrieve(e)
    }
}
