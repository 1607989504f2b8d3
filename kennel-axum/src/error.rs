use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kennel_core::errors::KennelError;

/// Plain-text body of the catch-all 500.
pub const FALLBACK_BODY: &str = "Something broke!";

pub(crate) fn fallback_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_BODY).into_response()
}

#[derive(Debug)]
pub struct KennelAxumError(pub anyhow::Error);

impl From<anyhow::Error> for KennelAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for KennelAxumError {
    fn into_response(self) -> Response {
        // A KennelError anywhere in the chain decides status and payload
        if let Some(kennel) = KennelError::find_in(&self.0) {
            if kennel.kind.is_server_error() {
                tracing::error!(error = ?self.0, "{kennel}");
            } else {
                tracing::debug!(errors = ?kennel.errors, "{kennel}");
            }

            let safe = kennel.sanitize_for_client();
            let status = StatusCode::from_u16(safe.code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return (status, Json(safe.to_json())).into_response();
        }

        // Anything unclassified: log the cause, answer with the generic text
        tracing::error!(error = ?self.0, "unhandled error");
        fallback_response()
    }
}
