use std::any::Any;

use axum::response::Response;

use crate::error::fallback_response;

/// Response for a handler that panicked. The payload is logged, never sent.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "request handler panicked");
    fallback_response()
}
