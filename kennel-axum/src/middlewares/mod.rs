//! HTTP layers applied to every Kennel router.
//!
//! Outermost first:
//! 1. assign `x-request-id` (UUID) when the caller did not send one
//! 2. trace span per request
//! 3. copy `x-request-id` onto the response
//! 4. turn handler panics into the generic 500

pub mod catch_panic;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub fn with_http_layers(router: Router<()>) -> Router<()> {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CatchPanicLayer::custom(catch_panic::panic_response)),
    )
}
