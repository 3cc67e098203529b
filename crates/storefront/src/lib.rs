//! Webshop storefront library.
//!
//! Serves the cart API and the static client application. Exposed as a
//! library so the router can be exercised in integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;

use axum::{Router, http::Request};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the storefront router.
///
/// Unknown paths fall through to the static client application, so the
/// returned router covers the whole site. Sentry layers are added by the
/// binary.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    });

    routes::routes()
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(trace)
                .layer(axum::middleware::from_fn(
                    middleware::request_id_middleware,
                )),
        )
}
