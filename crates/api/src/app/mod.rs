//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: process-owned collaborators (stores, authenticator)
//! - `routes/`: resource handlers, one file per collection
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: error taxonomy and consistent error responses
//! - `reply.rs`: successful handler results

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::dispatcher;

pub mod dto;
pub mod errors;
pub mod reply;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Every request goes through one fallback handler: paths are classified by
/// [`crate::routing`] rather than by axum's router, so the pipeline order is
/// identical for all of them.
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .fallback(dispatcher::dispatch)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}
