//! Request pipeline.
//!
//! Every request runs the same fixed stages:
//! `Routing → Negotiating → Authenticating → Authorizing → Handling → Responding`.
//! Static assets leave after `Routing`; `OPTIONS` is answered right after it.
//! The request body is only read once authorization said `Allow`.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::extract::{Extension, Request};
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::app::errors::ApiError;
use crate::app::reply::Reply;
use crate::app::routes;
use crate::app::services::AppServices;
use crate::authz::{self, Ownership};
use crate::context::RequestContext;
use crate::middleware;
use crate::negotiate;
use crate::routing::{self, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Routing,
    Negotiating,
    Authenticating,
    Authorizing,
    Handling,
    Responding,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Routing => "routing",
            Stage::Negotiating => "negotiating",
            Stage::Authenticating => "authenticating",
            Stage::Authorizing => "authorizing",
            Stage::Handling => "handling",
            Stage::Responding => "responding",
        }
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error together with the stage that produced it.
type Staged<T> = Result<T, (Stage, ApiError)>;

trait AtStage<T> {
    fn at(self, stage: Stage) -> Staged<T>;
}

impl<T> AtStage<T> for Result<T, ApiError> {
    fn at(self, stage: Stage) -> Staged<T> {
        self.map_err(|e| (stage, e))
    }
}

/// Fallback handler: the single entry point for every request.
pub async fn dispatch(
    Extension(services): Extension<Arc<AppServices>>,
    req: Request,
) -> Response {
    let method = req.method().clone();
    let route = routing::match_route(&method, req.uri().path());
    tracing::debug!(stage = %Stage::Routing, %method, path = %req.uri().path(), ?route, "route matched");

    if let Route::StaticAsset(asset) = &route {
        return serve_static(&services, asset, req).await;
    }

    let result = if method == Method::OPTIONS {
        preflight(&route).at(Stage::Routing)
    } else {
        run(&services, method, route.clone(), req).await
    };

    respond(&route, result)
}

async fn run(services: &AppServices, method: Method, route: Route, req: Request) -> Staged<Reply> {
    negotiate::negotiate(&method, req.headers()).at(Stage::Negotiating)?;

    let user = middleware::authenticate(services, req.headers()).at(Stage::Authenticating)?;
    tracing::debug!(
        stage = %Stage::Authenticating,
        user_id = user.as_ref().map(|u| u.id.to_string()),
        "caller resolved"
    );

    authz::decide(&route, &method, user.as_ref(), Ownership::Unresolved)
        .into_result()
        .at(Stage::Authorizing)?;

    let body = read_body(&method, req, services.body_limit)
        .await
        .at(Stage::Handling)?;

    let ctx = RequestContext::new(method, route, user);
    routes::handle(services, &ctx, body).at(Stage::Handling)
}

fn preflight(route: &Route) -> Result<Reply, ApiError> {
    match route {
        Route::Unknown => Err(ApiError::UnknownRoute),
        known => Ok(Reply::Preflight(known.allowed_methods())),
    }
}

/// JSON body of a `POST`/`PUT`; `None` for other methods or an empty body.
async fn read_body(method: &Method, req: Request, limit: usize) -> Result<Option<Value>, ApiError> {
    if !negotiate::carries_body(method) {
        return Ok(None);
    }

    let bytes = to_bytes(req.into_body(), limit).await.map_err(|e| {
        let inner = e.into_inner();
        if inner.is::<LengthLimitError>() {
            ApiError::PayloadTooLarge
        } else {
            ApiError::bad_request(format!("Unreadable body: {inner}"))
        }
    })?;
    if bytes.is_empty() {
        return Ok(None);
    }

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

async fn serve_static(services: &AppServices, asset: &str, mut req: Request) -> Response {
    match Uri::try_from(format!("/{asset}")) {
        Ok(uri) => *req.uri_mut() = uri,
        Err(e) => {
            return respond(
                &Route::StaticAsset(asset.to_string()),
                Err((Stage::Routing, ApiError::bad_request(e.to_string()))),
            );
        }
    }

    match ServeDir::new(&services.public_dir).oneshot(req).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}

fn respond(route: &Route, result: Staged<Reply>) -> Response {
    match result {
        Ok(reply) => {
            tracing::debug!(stage = %Stage::Responding, ?route, status = %reply.status(), "request handled");
            reply.into_response()
        }
        Err((stage, ApiError::Internal(detail))) => {
            tracing::error!(%stage, ?route, error = %detail, "request failed");
            ApiError::Internal(detail).into_response()
        }
        Err((stage, err)) => {
            tracing::debug!(%stage, ?route, status = %err.status(), error = %err, "request rejected");
            err.into_response()
        }
    }
}
