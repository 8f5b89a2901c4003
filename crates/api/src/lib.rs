//! HTTP API: request dispatch, authorization and resource handlers.
//!
//! Request flow (see [`dispatcher`]):
//! `routing` → static short-circuit → `negotiate` → `middleware` (authenticate)
//! → `authz` → body parsing → `app::routes` handler → response.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod middleware;
pub mod negotiate;
pub mod routing;
