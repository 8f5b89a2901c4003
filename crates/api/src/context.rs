use axum::http::Method;

use storefront_auth::AuthenticatedUser;

use crate::app::errors::ApiError;
use crate::routing::Route;

/// Everything a resource handler knows about the request it serves.
///
/// Built by the dispatcher after authorization succeeded; the user is the one
/// resolved for this request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    method: Method,
    route: Route,
    user: Option<AuthenticatedUser>,
}

impl RequestContext {
    pub fn new(method: Method, route: Route, user: Option<AuthenticatedUser>) -> Self {
        Self { method, route, user }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The caller, for handlers behind authentication.
    pub fn user(&self) -> Result<&AuthenticatedUser, ApiError> {
        self.user.as_ref().ok_or(ApiError::AuthenticationRequired)
    }
}
