//! Authorization policy.
//!
//! Pure: `(route, method, user, ownership) -> AuthDecision`. Nothing here
//! touches storage; ownership of an order is only known after lookup, so the
//! orders handler calls [`decide`] a second time with [`Ownership::OwnedBy`].

use axum::http::Method;

use storefront_auth::AuthenticatedUser;
use storefront_core::UserId;

use crate::app::errors::ApiError;
use crate::routing::{Collection, Route};

/// Terminal outcome of the policy for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Forbidden,
    ChallengeAuthentication,
    NotFound,
    MethodNotAllowed,
    BadRequest(String),
}

impl AuthDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AuthDecision::Allow)
    }

    /// `Ok(())` on `Allow`, otherwise the error the response is built from.
    pub fn into_result(self) -> Result<(), ApiError> {
        match self {
            AuthDecision::Allow => Ok(()),
            AuthDecision::Forbidden => Err(ApiError::InsufficientRole),
            AuthDecision::ChallengeAuthentication => Err(ApiError::AuthenticationRequired),
            AuthDecision::NotFound => Err(ApiError::UnknownRoute),
            AuthDecision::MethodNotAllowed => Err(ApiError::MethodNotAllowed),
            AuthDecision::BadRequest(reason) => Err(ApiError::BadRequest(reason)),
        }
    }
}

/// What is known about the owner of the targeted resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership<'a> {
    /// Not looked up yet (every pre-handler decision).
    Unresolved,
    OwnedBy(&'a UserId),
}

/// Decide whether `user` may perform `method` on `route`.
///
/// Precedence: authentication, unknown route, method, then per-collection
/// role and ownership rules. A missing user on a protected route always wins
/// over every later rule, so anonymous callers learn nothing about paths.
pub fn decide(
    route: &Route,
    method: &Method,
    user: Option<&AuthenticatedUser>,
    ownership: Ownership<'_>,
) -> AuthDecision {
    if route.requires_authentication() && user.is_none() {
        return AuthDecision::ChallengeAuthentication;
    }

    if matches!(route, Route::Unknown) {
        return AuthDecision::NotFound;
    }

    if !route.allows(method) {
        return AuthDecision::MethodNotAllowed;
    }

    let Some(user) = user else {
        // Register and static assets.
        return AuthDecision::Allow;
    };

    match route {
        Route::Collection(Collection::Users) => admin_only(user),
        Route::Resource(Collection::Users, target) => {
            if !user.is_admin() {
                return AuthDecision::Forbidden;
            }
            if method != Method::GET && user.id.as_str() == target.as_str() {
                tracing::debug!(user_id = %user.id, %method, "admin attempted to modify own account");
                return AuthDecision::Forbidden;
            }
            AuthDecision::Allow
        }
        Route::Resource(Collection::Products, _) if method != Method::GET => admin_only(user),
        Route::Collection(Collection::Orders) if method == Method::POST => {
            if user.is_admin() {
                AuthDecision::Forbidden
            } else {
                AuthDecision::Allow
            }
        }
        Route::Resource(Collection::Orders, _) => match ownership {
            Ownership::OwnedBy(owner) if !user.is_admin() && owner != &user.id => {
                AuthDecision::NotFound
            }
            _ => AuthDecision::Allow,
        },
        _ => AuthDecision::Allow,
    }
}

fn admin_only(user: &AuthenticatedUser) -> AuthDecision {
    if user.is_admin() {
        AuthDecision::Allow
    } else {
        AuthDecision::Forbidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_auth::Role;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(),
            email: format!("{role}@email.com"),
            role,
        }
    }

    fn resource(collection: Collection, id: &UserId) -> Route {
        Route::Resource(collection, id.to_string())
    }

    #[test]
    fn anonymous_is_challenged_before_anything_else() {
        for (route, method) in [
            (Route::Collection(Collection::Users), Method::GET),
            (Route::Collection(Collection::Products), Method::DELETE),
            (Route::Unknown, Method::GET),
        ] {
            assert_eq!(
                decide(&route, &method, None, Ownership::Unresolved),
                AuthDecision::ChallengeAuthentication
            );
        }
    }

    #[test]
    fn register_is_open_to_anonymous_posts_only() {
        let register = Route::Collection(Collection::Register);
        assert_eq!(
            decide(&register, &Method::POST, None, Ownership::Unresolved),
            AuthDecision::Allow
        );
        assert_eq!(
            decide(&register, &Method::GET, None, Ownership::Unresolved),
            AuthDecision::MethodNotAllowed
        );
    }

    #[test]
    fn unknown_route_is_not_found_for_authenticated_callers() {
        let admin = user(Role::Admin);
        assert_eq!(
            decide(&Route::Unknown, &Method::GET, Some(&admin), Ownership::Unresolved),
            AuthDecision::NotFound
        );
    }

    #[test]
    fn wrong_method_is_rejected_before_role_rules() {
        let customer = user(Role::Customer);
        assert_eq!(
            decide(
                &Route::Collection(Collection::Users),
                &Method::POST,
                Some(&customer),
                Ownership::Unresolved
            ),
            AuthDecision::MethodNotAllowed
        );
    }

    #[test]
    fn users_are_admin_only() {
        let customer = user(Role::Customer);
        let admin = user(Role::Admin);
        let other = UserId::new();

        let list = Route::Collection(Collection::Users);
        assert_eq!(
            decide(&list, &Method::GET, Some(&customer), Ownership::Unresolved),
            AuthDecision::Forbidden
        );
        assert_eq!(
            decide(&list, &Method::GET, Some(&admin), Ownership::Unresolved),
            AuthDecision::Allow
        );

        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let route = resource(Collection::Users, &other);
            assert_eq!(
                decide(&route, &method, Some(&customer), Ownership::Unresolved),
                AuthDecision::Forbidden
            );
            assert_eq!(
                decide(&route, &method, Some(&admin), Ownership::Unresolved),
                AuthDecision::Allow
            );
        }
    }

    #[test]
    fn admin_cannot_modify_self() {
        let admin = user(Role::Admin);
        let own = resource(Collection::Users, &admin.id);

        assert_eq!(
            decide(&own, &Method::GET, Some(&admin), Ownership::Unresolved),
            AuthDecision::Allow
        );
        for method in [Method::PUT, Method::DELETE] {
            assert_eq!(
                decide(&own, &method, Some(&admin), Ownership::Unresolved),
                AuthDecision::Forbidden
            );
        }
    }

    #[test]
    fn product_writes_need_admin() {
        let customer = user(Role::Customer);
        let admin = user(Role::Admin);
        let route = Route::Resource(Collection::Products, "abcdef123456".to_string());

        assert_eq!(
            decide(&route, &Method::GET, Some(&customer), Ownership::Unresolved),
            AuthDecision::Allow
        );
        for method in [Method::PUT, Method::DELETE] {
            assert_eq!(
                decide(&route, &method, Some(&customer), Ownership::Unresolved),
                AuthDecision::Forbidden
            );
            assert_eq!(
                decide(&route, &method, Some(&admin), Ownership::Unresolved),
                AuthDecision::Allow
            );
        }

        let collection = Route::Collection(Collection::Products);
        assert_eq!(
            decide(&collection, &Method::POST, Some(&customer), Ownership::Unresolved),
            AuthDecision::Allow
        );
    }

    #[test]
    fn only_customers_place_orders() {
        let orders = Route::Collection(Collection::Orders);
        assert_eq!(
            decide(&orders, &Method::POST, Some(&user(Role::Admin)), Ownership::Unresolved),
            AuthDecision::Forbidden
        );
        assert_eq!(
            decide(&orders, &Method::POST, Some(&user(Role::Customer)), Ownership::Unresolved),
            AuthDecision::Allow
        );
        assert_eq!(
            decide(&orders, &Method::GET, Some(&user(Role::Admin)), Ownership::Unresolved),
            AuthDecision::Allow
        );
    }

    #[test]
    fn foreign_orders_are_hidden_from_customers() {
        let customer = user(Role::Customer);
        let admin = user(Role::Admin);
        let stranger = UserId::new();
        let route = Route::Resource(Collection::Orders, "abcdef123456".to_string());

        assert_eq!(
            decide(&route, &Method::GET, Some(&customer), Ownership::Unresolved),
            AuthDecision::Allow
        );
        assert_eq!(
            decide(&route, &Method::GET, Some(&customer), Ownership::OwnedBy(&stranger)),
            AuthDecision::NotFound
        );
        assert_eq!(
            decide(&route, &Method::GET, Some(&customer), Ownership::OwnedBy(&customer.id)),
            AuthDecision::Allow
        );
        assert_eq!(
            decide(&route, &Method::GET, Some(&admin), Ownership::OwnedBy(&stranger)),
            AuthDecision::Allow
        );
    }

    #[test]
    fn decisions_map_to_errors() {
        assert!(AuthDecision::Allow.into_result().is_ok());
        assert_eq!(
            AuthDecision::ChallengeAuthentication.into_result(),
            Err(ApiError::AuthenticationRequired)
        );
        assert_eq!(AuthDecision::Forbidden.into_result(), Err(ApiError::InsufficientRole));
    }
}
