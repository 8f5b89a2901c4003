//! Path matching: request path + method → logical [`Route`].
//!
//! Pure and total: every input maps to exactly one route, nothing is looked up.

use std::sync::LazyLock;

use axum::http::Method;
use regex::Regex;

/// Prefix of every API path.
pub const API_PREFIX: &str = "/api";

/// Id-shaped segment under a resource collection. The `/api` prefix is optional.
static RESOURCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:/api)?/(users|products|orders)/([0-9a-z]{8,24})$")
        .expect("resource pattern is valid")
});

/// API collections. `Register` only exists as a collection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Products,
    Orders,
    Register,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Products => "products",
            Collection::Orders => "orders",
            Collection::Register => "register",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "users" => Some(Collection::Users),
            "products" => Some(Collection::Products),
            "orders" => Some(Collection::Orders),
            "register" => Some(Collection::Register),
            _ => None,
        }
    }
}

/// Logical classification of a request, computed before any authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// File under the public directory (relative path, never empty).
    StaticAsset(String),
    /// `/api/{collection}`
    Collection(Collection),
    /// `/api/{collection}/{id}`
    Resource(Collection, String),
    Unknown,
}

static USERS: [Method; 1] = [Method::GET];
static USER: [Method; 3] = [Method::GET, Method::PUT, Method::DELETE];
static PRODUCTS: [Method; 2] = [Method::GET, Method::POST];
static PRODUCT: [Method; 3] = [Method::GET, Method::PUT, Method::DELETE];
static ORDERS: [Method; 2] = [Method::GET, Method::POST];
static ORDER: [Method; 1] = [Method::GET];
static REGISTER: [Method; 1] = [Method::POST];
static ASSET: [Method; 1] = [Method::GET];

impl Route {
    /// Methods a route accepts (excluding `OPTIONS`, answered by the dispatcher).
    pub fn allowed_methods(&self) -> &'static [Method] {
        match self {
            Route::Collection(Collection::Users) => &USERS,
            Route::Collection(Collection::Products) => &PRODUCTS,
            Route::Collection(Collection::Orders) => &ORDERS,
            Route::Collection(Collection::Register) => &REGISTER,
            Route::Resource(Collection::Users, _) => &USER,
            Route::Resource(Collection::Products, _) => &PRODUCT,
            Route::Resource(Collection::Orders, _) => &ORDER,
            Route::StaticAsset(_) => &ASSET,
            Route::Resource(Collection::Register, _) | Route::Unknown => &[],
        }
    }

    pub fn allows(&self, method: &Method) -> bool {
        self.allowed_methods().contains(method)
    }

    /// Everything except registration and static files needs credentials.
    /// Unknown routes do too, so anonymous callers cannot probe for paths.
    pub fn requires_authentication(&self) -> bool {
        !matches!(
            self,
            Route::Collection(Collection::Register) | Route::StaticAsset(_)
        )
    }

    pub fn collection(&self) -> Option<Collection> {
        match self {
            Route::Collection(c) | Route::Resource(c, _) => Some(*c),
            Route::StaticAsset(_) | Route::Unknown => None,
        }
    }
}

/// Classify a request.
///
/// Order: static assets (`GET` outside `/api`), then id-shaped resource
/// paths, then exact collection paths; anything else is [`Route::Unknown`].
pub fn match_route(method: &Method, path: &str) -> Route {
    if method == Method::GET && !path.starts_with(API_PREFIX) {
        let asset = path.trim_start_matches('/');
        let asset = if asset.is_empty() { "index.html" } else { asset };
        return Route::StaticAsset(asset.to_string());
    }

    if let Some(caps) = RESOURCE_PATTERN.captures(path) {
        if let Some(collection) = Collection::from_name(&caps[1]) {
            return Route::Resource(collection, caps[2].to_string());
        }
    }

    path.strip_prefix(API_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))
        .and_then(Collection::from_name)
        .map(Route::Collection)
        .unwrap_or(Route::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn get_outside_api_is_static() {
        assert_eq!(
            match_route(&Method::GET, "/"),
            Route::StaticAsset("index.html".to_string())
        );
        assert_eq!(
            match_route(&Method::GET, "/js/cart.js"),
            Route::StaticAsset("js/cart.js".to_string())
        );
    }

    #[test]
    fn non_get_outside_api_is_not_static() {
        assert_eq!(match_route(&Method::POST, "/index.html"), Route::Unknown);
    }

    #[test]
    fn exact_collections() {
        for (path, collection) in [
            ("/api/users", Collection::Users),
            ("/api/products", Collection::Products),
            ("/api/orders", Collection::Orders),
            ("/api/register", Collection::Register),
        ] {
            assert_eq!(match_route(&Method::GET, path), Route::Collection(collection));
        }
    }

    #[test]
    fn id_paths_are_resources() {
        assert_eq!(
            match_route(&Method::DELETE, "/api/users/5faaa9d6c16b3e3a40e6c9b1"),
            Route::Resource(Collection::Users, "5faaa9d6c16b3e3a40e6c9b1".to_string())
        );
        // Prefix is optional for non-GET requests.
        assert_eq!(
            match_route(&Method::PUT, "/products/abcdefgh"),
            Route::Resource(Collection::Products, "abcdefgh".to_string())
        );
    }

    #[test]
    fn malformed_ids_and_extra_segments_are_unknown() {
        for path in [
            "/api/users/short",
            "/api/users/UPPERCASE123",
            "/api/users/abcdefgh/extra",
            "/api/users/",
            "/api/register/abcdefgh",
            "/api/carts",
            "/apiusers",
        ] {
            assert_eq!(match_route(&Method::GET, path), Route::Unknown, "{path}");
        }
    }

    #[test]
    fn allowed_methods_per_route() {
        let users = Route::Collection(Collection::Users);
        assert!(users.allows(&Method::GET));
        assert!(!users.allows(&Method::POST));

        let order = Route::Resource(Collection::Orders, "abcdefgh".to_string());
        assert!(order.allows(&Method::GET));
        assert!(!order.allows(&Method::DELETE));

        assert!(Route::Unknown.allowed_methods().is_empty());
    }

    #[test]
    fn only_register_is_public() {
        assert!(!Route::Collection(Collection::Register).requires_authentication());
        assert!(Route::Collection(Collection::Products).requires_authentication());
        assert!(Route::Unknown.requires_authentication());
    }

    proptest! {
        #[test]
        fn id_shaped_paths_always_resolve_to_resources(
            collection in prop_oneof!["users", "products", "orders"],
            id in "[0-9a-z]{8,24}",
        ) {
            let path = format!("/api/{collection}/{id}");
            let route = match_route(&Method::GET, &path);
            prop_assert!(matches!(route, Route::Resource(_, ref got) if *got == id));
        }

        #[test]
        fn matching_is_total(path in "/[ -~]{0,40}") {
            let _ = match_route(&Method::POST, &path);
        }
    }
}
