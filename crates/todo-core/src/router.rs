//! Route table and session gate
//!
//! `/` and unknown paths land on the login screen; `/profile` is gated on a
//! stored token. No server round-trip is made here.

use tracing::debug;

use crate::session::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Signup,
    Login,
    Profile,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Signup => "/signup",
            Route::Login => "/login",
            Route::Profile => "/profile",
        }
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Route::Profile)
    }

    /// Resolves a requested path to the screen that should render.
    pub fn resolve(path: &str, tokens: &dyn TokenStore) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        let route = match path {
            "/signup" => Route::Signup,
            "/profile" => Route::Profile,
            "/" | "/login" => Route::Login,
            other => {
                debug!("Unknown path {}, redirecting to /login", other);
                Route::Login
            }
        };

        if route.is_protected() && tokens.get_token().is_none() {
            debug!("No session token, redirecting {} to /login", path);
            return Route::Login;
        }
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryTokenStore, MockTokenStore};

    #[test]
    fn test_profile_requires_token() {
        let store = MemoryTokenStore::new();
        assert_eq!(Route::resolve("/profile", &store), Route::Login);

        store.set_token("abc123").unwrap();
        assert_eq!(Route::resolve("/profile", &store), Route::Profile);

        store.clear_token().unwrap();
        assert_eq!(Route::resolve("/profile", &store), Route::Login);
    }

    #[test]
    fn test_gate_reads_storage_on_every_navigation() {
        let mut store = MockTokenStore::new();
        store
            .expect_get_token()
            .times(2)
            .returning(|| Some("forged-but-present".to_string()));

        assert_eq!(Route::resolve("/profile", &store), Route::Profile);
        assert_eq!(Route::resolve("/profile/", &store), Route::Profile);
    }

    #[test]
    fn test_public_routes_skip_storage() {
        let mut store = MockTokenStore::new();
        store.expect_get_token().never();

        assert_eq!(Route::resolve("/", &store), Route::Login);
        assert_eq!(Route::resolve("", &store), Route::Login);
        assert_eq!(Route::resolve("/signup", &store), Route::Signup);
        assert_eq!(Route::resolve("/login?next=profile", &store), Route::Login);
        assert_eq!(Route::resolve("/does-not-exist", &store), Route::Login);
        assert_eq!(Route::resolve("/signup/extra", &store), Route::Login);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Route::Profile.path(), "/profile");
        assert!(Route::Profile.is_protected());
        assert!(!Route::Signup.is_protected());
    }
}
