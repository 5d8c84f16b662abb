//! Navigation guard decisions.
//!
//! # Design
//! - Only login and auth-only routes trigger `load_auth`; other routes pass untouched.
//! - Redirects are data; the router shell applies them.

use crate::core::session::Session;

/// Login route path.
pub const LOGIN_PATH: &str = "/login";
/// Admin landing route path.
pub const ADMIN_PATH: &str = "/admin";
/// Query parameter carrying the originally requested path.
pub const REDIRECT_QUERY_KEY: &str = "redirect";

/// Route a navigation is heading to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTarget {
    /// Path including the query string.
    pub full_path: String,
    /// Whether the route is restricted to signed-in admins.
    pub requires_auth: bool,
}

impl RouteTarget {
    /// Describe a navigation target.
    #[must_use]
    pub fn new(full_path: impl Into<String>, requires_auth: bool) -> Self {
        Self {
            full_path: full_path.into(),
            requires_auth,
        }
    }

    /// Whether the target is the login page.
    #[must_use]
    pub fn is_login(&self) -> bool {
        self.full_path.starts_with(LOGIN_PATH)
    }

    /// Whether the guard has to consult authentication state.
    #[must_use]
    pub fn needs_auth_check(&self) -> bool {
        self.requires_auth || self.is_login()
    }
}

/// Where the guard sends the user instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// Signed-in user opened the login page.
    Admin,
    /// Anonymous user opened an auth-only page.
    Login {
        /// Full path the user asked for.
        from: String,
    },
}

impl Redirect {
    /// Href of the redirect target, query included.
    #[must_use]
    pub fn href(&self) -> String {
        match self {
            Self::Admin => ADMIN_PATH.to_string(),
            Self::Login { from } => format!(
                "{LOGIN_PATH}?{REDIRECT_QUERY_KEY}={}",
                urlencoding::encode(from)
            ),
        }
    }
}

/// Outcome of guarding one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Continue to the requested route.
    Proceed,
    /// Navigate elsewhere.
    Redirect(Redirect),
}

/// Pure decision table for a target and the current authorization.
#[must_use]
pub fn decide(target: &RouteTarget, authorized: bool) -> GuardDecision {
    if target.is_login() && authorized {
        return GuardDecision::Redirect(Redirect::Admin);
    }
    if target.requires_auth && !authorized {
        return GuardDecision::Redirect(Redirect::Login {
            from: target.full_path.clone(),
        });
    }
    GuardDecision::Proceed
}

/// Guard a navigation, restoring authentication first when the target needs it.
pub async fn check_navigation(session: &Session, target: &RouteTarget) -> GuardDecision {
    if !target.needs_auth_check() {
        return GuardDecision::Proceed;
    }
    let authorized = session.load_auth().await.is_authorized();
    decide(target, authorized)
}

/// Path to open after a successful login.
///
/// Uses the `redirect` value when it is a local path other than the login page,
/// otherwise the admin landing page.
#[must_use]
pub fn post_login_path(redirect: Option<&str>) -> String {
    redirect
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .filter(|path| !path.starts_with(LOGIN_PATH))
        .map_or_else(|| ADMIN_PATH.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_user_is_sent_to_login_with_origin() {
        let target = RouteTarget::new("/admin/elements?page=2", true);
        let decision = decide(&target, false);
        assert_eq!(
            decision,
            GuardDecision::Redirect(Redirect::Login {
                from: "/admin/elements?page=2".into()
            })
        );
        let GuardDecision::Redirect(redirect) = decision else {
            panic!("expected redirect");
        };
        assert_eq!(redirect.href(), "/login?redirect=%2Fadmin%2Felements%3Fpage%3D2");
    }

    #[test]
    fn signed_in_user_skips_login() {
        let target = RouteTarget::new("/login?redirect=%2Fadmin", false);
        assert_eq!(
            decide(&target, true),
            GuardDecision::Redirect(Redirect::Admin)
        );
        assert_eq!(Redirect::Admin.href(), ADMIN_PATH);
    }

    #[test]
    fn remaining_rows_proceed() {
        assert_eq!(
            decide(&RouteTarget::new("/login", false), false),
            GuardDecision::Proceed
        );
        assert_eq!(
            decide(&RouteTarget::new("/admin", true), true),
            GuardDecision::Proceed
        );
        assert_eq!(
            decide(&RouteTarget::new("/", false), false),
            GuardDecision::Proceed
        );
        assert!(!RouteTarget::new("/", false).needs_auth_check());
    }

    #[test]
    fn post_login_path_rejects_foreign_targets() {
        assert_eq!(post_login_path(Some("/admin/exercises")), "/admin/exercises");
        assert_eq!(post_login_path(Some("https://evil.test")), ADMIN_PATH);
        assert_eq!(post_login_path(Some("//evil.test")), ADMIN_PATH);
        assert_eq!(post_login_path(Some("/login")), ADMIN_PATH);
        assert_eq!(post_login_path(None), ADMIN_PATH);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod navigation {
        use super::super::*;
        use crate::core::testing::{Harness, valid_auth};

        #[tokio::test]
        async fn public_routes_skip_auth_restore() {
            let harness = Harness::new();
            harness.credentials.seed(valid_auth());
            let decision = check_navigation(&harness.session, &RouteTarget::new("/", false)).await;
            assert_eq!(decision, GuardDecision::Proceed);
            assert_eq!(harness.backend.calls("check-auth"), 0);
        }

        #[tokio::test]
        async fn protected_route_restores_persisted_login() {
            let harness = Harness::new();
            harness.credentials.seed(valid_auth());
            let target = RouteTarget::new("/admin", true);
            assert_eq!(
                check_navigation(&harness.session, &target).await,
                GuardDecision::Proceed
            );
            assert!(harness.session.is_authorized());
        }

        #[tokio::test]
        async fn protected_route_without_credentials_redirects() {
            let harness = Harness::new();
            let target = RouteTarget::new("/admin/categories", true);
            assert_eq!(
                check_navigation(&harness.session, &target).await,
                GuardDecision::Redirect(Redirect::Login {
                    from: "/admin/categories".into()
                })
            );
        }

        #[tokio::test]
        async fn login_route_redirects_restored_admin() {
            let harness = Harness::new();
            harness.credentials.seed(valid_auth());
            let target = RouteTarget::new("/login", false);
            assert_eq!(
                check_navigation(&harness.session, &target).await,
                GuardDecision::Redirect(Redirect::Admin)
            );
        }
    }
}
