//! Access Control
//!
//! Maps the authenticated principal's granted permissions to navigation:
//! which destinations are visible, whether a given action is authorized, and
//! where a freshly authenticated or redirected user lands. The route table is
//! fixed at build time and its declaration order is authoritative.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Role name that bypasses every permission check.
pub const SUPER_ROLE: &str = "ADMIN";

/// Path of the login screen; also the fallback landing destination.
pub const LOGIN_PATH: &str = "/login";

/// Path of the one-time setup screen.
pub const SETUP_PATH: &str = "/setup";

/// One entry of the fixed navigation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRoute {
    /// Destination path.
    pub path: &'static str,

    /// Permission slug required to enter.
    pub required_permission: &'static str,

    /// Human label for navigation chrome.
    pub label: &'static str,
}

/// The navigation table. Order decides where a user lands first.
pub const ROUTES: [NavigationRoute; 5] = [
    NavigationRoute {
        path: "/pos",
        required_permission: "sales:create",
        label: "POS",
    },
    NavigationRoute {
        path: "/dashboard",
        required_permission: "reports:read",
        label: "Dashboard",
    },
    NavigationRoute {
        path: "/products",
        required_permission: "products:manage",
        label: "Products",
    },
    NavigationRoute {
        path: "/users",
        required_permission: "users:read",
        label: "Users",
    },
    NavigationRoute {
        path: "/roles",
        required_permission: "users:create",
        label: "Roles",
    },
];

/// The authenticated principal: identity plus granted permissions.
///
/// Replaced wholesale on login and dropped on logout; permission slugs are
/// flat strings, with the role name carried alongside for the super-role
/// bypass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Backend user id.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Login email.
    pub email: String,

    /// Role name. `"ADMIN"` bypasses all permission checks.
    pub role: String,

    /// Granted permission slugs.
    pub permissions: FxHashSet<String>,
}

impl Principal {
    /// Whether this principal may perform the action behind `slug`.
    ///
    /// The super-role bypass is absolute and checked before the permission
    /// set, so an `ADMIN` with an empty set is still authorized everywhere.
    #[must_use]
    pub fn is_authorized(&self, slug: &str) -> bool {
        self.role == SUPER_ROLE || self.permissions.contains(slug)
    }
}

/// Outcome of a route guard decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No principal at all; redirect to the login screen.
    Unauthenticated,

    /// Principal present but not authorized; redirect to their first
    /// available destination.
    Forbidden {
        /// Where to send the user instead.
        redirect: &'static str,
    },

    /// Render the destination.
    Allowed,
}

/// First table entry, in declaration order, that `principal` may enter.
///
/// Falls back to the login path when nothing matches; that is the canonical
/// "where do I land after login" answer for a principal with no usable
/// grants.
#[must_use]
pub fn first_available_route(principal: &Principal) -> &'static str {
    ROUTES
        .iter()
        .find(|route| principal.is_authorized(route.required_permission))
        .map_or(LOGIN_PATH, |route| route.path)
}

/// Table entries visible to `principal`, in declaration order.
#[must_use]
pub fn visible_routes(principal: &Principal) -> SmallVec<[NavigationRoute; 5]> {
    ROUTES
        .iter()
        .filter(|route| principal.is_authorized(route.required_permission))
        .copied()
        .collect()
}

/// Decide whether a destination may be rendered.
///
/// `required` is the destination's permission slug, or `None` for
/// destinations that only need an authenticated session.
#[must_use]
pub fn guard(principal: Option<&Principal>, required: Option<&str>) -> Outcome {
    let Some(principal) = principal else {
        return Outcome::Unauthenticated;
    };

    match required {
        Some(slug) if !principal.is_authorized(slug) => Outcome::Forbidden {
            redirect: first_available_route(principal),
        },
        _ => Outcome::Allowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: &str, slugs: &[&str]) -> Principal {
        Principal {
            id: 1,
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            role: role.to_string(),
            permissions: slugs.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn admin_bypasses_every_check() {
        let admin = principal(SUPER_ROLE, &[]);

        for route in ROUTES {
            assert!(
                admin.is_authorized(route.required_permission),
                "ADMIN must satisfy {}",
                route.required_permission
            );
        }
        assert!(admin.is_authorized("anything:at-all"));
    }

    #[test]
    fn non_admin_needs_the_exact_slug() {
        let cashier = principal("CASHIER", &["sales:create"]);

        assert!(cashier.is_authorized("sales:create"));
        assert!(!cashier.is_authorized("users:read"));
    }

    #[test]
    fn first_available_route_follows_table_order() {
        // sales:create is declared before users:read, so POS wins.
        let p = principal("CASHIER", &["users:read", "sales:create"]);

        assert_eq!(first_available_route(&p), "/pos");
    }

    #[test]
    fn first_available_route_skips_unauthorized_entries() {
        let p = principal("CLERK", &["users:read"]);

        assert_eq!(first_available_route(&p), "/users");
    }

    #[test]
    fn first_available_route_falls_back_to_login() {
        let p = principal("NOBODY", &[]);

        assert_eq!(first_available_route(&p), LOGIN_PATH);
    }

    #[test]
    fn visible_routes_filter_by_authorization() {
        let p = principal("CASHIER", &["sales:create", "reports:read"]);

        let paths: Vec<_> = visible_routes(&p).iter().map(|route| route.path).collect();

        assert_eq!(paths, ["/pos", "/dashboard"]);
    }

    #[test]
    fn visible_routes_shows_everything_to_admin() {
        let admin = principal(SUPER_ROLE, &[]);

        assert_eq!(visible_routes(&admin).len(), ROUTES.len());
    }

    #[test]
    fn guard_without_principal_is_unauthenticated() {
        assert_eq!(guard(None, Some("sales:create")), Outcome::Unauthenticated);
        assert_eq!(guard(None, None), Outcome::Unauthenticated);
    }

    #[test]
    fn guard_without_required_permission_allows_any_principal() {
        let p = principal("NOBODY", &[]);

        assert_eq!(guard(Some(&p), None), Outcome::Allowed);
    }

    #[test]
    fn guard_redirects_to_first_available_route_when_forbidden() {
        let p = principal("CASHIER", &["sales:create"]);

        assert_eq!(
            guard(Some(&p), Some("users:read")),
            Outcome::Forbidden { redirect: "/pos" }
        );
    }

    #[test]
    fn guard_allows_a_matching_permission() {
        let p = principal("CASHIER", &["sales:create"]);

        assert_eq!(guard(Some(&p), Some("sales:create")), Outcome::Allowed);
    }
}
