//! Role-based route policy. This is a UX convenience mirrored by the client,
//! not the authorization boundary; server-side enforcement lives in the
//! per-operation checks.

use crate::model::role::Role;

pub const ADMIN_HOME: &str = "/admin";
pub const FACULTY_HOME: &str = "/faculty";

#[derive(Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested page.
    Permit,
    /// No signed-in identity; go to the login page.
    RedirectLogin,
    /// Signed in but not allowed here; go to the role's landing page.
    Redirect(&'static str),
}

pub fn landing_page(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_HOME,
        Role::Faculty => FACULTY_HOME,
    }
}

/// Decide whether `identity` may view a page restricted to `allowed_roles`.
pub fn resolve_route(identity: Option<Role>, allowed_roles: &[Role]) -> RouteDecision {
    match identity {
        None => RouteDecision::RedirectLogin,
        Some(role) if allowed_roles.contains(&role) => RouteDecision::Permit,
        Some(role) => RouteDecision::Redirect(landing_page(role)),
    }
}
