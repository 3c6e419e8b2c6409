//! Application routes and the navigation hook used on session loss.

use std::fmt;

use serde::Serialize;

use crate::auth::SessionSnapshot;
use crate::models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum Route {
    /// Login entry point
    Login,
    Dashboard(Role),
    /// Shown when an authenticated user opens another role's area
    Unauthorized,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard(role) => format!("/{}/dashboard", role.slug()),
            Route::Unauthorized => "/unauthorized".to_string(),
        }
    }

    /// Where a user lands after opening the app
    pub fn home_for(session: &SessionSnapshot) -> Route {
        match (session.is_authenticated(), session.role()) {
            (true, Some(role)) => Route::Dashboard(role),
            _ => Route::Login,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of checking a session against a protected area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(Route),
}

/// Gate for role-restricted areas. An empty `allowed` list admits any
/// authenticated user.
pub fn guard(session: &SessionSnapshot, allowed: &[Role]) -> RouteDecision {
    if !session.is_authenticated() {
        return RouteDecision::Redirect(Route::Login);
    }
    if allowed.is_empty() {
        return RouteDecision::Allow;
    }
    match session.role() {
        Some(role) if allowed.contains(&role) => RouteDecision::Allow,
        _ => RouteDecision::Redirect(Route::Unauthorized),
    }
}

/// Receives navigation requests raised outside the view layer, such as
/// the forced return to login after a 401.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that ignores every request
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _route: Route) {}
}
