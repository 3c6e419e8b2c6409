//! Terminal stand-in for browser navigation.

use std::sync::{Mutex, PoisonError};

use schoolhub_core::{Navigator, Route};
use tracing::debug;

/// Prints a sign-in hint when the session is lost and remembers the last
/// route requested.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn last_route(&self) -> Option<Route> {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        debug!(route = %route, "Navigating");
        if route == Route::Login {
            eprintln!("Your session has expired. Run `schoolhub login` to sign in again.");
        }
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}
