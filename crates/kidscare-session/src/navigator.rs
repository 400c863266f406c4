//! Navigation history and redirect handling.
//!
//! The navigator is the console's router: each `navigate` pushes an entry,
//! matches it against the route table, consults the guard with the
//! session as it is *now*, and follows replacing redirects until a screen
//! renders.

use std::sync::Arc;

use tracing::{debug, warn};

use kidscare_core::types::Role;

use crate::guard::{GuardDecision, RouteGuard};
use crate::paths::{LOGIN_PATH, home_path};
use crate::routes::pattern::{join, normalize};
use crate::routes::{RouteMatch, RouteTable, Screen};
use crate::store::SessionStore;

/// Upper bound on redirects followed for one navigation.
const MAX_REDIRECTS: usize = 8;

/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A screen renders at `path`.
    Render {
        /// The path finally rendered.
        path: String,
        /// The screen bound to it.
        screen: Screen,
        /// Guarded subtree name, `None` for public screens.
        subtree: Option<&'static str>,
        /// Captured `:param` values.
        params: Vec<(String, String)>,
        /// Paths replaced by redirects on the way, oldest first.
        redirected_from: Vec<String>,
    },
    /// Nothing is bound to the path.
    NotFound {
        /// The unmatched path.
        path: String,
        /// Where the "return to dashboard" action leads.
        dashboard: &'static str,
    },
    /// Redirects went in a circle: the role has no screen it may open.
    Forbidden {
        /// The path originally requested.
        path: String,
        /// The role that was turned away.
        role: Option<Role>,
    },
}

impl Resolution {
    /// The path this resolution is about.
    pub fn path(&self) -> &str {
        match self {
            Self::Render { path, .. } | Self::NotFound { path, .. } | Self::Forbidden { path, .. } => {
                path
            }
        }
    }

    /// A captured route parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        match self {
            Self::Render { params, .. } => params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Whether at least one redirect happened.
    pub fn was_redirected(&self) -> bool {
        matches!(self, Self::Render { redirected_from, .. } if !redirected_from.is_empty())
    }
}

/// History stack plus route resolution.
#[derive(Debug)]
pub struct Navigator {
    /// Injected session store.
    store: Arc<SessionStore>,
    /// Static route table.
    table: Arc<RouteTable>,
    /// Entries, oldest first. Redirects replace the last entry.
    history: Vec<String>,
}

impl Navigator {
    /// Create a navigator with empty history.
    pub fn new(store: Arc<SessionStore>, table: Arc<RouteTable>) -> Self {
        Self {
            store,
            table,
            history: Vec::new(),
        }
    }

    /// The route table in use.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The session store in use.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// History entries, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The current entry.
    pub fn current_path(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// Push `path` and resolve it.
    pub fn navigate(&mut self, path: &str) -> Resolution {
        let canonical = join(&normalize(path));
        debug!(path = %canonical, "Navigate");
        self.history.push(canonical);
        self.settle()
    }

    /// Pop the current entry and resolve the previous one again.
    ///
    /// Returns `None` when there is nothing to go back to.
    pub fn back(&mut self) -> Option<Resolution> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        Some(self.settle())
    }

    /// Resolve the current entry again, e.g. after login or logout.
    pub fn reload(&mut self) -> Option<Resolution> {
        if self.history.is_empty() {
            return None;
        }
        Some(self.settle())
    }

    /// Resolve the last history entry, following redirects.
    fn settle(&mut self) -> Resolution {
        let session = self.store.current();
        let requested = self
            .history
            .last()
            .cloned()
            .unwrap_or_else(|| LOGIN_PATH.to_string());
        let mut visited: Vec<String> = Vec::new();

        loop {
            let path = self
                .history
                .last()
                .cloned()
                .unwrap_or_else(|| LOGIN_PATH.to_string());
            visited.push(path.clone());

            let (next, replace) = match self.table.resolve(&path) {
                RouteMatch::Public { screen } => {
                    return self.rendered(path, screen, None, Vec::new(), visited);
                }
                RouteMatch::NotFound => {
                    return Resolution::NotFound {
                        path,
                        dashboard: home_path(session.role()),
                    };
                }
                RouteMatch::Redirect { to } => (to, true),
                RouteMatch::Guarded {
                    subtree,
                    allowed,
                    screen,
                    params,
                    ..
                } => match RouteGuard::check(&session, allowed) {
                    GuardDecision::Render => {
                        return self.rendered(path, screen, Some(subtree), params, visited);
                    }
                    GuardDecision::Redirect { to, replace } => (to, replace),
                },
            };

            if visited.iter().any(|v| v == next) || visited.len() > MAX_REDIRECTS {
                warn!(
                    path = %requested,
                    role = ?session.role(),
                    "Redirect loop, no screen available for this role"
                );
                return Resolution::Forbidden {
                    path: requested,
                    role: session.role(),
                };
            }

            debug!(from = %path, to = next, replace, "Redirect");
            match (replace, self.history.last_mut()) {
                (true, Some(last)) => *last = next.to_string(),
                _ => self.history.push(next.to_string()),
            }
        }
    }

    fn rendered(
        &self,
        path: String,
        screen: Screen,
        subtree: Option<&'static str>,
        params: Vec<(String, String)>,
        mut visited: Vec<String>,
    ) -> Resolution {
        visited.pop();
        Resolution::Render {
            path,
            screen,
            subtree,
            params,
            redirected_from: visited,
        }
    }
}
