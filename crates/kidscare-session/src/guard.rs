//! The route guard: render, or redirect to login, or redirect home.

use tracing::debug;

use kidscare_core::types::RoleSet;

use crate::paths::{LOGIN_PATH, home_path};
use crate::store::SessionState;

/// What to do with a guarded navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the guarded screen unchanged.
    Render,
    /// Send the user elsewhere.
    Redirect {
        /// Target path.
        to: &'static str,
        /// Replace the current history entry instead of pushing.
        replace: bool,
    },
}

/// Stateless authorization check evaluated on every navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Decide from the session and the subtree's required roles.
    ///
    /// 1. Nobody logged in: replace with `/login`.
    /// 2. Requirement non-empty and role not in it: replace with the role's home.
    /// 3. Otherwise render.
    pub fn check(session: &SessionState, required: RoleSet) -> GuardDecision {
        let decision = match session.role() {
            None => GuardDecision::Redirect {
                to: LOGIN_PATH,
                replace: true,
            },
            Some(role) if !required.is_empty() && !required.contains(role) => {
                GuardDecision::Redirect {
                    to: home_path(Some(role)),
                    replace: true,
                }
            }
            Some(_) => GuardDecision::Render,
        };
        debug!(required = %required, ?decision, "Route guard evaluated");
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AuthSession;
    use kidscare_core::types::{Role, UserRecord};

    fn session(role: Role) -> SessionState {
        SessionState::Authenticated(AuthSession {
            user: UserRecord {
                id: 1,
                name: "U".to_string(),
                email: "u@kids.test".to_string(),
                role,
            },
            token: "tok".to_string(),
        })
    }

    #[test]
    fn test_anonymous_always_goes_to_login() {
        for required in [
            RoleSet::ANY,
            RoleSet::only(Role::Admin),
            RoleSet::only(Role::Staff),
        ] {
            assert_eq!(
                RouteGuard::check(&SessionState::Anonymous, required),
                GuardDecision::Redirect {
                    to: "/login",
                    replace: true
                }
            );
        }
    }

    #[test]
    fn test_wrong_role_goes_home() {
        assert_eq!(
            RouteGuard::check(&session(Role::Admin), RoleSet::only(Role::Staff)),
            GuardDecision::Redirect {
                to: "/admin",
                replace: true
            }
        );
        assert_eq!(
            RouteGuard::check(&session(Role::Staff), RoleSet::only(Role::Admin)),
            GuardDecision::Redirect {
                to: "/staff",
                replace: true
            }
        );
        assert_eq!(
            RouteGuard::check(&session(Role::Parent), RoleSet::only(Role::Admin)),
            GuardDecision::Redirect {
                to: "/staff",
                replace: true
            }
        );
    }

    #[test]
    fn test_member_or_open_requirement_renders() {
        assert_eq!(
            RouteGuard::check(&session(Role::Staff), RoleSet::only(Role::Staff)),
            GuardDecision::Render
        );
        assert_eq!(
            RouteGuard::check(&session(Role::Parent), RoleSet::ANY),
            GuardDecision::Render
        );
        assert_eq!(
            RouteGuard::check(
                &session(Role::Admin),
                RoleSet::of(&[Role::Admin, Role::Staff])
            ),
            GuardDecision::Render
        );
    }
}
