//! Role-dependent paths, computed in one place.
//!
//! Shared screens are mounted under both `/admin` and `/staff`; every link a
//! screen produces goes through a [`PathResolver`] built from the session's
//! role instead of re-deriving the prefix at each call site.

use kidscare_core::types::Role;

use crate::routes::Section;

/// The public login screen.
pub const LOGIN_PATH: &str = "/login";

/// Admin subtree base.
pub const ADMIN_BASE: &str = "/admin";

/// Staff subtree base; also where every non-admin role is sent.
pub const STAFF_BASE: &str = "/staff";

/// The home screen for a role: `/admin` for admins, `/staff` for anyone else.
pub fn home_path(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => ADMIN_BASE,
        _ => STAFF_BASE,
    }
}

/// Builds links under the base path that belongs to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathResolver {
    base: &'static str,
}

impl PathResolver {
    /// Resolver for a role (or for nobody, which resolves like staff).
    pub fn for_role(role: Option<Role>) -> Self {
        Self {
            base: home_path(role),
        }
    }

    /// The base path, `/admin` or `/staff`.
    pub fn base(&self) -> &'static str {
        self.base
    }

    /// The dashboard, i.e. the base itself.
    pub fn dashboard(&self) -> String {
        self.base.to_string()
    }

    /// A section's list screen, e.g. `/staff/attendance`.
    pub fn section(&self, section: Section) -> String {
        format!("{}/{}", self.base, section.segment())
    }

    /// A section's create screen.
    pub fn new_item(&self, section: Section) -> String {
        format!("{}/new", self.section(section))
    }

    /// A section's edit screen for a record.
    pub fn edit_item(&self, section: Section, id: i64) -> String {
        format!("{}/edit/{id}", self.section(section))
    }

    /// A section's details screen for a record.
    pub fn details(&self, section: Section, id: i64) -> String {
        format!("{}/{id}", self.section(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_paths() {
        assert_eq!(home_path(Some(Role::Admin)), "/admin");
        assert_eq!(home_path(Some(Role::Staff)), "/staff");
        assert_eq!(home_path(Some(Role::Parent)), "/staff");
        assert_eq!(home_path(None), "/staff");
    }

    #[test]
    fn test_section_links_follow_role() {
        let staff = PathResolver::for_role(Some(Role::Staff));
        assert_eq!(staff.section(Section::Attendance), "/staff/attendance");
        assert_eq!(staff.new_item(Section::Billing), "/staff/billing/new");

        let admin = PathResolver::for_role(Some(Role::Admin));
        assert_eq!(admin.edit_item(Section::Children, 8), "/admin/children/edit/8");
        assert_eq!(admin.details(Section::Children, 8), "/admin/children/8");
        assert_eq!(admin.dashboard(), "/admin");
    }
}
