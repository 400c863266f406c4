//! Route table: path → (screen, required roles).

use kidscare_core::types::{Role, RoleSet};

use super::pattern::{PathPattern, normalize};
use super::screen::{Screen, Section};
use crate::paths::LOGIN_PATH;

/// A path pattern bound to a screen.
#[derive(Debug, Clone)]
pub struct Route {
    /// The pattern, e.g. `/staff/attendance/edit/:id`.
    pub pattern: PathPattern,
    /// The screen rendered on match.
    pub screen: Screen,
}

/// One sidebar entry of a subtree's layout shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Sidebar label.
    pub label: &'static str,
    /// Target path.
    pub path: String,
}

/// A guarded group of routes sharing a prefix, a layout and a requirement.
#[derive(Debug, Clone)]
pub struct Subtree {
    /// Subtree name, e.g. `admin`.
    pub name: &'static str,
    /// Path prefix, e.g. `/admin`.
    pub prefix: &'static str,
    /// Roles allowed in; empty means any authenticated role.
    pub allowed: RoleSet,
    /// Sections shown in the layout sidebar, in order.
    pub sections: Vec<Section>,
    /// Bound routes.
    pub routes: Vec<Route>,
}

impl Subtree {
    fn new(name: &'static str, prefix: &'static str, allowed: RoleSet) -> Self {
        Self {
            name,
            prefix,
            allowed,
            sections: Vec::new(),
            routes: Vec::new(),
        }
    }

    fn route(mut self, pattern: &'static str, screen: Screen) -> Self {
        self.routes.push(Route {
            pattern: PathPattern::parse(pattern),
            screen,
        });
        self
    }

    /// Bind `list`, `new`, `edit/:id` (and optionally `:id`) for a section.
    fn crud(mut self, section: Section, patterns: CrudPatterns, with_details: bool) -> Self {
        self.sections.push(section);
        self = self
            .route(patterns.list, Screen::List(section))
            .route(patterns.new, Screen::Create(section))
            .route(patterns.edit, Screen::Edit(section));
        if with_details {
            self = self.route(patterns.details, Screen::Details(section));
        }
        self
    }

    fn settings(mut self, pattern: &'static str, screen: Screen) -> Self {
        self.sections.push(Section::Settings);
        self.route(pattern, screen)
    }

    /// The layout shell's sidebar: dashboard first, then each section.
    pub fn navigation(&self) -> Vec<NavItem> {
        let mut items = vec![NavItem {
            label: "Dashboard",
            path: self.prefix.to_string(),
        }];
        items.extend(self.sections.iter().map(|s| NavItem {
            label: s.label(),
            path: format!("{}/{}", self.prefix, s.segment()),
        }));
        items
    }
}

/// Static pattern strings for one section's CRUD screens.
struct CrudPatterns {
    list: &'static str,
    new: &'static str,
    edit: &'static str,
    details: &'static str,
}

macro_rules! crud_patterns {
    ($base:literal) => {
        CrudPatterns {
            list: $base,
            new: concat!($base, "/new"),
            edit: concat!($base, "/edit/:id"),
            details: concat!($base, "/:id"),
        }
    };
}

/// Outcome of matching a path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    /// A public screen; no guard applies.
    Public {
        /// The screen to render.
        screen: Screen,
    },
    /// An unconditional replacing redirect.
    Redirect {
        /// Target path.
        to: &'static str,
    },
    /// A screen inside a guarded subtree.
    Guarded {
        /// Subtree name.
        subtree: &'static str,
        /// Roles the subtree requires.
        allowed: RoleSet,
        /// The matched pattern.
        pattern: &'static str,
        /// The screen to render.
        screen: Screen,
        /// Captured `:param` values.
        params: Vec<(String, String)>,
    },
    /// Nothing matched.
    NotFound,
}

/// The full route table. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct RouteTable {
    public: Vec<Route>,
    redirects: Vec<(PathPattern, &'static str)>,
    subtrees: Vec<Subtree>,
}

impl RouteTable {
    /// The console's route table: login, root redirect, admin and staff subtrees.
    pub fn standard() -> Self {
        let admin = Subtree::new("admin", "/admin", RoleSet::only(Role::Admin))
            .route("/admin", Screen::Dashboard)
            .crud(Section::Children, crud_patterns!("/admin/children"), true)
            .crud(Section::Staff, crud_patterns!("/admin/staff"), false)
            .crud(Section::Attendance, crud_patterns!("/admin/attendance"), false)
            .crud(Section::Health, crud_patterns!("/admin/health"), false)
            .crud(Section::Activities, crud_patterns!("/admin/activities"), false)
            .crud(Section::Billing, crud_patterns!("/admin/billing"), false)
            .crud(Section::Users, crud_patterns!("/admin/users"), false)
            .settings("/admin/settings", Screen::AdminSettings);

        let staff = Subtree::new("staff", "/staff", RoleSet::only(Role::Staff))
            .route("/staff", Screen::Dashboard)
            .crud(Section::Children, crud_patterns!("/staff/children"), true)
            .crud(Section::Attendance, crud_patterns!("/staff/attendance"), false)
            .crud(Section::Health, crud_patterns!("/staff/health"), false)
            .crud(Section::Activities, crud_patterns!("/staff/activities"), false)
            .crud(Section::Billing, crud_patterns!("/staff/billing"), false)
            .settings("/staff/settings", Screen::StaffSettings);

        Self {
            public: vec![Route {
                pattern: PathPattern::parse(LOGIN_PATH),
                screen: Screen::Login,
            }],
            redirects: vec![(PathPattern::parse("/"), LOGIN_PATH)],
            subtrees: vec![admin, staff],
        }
    }

    /// Routes rendered without a guard.
    pub fn public_routes(&self) -> &[Route] {
        &self.public
    }

    /// Unconditional redirects as `(from, to)`.
    pub fn redirects(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.redirects.iter().map(|(from, to)| (from.as_str(), *to))
    }

    /// The guarded subtrees.
    pub fn subtrees(&self) -> &[Subtree] {
        &self.subtrees
    }

    /// Look up a subtree by name.
    pub fn subtree(&self, name: &str) -> Option<&Subtree> {
        self.subtrees.iter().find(|s| s.name == name)
    }

    /// Match a requested path.
    ///
    /// When several patterns match, the one with the most literal segments
    /// wins, so `/staff/children/new` is never read as details of `new`.
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let segments = normalize(path);

        if let Some((_, to)) = self.redirects.iter().find(|(p, _)| p.matches(&segments).is_some()) {
            return RouteMatch::Redirect { to: *to };
        }

        if let Some(route) = self.public.iter().find(|r| r.pattern.matches(&segments).is_some()) {
            return RouteMatch::Public {
                screen: route.screen,
            };
        }

        let mut best: Option<(&Subtree, &Route, Vec<(String, String)>)> = None;
        for subtree in &self.subtrees {
            for route in &subtree.routes {
                let Some(params) = route.pattern.matches(&segments) else {
                    continue;
                };
                let better = best
                    .as_ref()
                    .is_none_or(|(_, b, _)| route.pattern.specificity() > b.pattern.specificity());
                if better {
                    best = Some((subtree, route, params));
                }
            }
        }

        match best {
            Some((subtree, route, params)) => RouteMatch::Guarded {
                subtree: subtree.name,
                allowed: subtree.allowed,
                pattern: route.pattern.as_str(),
                screen: route.screen,
                params,
            },
            None => RouteMatch::NotFound,
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guarded(path: &str) -> (&'static str, Screen, Vec<(String, String)>) {
        match RouteTable::standard().resolve(path) {
            RouteMatch::Guarded {
                subtree,
                screen,
                params,
                ..
            } => (subtree, screen, params),
            other => panic!("expected guarded match for {path}, got {other:?}"),
        }
    }

    #[test]
    fn test_root_redirects_to_login() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/"), RouteMatch::Redirect { to: "/login" });
        assert_eq!(
            table.resolve("/login"),
            RouteMatch::Public {
                screen: Screen::Login
            }
        );
    }

    #[test]
    fn test_literal_beats_param() {
        let (_, screen, params) = guarded("/staff/children/new");
        assert_eq!(screen, Screen::Create(Section::Children));
        assert!(params.is_empty());

        let (_, screen, params) = guarded("/staff/children/42");
        assert_eq!(screen, Screen::Details(Section::Children));
        assert_eq!(params, vec![("id".to_string(), "42".to_string())]);
    }

    #[test]
    fn test_subtree_requirements() {
        let table = RouteTable::standard();
        match table.resolve("/admin/billing") {
            RouteMatch::Guarded { allowed, .. } => {
                assert!(allowed.contains(Role::Admin));
                assert!(!allowed.contains(Role::Staff));
            }
            other => panic!("unexpected {other:?}"),
        }
        let (subtree, screen, _) = guarded("/staff/attendance/edit/5");
        assert_eq!(subtree, "staff");
        assert_eq!(screen, Screen::Edit(Section::Attendance));
    }

    #[test]
    fn test_admin_only_sections_absent_from_staff() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/staff/users"), RouteMatch::NotFound);
        assert_eq!(table.resolve("/staff/staff"), RouteMatch::NotFound);
        assert_eq!(table.resolve("/admin/health/3"), RouteMatch::NotFound);
        assert_eq!(table.resolve("/parent"), RouteMatch::NotFound);
    }

    #[test]
    fn test_navigation_matches_layout() {
        let table = RouteTable::standard();
        let staff_nav: Vec<&str> = table
            .subtree("staff")
            .unwrap()
            .navigation()
            .iter()
            .map(|n| n.label)
            .collect();
        assert_eq!(
            staff_nav,
            vec![
                "Dashboard",
                "Children",
                "Attendance",
                "Health Records",
                "Activities",
                "Billing",
                "Settings"
            ]
        );

        let admin_nav = table.subtree("admin").unwrap().navigation();
        assert_eq!(admin_nav[0].path, "/admin");
        assert!(admin_nav.iter().any(|n| n.path == "/admin/users"));
    }
}
