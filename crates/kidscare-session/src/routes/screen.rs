//! Screens the route table can bind a path to.

use std::fmt;

/// A functional area of the console; each maps to one URL segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Children,
    Staff,
    Users,
    Attendance,
    Activities,
    Health,
    Billing,
    Settings,
}

impl Section {
    /// Every section, in sidebar order.
    pub const ALL: [Section; 8] = [
        Section::Children,
        Section::Staff,
        Section::Attendance,
        Section::Health,
        Section::Activities,
        Section::Billing,
        Section::Users,
        Section::Settings,
    ];

    /// The URL segment under a subtree base, e.g. `health`.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Children => "children",
            Self::Staff => "staff",
            Self::Users => "users",
            Self::Attendance => "attendance",
            Self::Activities => "activities",
            Self::Health => "health",
            Self::Billing => "billing",
            Self::Settings => "settings",
        }
    }

    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Children => "Children",
            Self::Staff => "Staff",
            Self::Users => "User Management",
            Self::Attendance => "Attendance",
            Self::Activities => "Activities",
            Self::Health => "Health Records",
            Self::Billing => "Billing",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a matched path renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Credential form; public.
    Login,
    /// Per-role landing page with summary counts.
    Dashboard,
    /// Admin's own profile, password and theme settings.
    AdminSettings,
    /// Staff member's own profile, password and theme settings.
    StaffSettings,
    /// Table of all records in a section.
    List(Section),
    /// Form creating a record.
    Create(Section),
    /// Form editing the record named by the `id` parameter.
    Edit(Section),
    /// Read-only view of the record named by the `id` parameter.
    Details(Section),
}

impl Screen {
    /// The section the screen belongs to, if any.
    pub fn section(&self) -> Option<Section> {
        match self {
            Self::List(s) | Self::Create(s) | Self::Edit(s) | Self::Details(s) => Some(*s),
            Self::AdminSettings | Self::StaffSettings => Some(Section::Settings),
            Self::Login | Self::Dashboard => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "Login"),
            Self::Dashboard => write!(f, "Dashboard"),
            Self::AdminSettings | Self::StaffSettings => write!(f, "Settings"),
            Self::List(s) => write!(f, "{s}"),
            Self::Create(s) => write!(f, "{s}: new"),
            Self::Edit(s) => write!(f, "{s}: edit"),
            Self::Details(s) => write!(f, "{s}: details"),
        }
    }
}
