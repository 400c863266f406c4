//! The closed role vocabulary and role sets used by route requirements.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A coarse permission class determining which route subtree a user may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Center administrator, owns the `/admin` subtree.
    Admin,
    /// Caregiver, owns the `/staff` subtree.
    Staff,
    /// Parent account. Modeled by user management but has no console subtree.
    Parent,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Staff, Role::Parent];

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Parent => "parent",
        }
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    fn bit(self) -> u8 {
        match self {
            Self::Admin => 0b001,
            Self::Staff => 0b010,
            Self::Parent => 0b100,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::AppError;

    /// Exact, case-sensitive match against the wire vocabulary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "parent" => Ok(Self::Parent),
            _ => Err(crate::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, staff, parent"
            ))),
        }
    }
}

/// A set of roles. The empty set means "any authenticated role".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    /// The empty requirement: any authenticated user passes.
    pub const ANY: RoleSet = RoleSet(0);

    /// A set containing a single role.
    pub fn only(role: Role) -> Self {
        Self(role.bit())
    }

    /// Build a set from a list of roles.
    pub fn of(roles: &[Role]) -> Self {
        Self(roles.iter().fold(0, |acc, r| acc | r.bit()))
    }

    /// Whether the set places no restriction.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether `role` is a member.
    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// Iterate the member roles.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "any");
        }
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        write!(f, "{}", names.join(","))
    }
}
