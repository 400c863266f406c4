//! The static, role-scoped route table.
//!
//! Two guarded subtrees, `/admin/*` and `/staff/*`, each declare their
//! required role exactly once. Screens are shared between subtrees.

pub mod pattern;
pub mod screen;
pub mod table;

pub use pattern::{PathPattern, normalize};
pub use screen::{Screen, Section};
pub use table::{NavItem, Route, RouteMatch, RouteTable, Subtree};
