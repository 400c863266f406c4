//! # kidscare-entity
//!
//! Payload types for the childcare REST API. The session and routing core
//! never inspects these; screens fetch, print and submit them.

pub mod activity;
pub mod amount;
pub mod attendance;
pub mod billing;
pub mod child;
pub mod health;
pub mod ids;
pub mod resource;
pub mod staff;
pub mod user;

pub use activity::Activity;
pub use amount::Amount;
pub use attendance::AttendanceRecord;
pub use billing::BillingRecord;
pub use child::Child;
pub use health::HealthRecord;
pub use resource::{Resource, parse_fields, payload_from_fields};
pub use staff::StaffMember;
