//! Table rows for record lists.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tabled::Tabled;

use kidscare_core::types::{Theme, UserRecord};
use kidscare_entity::{
    Activity, Amount, AttendanceRecord, BillingRecord, Child, HealthRecord, Resource, StaffMember,
};

use crate::output::{self, OutputFormat};

/// A record type that knows how to show itself in a list.
pub trait Listed: Resource {
    type Row: Serialize + Tabled;

    /// Fields a create form cannot do without.
    const REQUIRED: &'static [&'static str];

    fn row(&self) -> Self::Row;

    /// Print records shown below the details view.
    fn print_related(&self, _format: OutputFormat, _theme: Theme) {}
}

#[derive(Debug, Serialize, Tabled)]
pub struct ChildRow {
    id: i64,
    name: String,
    #[tabled(rename = "date of birth")]
    dob: String,
    gender: String,
    parent: String,
    contact: String,
    allergies: String,
}

impl Listed for Child {
    type Row = ChildRow;

    const REQUIRED: &'static [&'static str] = &["name"];

    fn row(&self) -> ChildRow {
        ChildRow {
            id: self.id,
            name: self.name.clone(),
            dob: date(self.dob),
            gender: text(&self.gender),
            parent: text(&self.parent_name),
            contact: text(&self.parent_contact),
            allergies: truncate(&text(&self.allergies), 30),
        }
    }

    fn print_related(&self, format: OutputFormat, theme: Theme) {
        if format == OutputFormat::Json {
            return;
        }
        output::print_heading("Health Records");
        let health: Vec<HealthRow> = self.health_records.iter().map(Listed::row).collect();
        output::print_list(&health, format, theme);

        output::print_heading("Attendance");
        let attendance: Vec<AttendanceRow> =
            self.attendance_records.iter().map(Listed::row).collect();
        output::print_list(&attendance, format, theme);

        output::print_heading("Billing");
        let billing: Vec<BillingRow> = self.billings.iter().map(Listed::row).collect();
        output::print_list(&billing, format, theme);
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct StaffRow {
    id: i64,
    name: String,
    position: String,
    room: String,
    contact: String,
    #[tabled(rename = "hired")]
    hire_date: String,
}

impl Listed for StaffMember {
    type Row = StaffRow;

    const REQUIRED: &'static [&'static str] = &["user_id"];

    fn row(&self) -> StaffRow {
        StaffRow {
            id: self.id,
            name: self.display_name(),
            position: text(&self.position),
            room: text(&self.assigned_room),
            contact: text(&self.contact),
            hire_date: date(self.hire_date),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct AttendanceRow {
    id: i64,
    child: i64,
    date: String,
    #[tabled(rename = "check in")]
    check_in: String,
    #[tabled(rename = "check out")]
    check_out: String,
    status: String,
}

impl Listed for AttendanceRecord {
    type Row = AttendanceRow;

    const REQUIRED: &'static [&'static str] = &["child_id", "date"];

    fn row(&self) -> AttendanceRow {
        AttendanceRow {
            id: self.id,
            child: self.child_id,
            date: date(Some(self.date)),
            check_in: time(self.check_in),
            check_out: time(self.check_out),
            status: self.status.clone(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct ActivityRow {
    id: i64,
    title: String,
    date: String,
    time: String,
    staff: String,
    description: String,
}

impl Listed for Activity {
    type Row = ActivityRow;

    const REQUIRED: &'static [&'static str] = &["title"];

    fn row(&self) -> ActivityRow {
        let time = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => format!("{}–{}", start.format("%H:%M"), end.format("%H:%M")),
            (start, _) => time(start),
        };
        ActivityRow {
            id: self.id,
            title: self.title.clone(),
            date: date(self.scheduled_date),
            time,
            staff: self
                .assigned_staff_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            description: truncate(&text(&self.description), 50),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct HealthRow {
    id: i64,
    child: i64,
    date: String,
    doctor: String,
    description: String,
}

impl Listed for HealthRecord {
    type Row = HealthRow;

    const REQUIRED: &'static [&'static str] = &["child_id", "description"];

    fn row(&self) -> HealthRow {
        HealthRow {
            id: self.id,
            child: self.child_id,
            date: date(self.record_date),
            doctor: text(&self.doctor_name),
            description: truncate(&self.description, 50),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct BillingRow {
    id: i64,
    child: i64,
    amount: String,
    status: String,
    issued: String,
    due: String,
}

impl Listed for BillingRecord {
    type Row = BillingRow;

    const REQUIRED: &'static [&'static str] = &["child_id", "amount"];

    fn row(&self) -> BillingRow {
        BillingRow {
            id: self.id,
            child: self.child_id,
            amount: currency(&self.amount),
            status: self.status.clone(),
            issued: date(self.issued_date),
            due: date(self.due_date),
        }
    }
}

/// User display row for the user management screen
#[derive(Debug, Serialize, Tabled)]
pub struct UserRow {
    id: i64,
    name: String,
    email: String,
    role: String,
}

impl From<&UserRecord> for UserRow {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
        }
    }
}

fn text(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

/// `DD/MM/YYYY`, or `-`.
pub fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn time(value: Option<NaiveTime>) -> String {
    value
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Shorten to `max` characters with a trailing `...`.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let head: String = value.chars().take(max).collect();
    format!("{head}...")
}

/// `$1,234.50` from decimal text; non-decimal text is shown unchanged.
pub fn currency(amount: &Amount) -> String {
    if !amount.is_decimal() {
        return amount.to_string();
    }
    let raw = amount.as_str();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let cents: String = frac.chars().chain("00".chars()).take(2).collect();

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${grouped}.{cents}", if negative { "-" } else { "" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(currency(&Amount::new("1234.5")), "$1,234.50");
        assert_eq!(currency(&Amount::new("12")), "$12.00");
        assert_eq!(currency(&Amount::new("1000000.125")), "$1,000,000.12");
        assert_eq!(currency(&Amount::new("-3.5")), "-$3.50");
        assert_eq!(currency(&Amount::new("n/a")), "n/a");
    }

    #[test]
    fn test_date_and_truncate() {
        assert_eq!(date(NaiveDate::from_ymd_opt(2024, 2, 9)), "09/02/2024");
        assert_eq!(date(None), "-");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_billing_row() {
        let record: BillingRecord = serde_json::from_value(serde_json::json!({
            "id": 4, "child_id": 2, "amount": "250.00", "due_date": "2026-11-01"
        }))
        .unwrap();
        let row = record.row();
        assert_eq!(row.amount, "$250.00");
        assert_eq!(row.status, "Unpaid");
        assert_eq!(row.due, "01/11/2026");
    }
}
