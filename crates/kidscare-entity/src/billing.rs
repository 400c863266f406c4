//! Invoices.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::amount::Amount;
use crate::resource::Resource;

/// An invoice issued for a child.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingRecord {
    pub id: i64,
    pub child_id: i64,
    pub amount: Amount,
    #[serde(default = "default_status")]
    pub status: String,
    pub issued_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for issuing an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BillingCreate {
    #[validate(range(min = 1))]
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub child_id: i64,
    #[validate(custom(function = "crate::amount::validate_amount"))]
    pub amount: Amount,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub issued_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update of an invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BillingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::amount::validate_amount"))]
    pub amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_status() -> String {
    "Unpaid".to_string()
}

impl Resource for BillingRecord {
    type Create = BillingCreate;
    type Update = BillingUpdate;

    const ENDPOINT: &'static str = "/billing";
    const LABEL: &'static str = "billing record";

    fn id(&self) -> i64 {
        self.id
    }
}
