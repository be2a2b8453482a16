//! Invoices

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use pd_core::types::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Sent => "SENT",
            InvoiceStatus::Pending => "PENDING",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Overdue => "OVERDUE",
            InvoiceStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Id,
    pub reference_code: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_company: Option<String>,
    pub service_description: String,
    pub amount: String,
    pub tax_amount: String,
    pub total_amount: String,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Id,
    #[serde(default)]
    pub created_by_username: String,
    #[serde(default)]
    pub created_by_first_name: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct InvoiceCreateRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub client_name: String,
    #[validate(email(message = "is not a valid email address"))]
    pub client_email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub client_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_company: Option<String>,
    #[validate(length(min = 1, message = "is required"))]
    pub service_description: String,
    #[validate(custom = "crate::validate::amount")]
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "crate::validate::amount")]
    pub tax_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Status transition payload; `payment_reference` accompanies PAID.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceStatusUpdate {
    pub status: InvoiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
}
