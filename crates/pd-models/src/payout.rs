//! B2C payouts (admin-only)
//!
//! Payouts share the transaction lifecycle: PENDING until the M-Pesa B2C
//! result callback lands, then COMPLETED or FAILED.

use chrono::{DateTime, Utc};
use pd_core::types::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::transaction::TransactionStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payout {
    pub id: Id,
    pub reference_code: String,
    pub provider_reference: Option<String>,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub amount: String,
    pub reason: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub failed_reason: Option<String>,
    pub admin_user: Id,
    #[serde(default)]
    pub admin_username: String,
    #[serde(default)]
    pub admin_first_name: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct PayoutInitiateRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub recipient_name: String,
    #[validate(regex(
        path = "crate::validate::MSISDN_RE",
        message = "must be 254 followed by nine digits"
    ))]
    pub recipient_phone: String,
    #[validate(custom = "crate::validate::amount")]
    pub amount: String,
    #[validate(length(min = 1, message = "is required"))]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutInitiateResponse {
    pub payout: Payout,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub task_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutSummary {
    pub total_amount: String,
    pub total_payouts: i64,
    pub completed_payouts: i64,
    pub pending_payouts: i64,
    pub failed_payouts: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PayoutInitiateRequest {
        PayoutInitiateRequest {
            recipient_name: "John Vendor".into(),
            recipient_phone: "254701234567".into(),
            amount: "5000.00".into(),
            reason: "Supplier settlement".into(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_recipient_phone_format() {
        let mut bad = request();
        bad.recipient_phone = "0701234567".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_reason_required() {
        let mut bad = request();
        bad.reason = String::new();
        assert!(bad.validate().is_err());
    }
}
