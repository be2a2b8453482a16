//! Payment transactions and the cash ledger

use std::fmt;

use chrono::{DateTime, Utc};
use pd_core::types::Id;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Transaction lifecycle. PENDING is the only non-terminal state; everything
/// else stops a status poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    /// Terminal states see no further transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Mpesa,
    Paystack,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Mpesa => f.write_str("MPESA"),
            PaymentMethod::Paystack => f.write_str("PAYSTACK"),
        }
    }
}

/// Payment transaction record. Amounts are decimal strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Id,
    pub reference_code: String,
    pub provider_reference: Option<String>,
    pub amount: String,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    #[serde(default)]
    pub description: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub failed_reason: Option<String>,
    pub user: Id,
    #[serde(default)]
    pub user_username: String,
    #[serde(default)]
    pub user_first_name: String,
    #[serde(default)]
    pub user_last_name: String,
}

/// Payment initiation payload. The contact field depends on the chosen
/// method: M-Pesa pushes an STK prompt to a 254-prefixed phone number,
/// Paystack sends a checkout link by email.
#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "validate_contact", skip_on_field_errors = false))]
pub struct TransactionInitiateRequest {
    #[validate(custom = "crate::validate::amount")]
    pub amount: String,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(
        path = "crate::validate::MSISDN_RE",
        message = "must be 254 followed by nine digits"
    ))]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "is not a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn validate_contact(request: &TransactionInitiateRequest) -> Result<(), ValidationError> {
    match request.payment_method {
        PaymentMethod::Mpesa if request.phone_number.is_none() => {
            let mut err = ValidationError::new("phone_number_required");
            err.message = Some("phone number is required for Mpesa payments".into());
            Err(err)
        }
        PaymentMethod::Paystack if request.email.is_none() => {
            let mut err = ValidationError::new("email_required");
            err.message = Some("email is required for Paystack payments".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Initiation response: the pending transaction, plus the Paystack checkout
/// URL when the gateway hands one back synchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiateResponse {
    pub transaction: Transaction,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub authorization_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub total_amount: String,
    pub total_transactions: i64,
    pub completed_transactions: i64,
    pub pending_transactions: i64,
    pub failed_transactions: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEntryType {
    Credit,
    Debit,
}

/// Immutable double-entry record written when money moves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Id,
    pub transaction: Option<Id>,
    pub entry_type: LedgerEntryType,
    pub amount: String,
    pub balance_after: String,
    pub description: String,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mpesa_request() -> TransactionInitiateRequest {
        TransactionInitiateRequest {
            amount: "1500.00".into(),
            payment_method: PaymentMethod::Mpesa,
            phone_number: Some("254712345678".into()),
            email: None,
            description: None,
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Completed.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
        assert!(TransactionStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_mpesa_request_valid() {
        assert!(mpesa_request().validate().is_ok());
    }

    #[test]
    fn test_mpesa_requires_phone() {
        let mut request = mpesa_request();
        request.phone_number = None;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_mpesa_phone_must_be_254() {
        let mut request = mpesa_request();
        request.phone_number = Some("0712345678".into());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_paystack_requires_email() {
        let request = TransactionInitiateRequest {
            amount: "250.00".into(),
            payment_method: PaymentMethod::Paystack,
            phone_number: None,
            email: None,
            description: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_amount_must_be_positive_decimal() {
        let mut request = mpesa_request();
        request.amount = "-10".into();
        assert!(request.validate().is_err());
        request.amount = "10.999".into();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_serializes_without_absent_contact() {
        let json = serde_json::to_value(&mpesa_request()).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["payment_method"], "MPESA");
    }

    #[test]
    fn test_initiate_response_deserializes() {
        let body = r#"{
            "transaction": {
                "id": 1,
                "reference_code": "DP5TG20VG1",
                "provider_reference": null,
                "amount": "1500.00",
                "payment_method": "MPESA",
                "status": "PENDING",
                "description": "",
                "phone_number": "254712345678",
                "email": null,
                "created_at": "2025-03-01T12:00:00Z",
                "updated_at": "2025-03-01T12:00:00Z",
                "completed_at": null,
                "failed_reason": null,
                "user": 3,
                "user_username": "jdoe",
                "user_first_name": "Jane",
                "user_last_name": "Doe"
            },
            "message": "Mpesa STK push initiated. Please check your phone.",
            "task_id": "celery-task-id"
        }"#;
        let response: InitiateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.transaction.status, TransactionStatus::Pending);
        assert!(response.authorization_url.is_none());
    }
}
