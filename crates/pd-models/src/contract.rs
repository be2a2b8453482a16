//! Service contracts and public signing

use std::fmt;

use chrono::{DateTime, Utc};
use pd_core::types::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Draft,
    Sent,
    Viewed,
    Signed,
    Expired,
    Cancelled,
}

impl ContractStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::Draft => "DRAFT",
            ContractStatus::Sent => "SENT",
            ContractStatus::Viewed => "VIEWED",
            ContractStatus::Signed => "SIGNED",
            ContractStatus::Expired => "EXPIRED",
            ContractStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: Id,
    pub reference_code: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub service_description: String,
    pub amount: String,
    pub status: ContractStatus,
    pub signed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Id,
    #[serde(default)]
    pub created_by_username: String,
    pub invoice_reference: Option<String>,
    /// Opaque token embedded in the public signing link
    pub signing_token: String,
}

impl Contract {
    /// Build the public signing link a client follows to view and sign.
    pub fn signing_link(&self, portal_base: &str) -> String {
        format!(
            "{}/sign/{}",
            portal_base.trim_end_matches('/'),
            self.signing_token
        )
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ContractCreateRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub client_name: String,
    #[validate(email(message = "is not a valid email address"))]
    pub client_email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub client_phone: String,
    #[validate(length(min = 1, message = "is required"))]
    pub service_description: String,
    #[validate(custom = "crate::validate::amount")]
    pub amount: String,
}

/// Submitted through the public signing endpoint; the signature image is a
/// base64 data URL captured client-side.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ContractSignRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub signature_image: String,
    #[validate(length(min = 1, message = "is required"))]
    pub place_of_signing: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_link() {
        let body = r#"{
            "id": 9,
            "reference_code": "CT7Q2M4X9A",
            "client_name": "Acme Ltd",
            "client_email": "ops@acme.example",
            "client_phone": "254712345678",
            "service_description": "Quarterly maintenance",
            "amount": "120000.00",
            "status": "SENT",
            "signed_at": null,
            "created_at": "2025-02-10T09:00:00Z",
            "updated_at": "2025-02-10T09:00:00Z",
            "expires_at": null,
            "created_by": 1,
            "created_by_username": "admin",
            "invoice_reference": null,
            "signing_token": "tok-abc123"
        }"#;
        let contract: Contract = serde_json::from_str(body).unwrap();
        assert_eq!(
            contract.signing_link("https://portal.example.com/"),
            "https://portal.example.com/sign/tok-abc123"
        );
    }

    #[test]
    fn test_create_request_validation() {
        let request = ContractCreateRequest {
            client_name: "Acme Ltd".into(),
            client_email: "not-an-email".into(),
            client_phone: "254712345678".into(),
            service_description: "Quarterly maintenance".into(),
            amount: "120000.00".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_sign_request_requires_signature() {
        let request = ContractSignRequest {
            signature_image: String::new(),
            place_of_signing: "Nairobi".into(),
        };
        assert!(request.validate().is_err());
    }
}
