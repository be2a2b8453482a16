//! Public document verification

use chrono::{DateTime, NaiveDate, Utc};
use pd_core::types::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Validate)]
pub struct VerificationRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub document_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub is_valid: bool,
    #[serde(default)]
    pub document_type: String,
    pub document_code: String,
    pub date_of_issue: Option<NaiveDate>,
    pub issuing_user: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Immutable record of a verification attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationLog {
    pub id: Id,
    pub document_code: String,
    pub ip_address: String,
    pub verified_at: DateTime<Utc>,
    pub is_valid: bool,
    pub document_type: Option<String>,
}
