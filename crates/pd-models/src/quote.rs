//! Quotes

use std::fmt;

use chrono::{DateTime, Utc};
use pd_core::types::Id;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Viewed,
    Accepted,
    Rejected,
    Expired,
}

impl QuoteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QuoteStatus::Draft => "DRAFT",
            QuoteStatus::Sent => "SENT",
            QuoteStatus::Viewed => "VIEWED",
            QuoteStatus::Accepted => "ACCEPTED",
            QuoteStatus::Rejected => "REJECTED",
            QuoteStatus::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Id,
    pub reference_code: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub service_description: String,
    pub amount: String,
    pub valid_until: DateTime<Utc>,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Id,
    #[serde(default)]
    pub created_by_username: String,
    #[serde(default)]
    pub created_by_first_name: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct QuoteCreateRequest {
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
