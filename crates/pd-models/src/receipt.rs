//! Receipts generated for completed transactions

use chrono::{DateTime, Utc};
use pd_core::types::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Id,
    pub reference_code: String,
    pub transaction: Id,
    #[serde(default)]
    pub transaction_reference: String,
    #[serde(default)]
    pub transaction_amount: String,
    #[serde(default)]
    pub transaction_status: String,
    #[serde(default)]
    pub transaction_payment_method: String,
    pub pdf_file: Option<String>,
    #[serde(default)]
    pub status: String,
    pub generated_at: DateTime<Utc>,
    pub downloaded_at: Option<DateTime<Utc>>,
    pub downloaded_by: Option<Id>,
    pub downloaded_by_username: Option<String>,
    #[serde(default)]
    pub download_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiptGenerateRequest {
    pub transaction_id: Id,
}
