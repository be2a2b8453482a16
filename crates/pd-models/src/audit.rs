//! Immutable audit trail

use chrono::{DateTime, Utc};
use pd_core::types::Id;
use serde::{Deserialize, Serialize};

use crate::user::UserRole;

/// Actions the backend records. The catch-all keeps deserialization stable
/// when the server grows new action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Login,
    Logout,
    UserCreated,
    UserUpdated,
    UserDeleted,
    PasswordChanged,
    PasswordResetRequest,
    PasswordResetAdmin,
    PaymentInitiated,
    PaymentCompleted,
    PaymentFailed,
    PayoutInitiated,
    PayoutCompleted,
    PayoutFailed,
    QuoteCreated,
    QuoteSent,
    ContractCreated,
    ContractSigned,
    InvoiceCreated,
    InvoiceSent,
    InvoicePaid,
    InvoiceCancelled,
    ReceiptGenerated,
    DocumentVerified,
    #[serde(other)]
    Unknown,
}

/// Append-only log entry; the backend rejects updates and deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: Id,
    pub user: Option<Id>,
    #[serde(default)]
    pub username: Option<String>,
    pub action: AuditAction,
    pub description: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub id: Id,
    pub user: Id,
    #[serde(default)]
    pub username: Option<String>,
    pub session_key: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub is_active: bool,
}

/// Per-user online/offline snapshot from the active-status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveStatus {
    pub user_id: Id,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_seen: Option<DateTime<Utc>>,
}
