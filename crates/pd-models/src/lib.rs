//! # pd-models
//!
//! Entity and payload types mirrored from the backend API response shapes.
//! Records are plain data; lifecycle transitions (contract DRAFT → SENT →
//! VIEWED → SIGNED and the like) are owned and enforced server-side. The
//! client only displays and resubmits these shapes, with field-level checks
//! on submission payloads before a request is issued.

pub mod audit;
pub mod contract;
pub mod invoice;
pub mod notification;
pub mod payout;
pub mod quote;
pub mod receipt;
pub mod report;
pub mod transaction;
pub mod user;
pub mod validate;
pub mod verification;

pub use audit::{ActiveStatus, AuditAction, AuditLog, UserSession};
pub use contract::{Contract, ContractCreateRequest, ContractSignRequest, ContractStatus};
pub use invoice::{Invoice, InvoiceCreateRequest, InvoiceStatus, InvoiceStatusUpdate};
pub use notification::{Notification, NotificationPriority, NotificationType, UnreadCount};
pub use payout::{Payout, PayoutInitiateRequest, PayoutInitiateResponse, PayoutSummary};
pub use quote::{Quote, QuoteCreateRequest, QuoteStatus};
pub use receipt::{Receipt, ReceiptGenerateRequest};
pub use report::{DashboardSummary, RevenueChartPoint, TrendPoint};
pub use transaction::{
    InitiateResponse, LedgerEntry, LedgerEntryType, PaymentMethod, Transaction,
    TransactionInitiateRequest, TransactionStatus, TransactionSummary,
};
pub use user::{
    AdminResetRequest, ChangePasswordRequest, LoginRequest, LoginResponse, PasswordResetRecord,
    ProfileUpdateRequest, TokenRefreshRequest, TokenRefreshResponse, User, UserCreateRequest,
    UserRole, UserUpdateRequest,
};
pub use verification::{VerificationLog, VerificationRequest, VerificationResponse};
