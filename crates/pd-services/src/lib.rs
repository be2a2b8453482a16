//! # pd-services
//!
//! One typed service per backend resource, layered over [`pd_client::ApiClient`].
//! Submission payloads run their client-side validation before any request
//! is issued; endpoint paths mirror the backend's URL layout.

pub mod audit;
pub mod auth;
pub mod contracts;
pub mod invoices;
pub mod notifications;
pub mod payments;
pub mod payouts;
pub mod quotes;
pub mod receipts;
pub mod reports;
pub mod users;
pub mod verification;

pub use audit::AuditService;
pub use auth::AuthService;
pub use contracts::ContractsService;
pub use invoices::InvoicesService;
pub use notifications::NotificationsService;
pub use payments::PaymentsService;
pub use payouts::PayoutsService;
pub use quotes::QuotesService;
pub use receipts::ReceiptsService;
pub use reports::ReportsService;
pub use users::UsersService;
pub use verification::VerificationService;

use pd_core::{ApiResult, Error};
use validator::Validate;

/// Run a payload's field checks; a failure never issues a network request.
pub(crate) fn validated<T: Validate>(payload: &T) -> ApiResult<()> {
    payload
        .validate()
        .map_err(|errors| Error::Validation(errors.into()))
}
