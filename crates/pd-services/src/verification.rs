//! Public document verification

use pd_client::ApiClient;
use pd_core::pagination::{Page, PageQuery};
use pd_core::ApiResult;
use pd_models::verification::{VerificationLog, VerificationRequest, VerificationResponse};

use crate::validated;

pub struct VerificationService<'a> {
    client: &'a ApiClient,
}

impl<'a> VerificationService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Check a document code. The endpoint is open to the public so clients
    /// can verify receipts and invoices they were handed.
    pub async fn check(&self, request: &VerificationRequest) -> ApiResult<VerificationResponse> {
        validated(request)?;
        self.client.post_public("verification/check/", request).await
    }

    /// Verification attempt history (authenticated).
    pub async fn logs(&self, query: &PageQuery) -> ApiResult<Page<VerificationLog>> {
        self.client
            .get_query("verification/logs/", &query.to_pairs())
            .await
    }
}
