//! B2C payouts (admin-only resource)

use pd_client::{ApiClient, PollOutcome, StatusPoller};
use pd_core::pagination::{Page, PageQuery};
use pd_core::types::Id;
use pd_core::ApiResult;
use pd_models::payout::{Payout, PayoutInitiateRequest, PayoutInitiateResponse, PayoutSummary};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::validated;

pub struct PayoutsService<'a> {
    client: &'a ApiClient,
}

impl<'a> PayoutsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn initiate(&self, request: &PayoutInitiateRequest) -> ApiResult<PayoutInitiateResponse> {
        validated(request)?;
        self.client.post("payouts/initiate/", request).await
    }

    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Payout>> {
        self.client
            .get_query("payouts/list/", &query.to_pairs())
            .await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Payout> {
        self.client.get(&format!("payouts/{}/", id)).await
    }

    pub async fn summary(&self) -> ApiResult<PayoutSummary> {
        self.client.get("payouts/summary/").await
    }

    /// Poll the payout until the B2C result callback lands a terminal
    /// status, or the caller cancels.
    pub async fn watch(&self, id: Id, cancel: &CancellationToken) -> PollOutcome<Payout> {
        debug!(id, "watching payout status");
        let poller = StatusPoller::new(self.client.config().poll_interval);
        poller.run(cancel, || self.get(id)).await
    }
}
