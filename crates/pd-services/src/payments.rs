//! Payment initiation, status polling, listings and the cash ledger

use pd_client::{ApiClient, PollOutcome, StatusPoller};
use pd_core::pagination::{Page, PageQuery};
use pd_core::ApiResult;
use pd_models::transaction::{
    InitiateResponse, LedgerEntry, Transaction, TransactionInitiateRequest, TransactionSummary,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::validated;

pub struct PaymentsService<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Kick off a payment. M-Pesa pushes an STK prompt and leaves a pending
    /// transaction to poll; Paystack responses may carry a checkout
    /// `authorization_url` for the customer to follow.
    pub async fn initiate(&self, request: &TransactionInitiateRequest) -> ApiResult<InitiateResponse> {
        validated(request)?;
        self.client.post("payments/initiate/", request).await
    }

    pub async fn status(&self, reference: &str) -> ApiResult<Transaction> {
        self.client
            .get(&format!("payments/status/{}/", reference))
            .await
    }

    pub async fn detail(&self, reference: &str) -> ApiResult<Transaction> {
        self.client.get(&format!("payments/{}/", reference)).await
    }

    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Transaction>> {
        self.client
            .get_query("payments/list/", &query.to_pairs())
            .await
    }

    pub async fn summary(&self) -> ApiResult<TransactionSummary> {
        self.client.get("payments/summary/").await
    }

    pub async fn ledger(&self, query: &PageQuery) -> ApiResult<Page<LedgerEntry>> {
        self.client
            .get_query("payments/ledger/", &query.to_pairs())
            .await
    }

    /// Re-fetch the transaction status on the configured interval until it
    /// turns terminal or the caller cancels.
    pub async fn watch(
        &self,
        reference: &str,
        cancel: &CancellationToken,
    ) -> PollOutcome<Transaction> {
        debug!(reference, "watching payment status");
        let poller = StatusPoller::new(self.client.config().poll_interval);
        poller.run(cancel, || self.status(reference)).await
    }
}
