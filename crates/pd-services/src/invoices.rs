//! Invoices

use pd_client::ApiClient;
use pd_core::pagination::{Page, PageQuery};
use pd_core::types::Id;
use pd_core::ApiResult;
use pd_models::invoice::{Invoice, InvoiceCreateRequest, InvoiceStatusUpdate};

use crate::validated;

pub struct InvoicesService<'a> {
    client: &'a ApiClient,
}

impl<'a> InvoicesService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Invoice>> {
        self.client
            .get_query("invoices/list/", &query.to_pairs())
            .await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Invoice> {
        self.client.get(&format!("invoices/{}/", id)).await
    }

    pub async fn create(&self, request: &InvoiceCreateRequest) -> ApiResult<Invoice> {
        validated(request)?;
        self.client.post("invoices/create/", request).await
    }

    /// Transition the invoice (PAID with its payment reference, or
    /// CANCELLED). The backend owns the lifecycle rules.
    pub async fn update_status(&self, id: Id, update: &InvoiceStatusUpdate) -> ApiResult<Invoice> {
        self.client
            .put(&format!("invoices/{}/status/", id), update)
            .await
    }

    /// Email the invoice to the client.
    pub async fn send(&self, id: Id) -> ApiResult<()> {
        self.client.post_ok(&format!("invoices/{}/send/", id)).await
    }

    /// Download the rendered PDF.
    pub async fn download(&self, id: Id) -> ApiResult<Vec<u8>> {
        self.client
            .get_bytes(&format!("invoices/{}/download/", id))
            .await
    }

    pub async fn overdue(&self, query: &PageQuery) -> ApiResult<Page<Invoice>> {
        self.client
            .get_query("invoices/overdue/", &query.to_pairs())
            .await
    }
}
