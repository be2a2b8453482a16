//! Receipts for completed transactions

use pd_client::ApiClient;
use pd_core::pagination::{Page, PageQuery};
use pd_core::types::Id;
use pd_core::ApiResult;
use pd_models::receipt::{Receipt, ReceiptGenerateRequest};

pub struct ReceiptsService<'a> {
    client: &'a ApiClient,
}

impl<'a> ReceiptsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Receipt>> {
        self.client
            .get_query("receipts/list/", &query.to_pairs())
            .await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Receipt> {
        self.client.get(&format!("receipts/{}/", id)).await
    }

    pub async fn generate(&self, transaction_id: Id) -> ApiResult<Receipt> {
        self.client
            .post("receipts/generate/", &ReceiptGenerateRequest { transaction_id })
            .await
    }

    /// Download the rendered PDF; the backend counts downloads.
    pub async fn download(&self, id: Id) -> ApiResult<Vec<u8>> {
        self.client
            .get_bytes(&format!("receipts/{}/download/", id))
            .await
    }

    /// Email the receipt to the payer.
    pub async fn email(&self, id: Id) -> ApiResult<()> {
        self.client.post_ok(&format!("receipts/{}/email/", id)).await
    }

    pub async fn for_transaction(&self, transaction_id: Id) -> ApiResult<Receipt> {
        self.client
            .get(&format!("receipts/transaction/{}/", transaction_id))
            .await
    }
}
