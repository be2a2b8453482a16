//! Quotes

use pd_client::ApiClient;
use pd_core::pagination::{Page, PageQuery};
use pd_core::types::Id;
use pd_core::ApiResult;
use pd_models::quote::{Quote, QuoteCreateRequest};

use crate::validated;

pub struct QuotesService<'a> {
    client: &'a ApiClient,
}

impl<'a> QuotesService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Quote>> {
        self.client.get_query("quotes/list/", &query.to_pairs()).await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Quote> {
        self.client.get(&format!("quotes/{}/", id)).await
    }

    pub async fn create(&self, request: &QuoteCreateRequest) -> ApiResult<Quote> {
        validated(request)?;
        self.client.post("quotes/create/", request).await
    }

    /// Client-facing quote view by reference code; no bearer token.
    pub async fn public_view(&self, reference: &str) -> ApiResult<Quote> {
        self.client
            .get_public(&format!("quotes/public/{}/", reference))
            .await
    }
}
