//! Contracts, including the unauthenticated public signing flow

use pd_client::ApiClient;
use pd_core::pagination::{Page, PageQuery};
use pd_core::types::Id;
use pd_core::ApiResult;
use pd_models::contract::{Contract, ContractCreateRequest, ContractSignRequest};

use crate::validated;

pub struct ContractsService<'a> {
    client: &'a ApiClient,
}

impl<'a> ContractsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Contract>> {
        self.client
            .get_query("contracts/list/", &query.to_pairs())
            .await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Contract> {
        self.client.get(&format!("contracts/{}/", id)).await
    }

    pub async fn create(&self, request: &ContractCreateRequest) -> ApiResult<Contract> {
        validated(request)?;
        self.client.post("contracts/create/", request).await
    }

    /// Client-facing view reached through the signing link. Marks the
    /// contract VIEWED server-side; no bearer token is attached.
    pub async fn public_view(&self, token: &str) -> ApiResult<Contract> {
        self.client
            .get_public(&format!("contracts/sign/{}/", token))
            .await
    }

    /// Submit a signature through the public signing endpoint.
    pub async fn sign(&self, token: &str, request: &ContractSignRequest) -> ApiResult<Contract> {
        validated(request)?;
        self.client
            .post_public(&format!("contracts/sign/{}/submit/", token), request)
            .await
    }
}
