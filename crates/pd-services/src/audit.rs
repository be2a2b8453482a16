//! Audit trail (admin-only, except one's own history)

use pd_client::ApiClient;
use pd_core::pagination::{Page, PageQuery};
use pd_core::types::Id;
use pd_core::ApiResult;
use pd_models::audit::{ActiveStatus, AuditLog, UserSession};

pub struct AuditService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuditService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn logs(&self, query: &PageQuery) -> ApiResult<Page<AuditLog>> {
        self.client.get_query("audit/logs/", &query.to_pairs()).await
    }

    pub async fn log(&self, id: Id) -> ApiResult<AuditLog> {
        self.client.get(&format!("audit/logs/{}/", id)).await
    }

    pub async fn sessions(&self, query: &PageQuery) -> ApiResult<Page<UserSession>> {
        self.client
            .get_query("audit/sessions/", &query.to_pairs())
            .await
    }

    /// Online/offline snapshot per user.
    pub async fn active_status(&self) -> ApiResult<Vec<ActiveStatus>> {
        self.client.get("audit/active-status/").await
    }

    /// The calling user's own audit history; available to both roles.
    pub async fn my_logs(&self, query: &PageQuery) -> ApiResult<Page<AuditLog>> {
        self.client
            .get_query("audit/my-logs/", &query.to_pairs())
            .await
    }
}
