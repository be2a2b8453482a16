//! In-app notifications

use pd_client::ApiClient;
use pd_core::pagination::{Page, PageQuery};
use pd_core::types::Id;
use pd_core::ApiResult;
use pd_models::notification::{Notification, UnreadCount};

pub struct NotificationsService<'a> {
    client: &'a ApiClient,
}

impl<'a> NotificationsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Notification>> {
        self.client
            .get_query("notifications/list/", &query.to_pairs())
            .await
    }

    pub async fn get(&self, id: Id) -> ApiResult<Notification> {
        self.client.get(&format!("notifications/{}/", id)).await
    }

    pub async fn mark_read(&self, id: Id) -> ApiResult<()> {
        self.client
            .post_ok(&format!("notifications/{}/mark-read/", id))
            .await
    }

    pub async fn mark_all_read(&self) -> ApiResult<()> {
        self.client.post_ok("notifications/mark-all-read/").await
    }

    pub async fn unread_count(&self) -> ApiResult<UnreadCount> {
        self.client.get("notifications/unread-count/").await
    }
}
