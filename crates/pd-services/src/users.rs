//! User management (admin-only resource)

use pd_client::ApiClient;
use pd_core::pagination::{Page, PageQuery};
use pd_core::types::Id;
use pd_core::ApiResult;
use pd_models::user::{
    AdminResetRequest, PasswordResetRecord, User, UserCreateRequest, UserUpdateRequest,
};

use crate::validated;

pub struct UsersService<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<User>> {
        self.client.get_query("users/list/", &query.to_pairs()).await
    }

    pub async fn get(&self, id: Id) -> ApiResult<User> {
        self.client.get(&format!("users/{}/", id)).await
    }

    pub async fn create(&self, request: &UserCreateRequest) -> ApiResult<User> {
        validated(request)?;
        self.client.post("users/list/", request).await
    }

    pub async fn update(&self, id: Id, request: &UserUpdateRequest) -> ApiResult<User> {
        validated(request)?;
        self.client.patch(&format!("users/{}/", id), request).await
    }

    pub async fn delete(&self, id: Id) -> ApiResult<()> {
        self.client.delete(&format!("users/{}/", id)).await
    }

    /// Resolve a staff password-reset request.
    pub async fn admin_reset(
        &self,
        request_id: Id,
        request: &AdminResetRequest,
    ) -> ApiResult<PasswordResetRecord> {
        self.client
            .put(&format!("users/admin-reset/{}/", request_id), request)
            .await
    }
}
