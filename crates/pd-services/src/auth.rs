//! Login, session lifecycle and profile self-service

use chrono::Utc;
use pd_auth::{AuthTokens, Session};
use pd_client::ApiClient;
use pd_core::{ApiResult, Error};
use pd_models::user::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ProfileUpdateRequest, TokenRefreshRequest,
    TokenRefreshResponse, User,
};
use tracing::info;

use crate::validated;

pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token pair and persist the session. The
    /// response only carries a sliver of the user, so the stored user is a
    /// seed until the next profile fetch.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        validated(request)?;
        let response: LoginResponse = self.client.post_public("auth/login/", request).await?;

        let tokens = AuthTokens::new(&response.access, &response.refresh);
        let seed = User {
            id: 0,
            username: request.username.clone(),
            email: String::new(),
            first_name: response.first_name.clone(),
            last_name: String::new(),
            phone_number: String::new(),
            role: response.role,
            is_locked: false,
            date_joined: Utc::now(),
            must_change_password: response.must_change_password,
        };
        self.client
            .session()
            .store(Session::new(tokens).with_user(seed))?;

        info!(username = %request.username, role = %response.role, "signed in");
        Ok(response)
    }

    /// Explicit token refresh, outside the interceptor path.
    pub async fn refresh(&self) -> ApiResult<TokenRefreshResponse> {
        let Some(refresh) = self.client.session().refresh_token() else {
            return Err(Error::SessionExpired);
        };
        let response: TokenRefreshResponse = self
            .client
            .post_public("auth/refresh/", &TokenRefreshRequest { refresh })
            .await?;
        self.client.session().set_access_token(&response.access)?;
        Ok(response)
    }

    /// Fetch the full profile and refresh the stored user object.
    pub async fn profile(&self) -> ApiResult<User> {
        let user: User = self.client.get("users/profile/").await?;
        self.client.session().set_user(user.clone())?;
        Ok(user)
    }

    pub async fn update_profile(&self, request: &ProfileUpdateRequest) -> ApiResult<User> {
        validated(request)?;
        let user: User = self.client.patch("users/profile/", request).await?;
        self.client.session().set_user(user.clone())?;
        Ok(user)
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<()> {
        validated(request)?;
        self.client.put_ok("users/change-password/", request).await
    }

    /// Staff flag their account for an admin-performed reset.
    pub async fn request_password_reset(&self) -> ApiResult<()> {
        self.client.post_ok("users/request-reset/").await
    }

    /// Discard all locally held session state.
    pub fn logout(&self) -> ApiResult<()> {
        info!("signing out, clearing session state");
        self.client.session().clear()
    }
}
