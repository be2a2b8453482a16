//! Authenticated HTTP wrapper
//!
//! Every request goes through the same pipeline: attach the bearer token
//! when a session is held, and on a 401 exchange the refresh token for a new
//! access token and resubmit the original request exactly once. A failed
//! exchange (or no refresh token) clears the session. This is a bounded
//! one-shot retry, not a backoff policy.

use std::sync::Arc;

use pd_auth::{Session, SessionStore};
use pd_core::{ApiResult, ClientConfig, Error};
use pd_models::user::{TokenRefreshRequest, TokenRefreshResponse};
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// HTTP client for the PayDesk API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn SessionStore>,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| Error::Config(err.to_string()))?;

        let mut base_url = Url::parse(&config.base_url)
            .map_err(|err| Error::Config(format!("invalid base URL {:?}: {}", config.base_url, err)))?;
        // joins are relative to the base; it must end in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            store,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Current session snapshot, if one is held.
    pub fn current_session(&self) -> Option<Session> {
        self.store.load()
    }

    // ------------------------------------------------------------------
    // Authenticated verbs
    // ------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.request(Method::GET, path, None, None, true).await?;
        Self::decode(response).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ApiResult<T> {
        let response = self
            .request(Method::GET, path, Some(query), None, true)
            .await?;
        Self::decode(response).await
    }

    /// Raw body download (receipt and invoice PDFs).
    pub async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>> {
        let response = self.request(Method::GET, path, None, None, true).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| Error::Network(err.to_string()))?;
        Ok(bytes.to_vec())
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self
            .request(Method::POST, path, None, Some(body), true)
            .await?;
        Self::decode(response).await
    }

    /// Body-less POST returning JSON.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.request(Method::POST, path, None, None, true).await?;
        Self::decode(response).await
    }

    /// Body-less POST where only success matters.
    pub async fn post_ok(&self, path: &str) -> ApiResult<()> {
        let response = self.request(Method::POST, path, None, None, true).await?;
        Self::ensure_success(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self
            .request(Method::PUT, path, None, Some(body), true)
            .await?;
        Self::decode(response).await
    }

    /// PUT where the response body is not interesting.
    pub async fn put_ok<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        let body = encode(body)?;
        let response = self
            .request(Method::PUT, path, None, Some(body), true)
            .await?;
        Self::ensure_success(response).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self
            .request(Method::PATCH, path, None, Some(body), true)
            .await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.request(Method::DELETE, path, None, None, true).await?;
        Self::ensure_success(response).await
    }

    // ------------------------------------------------------------------
    // Unauthenticated verbs (login, refresh, public views)
    //
    // No bearer header is attached and a 401 is surfaced as a plain API
    // error; the refresh flow never runs for these.
    // ------------------------------------------------------------------

    pub async fn get_public<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.request(Method::GET, path, None, None, false).await?;
        Self::decode(response).await
    }

    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self
            .request(Method::POST, path, None, Some(body), false)
            .await?;
        Self::decode(response).await
    }

    // ------------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------------

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(String, String)]>,
        body: Option<Value>,
        authenticated: bool,
    ) -> ApiResult<reqwest::Response> {
        let url = self.endpoint(path)?;
        let token = if authenticated {
            self.store.access_token()
        } else {
            None
        };

        debug!(%method, %url, authenticated, "sending request");
        let response = self
            .send_once(method.clone(), url.clone(), query, body.as_ref(), token)
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED || !authenticated {
            return Ok(response);
        }

        // One-shot refresh, then resubmit the original request with the new
        // access token. A second 401 is final.
        let access = self.refresh_access_token().await?;
        let retried = self
            .send_once(method, url, query, body.as_ref(), Some(access))
            .await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }
        Ok(retried)
    }

    async fn send_once(
        &self,
        method: Method,
        url: Url,
        query: Option<&[(String, String)]>,
        body: Option<&Value>,
        token: Option<String>,
    ) -> ApiResult<reqwest::Response> {
        let mut request = self.http.request(method, url);
        if let Some(pairs) = query {
            request = request.query(pairs);
        }
        if let Some(json) = body {
            request = request.json(json);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
            .send()
            .await
            .map_err(|err| Error::Network(err.to_string()))
    }

    /// Exchange the refresh token for a new access token. Any failure here
    /// (including a missing refresh token) discards the session.
    async fn refresh_access_token(&self) -> ApiResult<String> {
        let Some(refresh) = self.store.refresh_token() else {
            self.discard_session();
            return Err(Error::SessionExpired);
        };

        let url = self.endpoint("auth/refresh/")?;
        let result = self
            .http
            .post(url)
            .json(&TokenRefreshRequest { refresh })
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "token refresh rejected");
                self.discard_session();
                return Err(Error::SessionExpired);
            }
            Err(err) => {
                warn!(%err, "token refresh request failed");
                self.discard_session();
                return Err(Error::SessionExpired);
            }
        };

        let body: TokenRefreshResponse = match response.json().await {
            Ok(body) => body,
            Err(_) => {
                self.discard_session();
                return Err(Error::SessionExpired);
            }
        };

        self.store.set_access_token(&body.access)?;
        Ok(body.access)
    }

    fn discard_session(&self) {
        if let Err(err) = self.store.clear() {
            warn!(%err, "failed to clear session state");
        }
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::Config(format!("invalid endpoint path {:?}: {}", path, err)))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| Error::Network(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| Error::Decode(err.to_string()))
    }

    async fn ensure_success(response: reqwest::Response) -> ApiResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> Error {
        let body = response.text().await.unwrap_or_default();
        Error::Api {
            status: status.as_u16(),
            message: extract_message(&body, status),
        }
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|err| Error::Decode(format!("request body: {}", err)))
}

/// Pull the human-readable message out of an error body. The backend uses
/// `{detail}`, `{error}` or `{message}` envelopes, or a field → messages map
/// for serializer failures; anything else is surfaced as raw text.
fn extract_message(body: &str, status: StatusCode) -> String {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(message) = object.get(key).and_then(Value::as_str) {
                return message.to_owned();
            }
        }

        let mut parts = Vec::new();
        for (field, messages) in &object {
            if let Some(list) = messages.as_array() {
                let joined: Vec<&str> = list.iter().filter_map(Value::as_str).collect();
                if !joined.is_empty() {
                    parts.push(format!("{}: {}", field, joined.join(", ")));
                }
            }
        }
        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_owned()
    } else {
        trimmed.to_owned()
    }
}
