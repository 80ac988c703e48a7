//! HTTP client wrapping `reqwest` with bearer auth and normalized errors.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::TokenProvider;

use super::error::ApiError;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Callback fired when any request comes back 401.
pub type UnauthorizedHandler = Box<dyn Fn() + Send + Sync>;

/// Authenticated JSON client for the knowledge-base REST API.
///
/// Every request attaches `Bearer <token>` when the injected
/// [`TokenProvider`] yields one. A 401 response optionally fires a
/// registered handler (the reviewer console uses this to force a logout)
/// before the error propagates; by default nothing is installed.
pub struct ApiClient {
    base_url: String,
    http: Client,
    auth: Arc<dyn TokenProvider>,
    on_unauthorized: Option<UnauthorizedHandler>,
}

impl ApiClient {
    /// Create a client for `base_url` (no trailing slash expected).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>, auth: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
            auth,
            on_unauthorized: None,
        })
    }

    /// Install a handler fired on every 401 response.
    pub fn set_unauthorized_handler(&mut self, handler: UnauthorizedHandler) {
        self.on_unauthorized = Some(handler);
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET with query parameters, deserializing the JSON response.
    ///
    /// # Errors
    ///
    /// [`ApiError::Network`] on transport failure, [`ApiError::Status`] on
    /// a non-2xx response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self
            .request(Method::GET, endpoint)
            .await
            .query(params);
        self.send(request, endpoint).await
    }

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::get`].
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::POST, endpoint).await.json(body);
        self.send(request, endpoint).await
    }

    /// PUT a JSON body (partial update).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::get`].
    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::PUT, endpoint).await.json(body);
        self.send(request, endpoint).await
    }

    /// PATCH a JSON body.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::get`].
    pub async fn patch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::PATCH, endpoint).await.json(body);
        self.send(request, endpoint).await
    }

    /// DELETE, returning `None` on 204 (no body parse attempted).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::get`].
    pub async fn delete(&self, endpoint: &str) -> Result<Option<Value>, ApiError> {
        let request = self.request(Method::DELETE, endpoint).await;
        let response = request.send().await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(self.status_error(response).await);
        }
        let body = response.json().await?;
        Ok(Some(body))
    }

    async fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{endpoint}", self.base_url);
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.auth.token().await {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!(endpoint, status = status.as_u16(), "request failed");
            return Err(self.status_error(response).await);
        }

        let body = response.json().await?;
        Ok(body)
    }

    async fn status_error(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            if let Some(handler) = &self.on_unauthorized {
                warn!("unauthorized response; firing logout handler");
                handler();
            }
        }
        let body = response.text().await.unwrap_or_default();
        ApiError::from_status(status.as_u16(), &body)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_unauthorized_handler", &self.on_unauthorized.is_some())
            .finish_non_exhaustive()
    }
}
