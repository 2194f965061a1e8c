//! HTTP client for the point-of-sale backend.
//!
//! Thin typed wrapper over `reqwest`: base URL, optional bearer token, JSON
//! in and out. Server rejections are reduced to a single human-readable
//! message taken from the error payload when present, with a generic
//! fallback otherwise; a 401 is distinguished so the session layer can drop
//! the stored credential.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Fallback shown when the server gives no usable error message.
pub const GENERIC_ERROR_MESSAGE: &str = "the server could not complete the request";

/// Configuration for connecting to the backend API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `"http://localhost:3000"`.
    pub base_url: String,
}

/// Errors surfaced by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the credential. The caller should drop the
    /// session and send the user back to login.
    #[error("authentication failed")]
    Unauthorized,

    /// The server rejected the request with a human-readable message.
    #[error("{message}")]
    Server {
        /// HTTP status code of the rejection.
        status: u16,
        /// Message from the error payload, or the generic fallback.
        message: String,
    },
}

impl ApiError {
    /// Whether this error is the authentication-failure signal.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Shared JSON API client.
///
/// Cheap to clone; all clones share the same bearer token slot, so a login
/// performed through one handle is visible to every service built on it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
    bearer: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
            bearer: Arc::new(RwLock::new(None)),
        }
    }

    /// Replace the bearer token used on subsequent requests.
    pub fn set_bearer(&self, token: Option<String>) {
        *self
            .bearer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn bearer(&self) -> Option<String> {
        self.bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// `GET path` returning a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// `GET path?query` returning a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.get(self.url(path)).query(query))
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// `POST path` with a JSON body, returning a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// `POST path` with a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;

        check(response).await?;

        Ok(())
    }

    /// `PATCH path` with a JSON body, returning a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.patch(self.url(path)).json(body))
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// `DELETE path`, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await?;

        check(response).await?;

        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    let message = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());

    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}
