//! Backend API Client
//!
//! Every backend call goes through `ApiClient::authenticated_fetch`, which
//! fetches a bearer token from the same-origin session endpoint first.
//! Endpoint wrappers are organized by domain.

mod web;
mod action_items;
mod meetings;
mod deliverables;
mod updates;
mod metrics;
mod jerry;
mod research;
mod sample_projects;

#[cfg(test)]
mod tests;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::PortalConfig;
use crate::console;
use crate::models::User;

pub use web::WebTransport;
pub use action_items::action_items_path;
pub use updates::updates_path;

/// Same-origin session endpoints
pub const TOKEN_PATH: &str = "/api/auth/token";
pub const ME_PATH: &str = "/api/auth/me";

// ========================
// Errors
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No access token could be obtained
    Unauthenticated,
    Network(String),
    Status { status: u16, body: String },
    Decode(String),
}

impl ApiError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Status { status: 409, .. })
    }

    /// `detail` (or `error`) field of a JSON error body, else the raw body.
    fn server_message(body: &str) -> String {
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: Option<String>,
            error: Option<String>,
        }
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail.or(b.error))
            .unwrap_or_else(|| body.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthenticated => write!(f, "No access token available"),
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status { status, body } => {
                write!(f, "API returned {}: {}", status, Self::server_message(body))
            }
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// ========================
// Transport
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::Get, url: url.into(), headers: Vec::new(), body: None }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<R: DeserializeOwned>(&self) -> Result<R, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Non-2xx becomes `ApiError::Status`.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(ApiError::Status { status: self.status, body: self.body })
        }
    }
}

/// One HTTP round trip.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

// ========================
// Client
// ========================

/// Caller-side request options; headers here override the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { method: Method::Get, headers: Vec::new(), body: None }
    }
}

impl RequestOptions {
    pub fn json<B: Serialize>(method: Method, body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Self { method, headers: Vec::new(), body: Some(body) })
    }

    pub fn method(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
}

/// Client for the running page.
pub fn client() -> ApiClient<WebTransport> {
    ApiClient::new(WebTransport, &PortalConfig::from_env())
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: &PortalConfig) -> Self {
        Self { transport, base_url: config.api_base_url.clone() }
    }

    /// Bearer token from the session endpoint. Any failure means the user
    /// has no usable session.
    pub async fn access_token(&self) -> Result<String, ApiError> {
        let response = match self.transport.send(HttpRequest::get(TOKEN_PATH)).await {
            Ok(response) => response,
            Err(e) => {
                console::error(&format!("[API] Error fetching access token: {}", e));
                return Err(ApiError::Unauthenticated);
            }
        };
        if !response.is_ok() {
            console::error(&format!("[API] Failed to get access token: {}", response.status));
            return Err(ApiError::Unauthenticated);
        }
        response
            .json::<TokenResponse>()
            .ok()
            .and_then(|t| t.access_token)
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::Unauthenticated)
    }

    /// Issues `path` against the backend with the bearer token attached.
    /// The raw response is returned whatever its status.
    pub async fn authenticated_fetch(&self, path: &str, options: RequestOptions) -> Result<HttpResponse, ApiError> {
        let token = self.access_token().await?;

        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), format!("Bearer {}", token)),
        ];
        for (name, value) in options.headers {
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        let request = HttpRequest {
            method: options.method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body: options.body,
        };
        self.transport.send(request).await
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.authenticated_fetch(path, RequestOptions::default())
            .await?
            .error_for_status()?
            .json()
    }

    pub async fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.authenticated_fetch(path, RequestOptions::json(method, body)?)
            .await?
            .error_for_status()?
            .json()
    }

    /// Current user from the session cookie; 401 means signed out.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let response = self.transport.send(HttpRequest::get(ME_PATH)).await?;
        if response.status == 401 {
            return Err(ApiError::Unauthenticated);
        }
        response.error_for_status()?.json()
    }
}
