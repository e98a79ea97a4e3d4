//! HTTP 传输层
//!
//! [`Transport`] 把「发请求、收状态码和响应体」与上层的信封解析解耦，
//! 测试时可以用内存实现替换真实 HTTP 客户端。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ApiError;
use crate::types::Credentials;
use crate::utils::log_sanitizer::truncate_for_log;

/// Cloudflare API v4 base URL.
pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============ Request / Response ============

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API request, expressed relative to [`CF_API_BASE`].
///
/// The body is pre-serialized JSON so the transport trait stays
/// object-safe.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path plus query string, starting with `/` (e.g., `"/zones?page=1"`).
    pub path: String,
    /// JSON request body, when the method carries one.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn patch(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Patch,
            path: path.into(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Raw HTTP response, before any envelope interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text, possibly empty.
    pub body: String,
}

/// A failure below the HTTP layer: the request never produced a status
/// code and a body.
#[derive(Debug, Clone)]
pub enum TransportFailure {
    /// The request exceeded the configured timeout.
    Timeout(String),
    /// TCP/TLS connection could not be established.
    ConnectionFailed(String),
    /// Any other I/O failure (DNS, body read, protocol errors).
    Other(String),
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout(detail) => write!(f, "Request timeout: {detail}"),
            Self::ConnectionFailed(detail) => write!(f, "Connection failed: {detail}"),
            Self::Other(detail) => write!(f, "Network error: {detail}"),
        }
    }
}

impl From<TransportFailure> for ApiError {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::Timeout(detail) => Self::Timeout { detail },
            TransportFailure::ConnectionFailed(detail) => Self::ConnectionFailed { detail },
            TransportFailure::Other(detail) => Self::Network { detail },
        }
    }
}

// ============ Transport trait ============

/// Sends one [`ApiRequest`] and returns the raw status and body.
///
/// Implementations attach the auth headers derived from [`Credentials`]
/// but never interpret status codes or the response envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request against the API.
    ///
    /// # Errors
    ///
    /// Returns [`TransportFailure`] only when no HTTP response was
    /// obtained at all; every received status code is an `Ok`.
    async fn send(
        &self,
        credentials: &Credentials,
        request: &ApiRequest,
    ) -> Result<RawResponse, TransportFailure>;
}

// ============ HTTP implementation ============

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// 创建带超时配置的 HTTP 传输层
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        credentials: &Credentials,
        request: &ApiRequest,
    ) -> Result<RawResponse, TransportFailure> {
        let url = format!("{CF_API_BASE}{}", request.path);
        log::debug!("{} {url}", request.method);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };

        builder = match credentials {
            Credentials::ApiToken { token } => {
                builder.header("Authorization", format!("Bearer {token}"))
            }
            Credentials::GlobalKey { email, key } => builder
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", key),
        };

        if let Some(body) = &request.body {
            log::debug!(
                "Request Body: {}",
                truncate_for_log(&body.to_string())
            );
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportFailure::Timeout(e.to_string())
            } else if e.is_connect() {
                TransportFailure::ConnectionFailed(e.to_string())
            } else {
                TransportFailure::Other(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| TransportFailure::Other(format!("Failed to read response body: {e}")))?;

        log::debug!("Response Body: {}", truncate_for_log(&body));

        Ok(RawResponse { status, body })
    }
}
