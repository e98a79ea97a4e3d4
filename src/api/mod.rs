//! Cloudflare API 客户端
//!
//! [`CloudflareClient`] 组合传输层与响应规范化，按「一个 API 操作一个方法」
//! 暴露资源操作。所有方法都是无状态的：不缓存任何服务端数据。

use std::sync::Arc;

use crate::error::Result;
use crate::transport::{HttpTransport, Transport};
use crate::types::Credentials;

mod http;
mod ops;
pub(crate) mod wire;

/// Cloudflare zones API 最大 per_page
pub const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// Cloudflare dns_records API 最大 per_page
pub const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// Cloudflare v4 API client.
///
/// Holds immutable credentials and an optional default account id used by
/// [`create_zone`](Self::create_zone) when the caller does not name one.
/// Cheap to clone; the underlying transport is shared.
#[derive(Clone)]
pub struct CloudflareClient {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    account_id: Option<String>,
}

impl CloudflareClient {
    /// Create a client over the real HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`](crate::ApiError::Validation) when a
    /// credential field is empty.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_transport(Arc::new(HttpTransport::new()), credentials)
    }

    /// Create a client over a caller-supplied transport.
    ///
    /// 测试时注入内存传输层用。
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`](crate::ApiError::Validation) when a
    /// credential field is empty.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
    ) -> Result<Self> {
        credentials.validate()?;
        Ok(Self {
            transport,
            credentials,
            account_id: None,
        })
    }

    /// Set the default account id for zone creation.
    #[must_use]
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// The default account id, if one was configured.
    #[must_use]
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }
}

impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials stay out of Debug output.
        f.debug_struct("CloudflareClient")
            .field("account_id", &self.account_id)
            .finish_non_exhaustive()
    }
}
