//! 响应规范化与底层请求方法
//!
//! 状态码判定在 JSON 解析之前：401/403/5xx 直接映射为对应错误，
//! 其余状态码交给响应信封决定成败。

use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::transport::{ApiRequest, RawResponse};
use crate::utils::log_sanitizer::truncate_for_log;

use super::CloudflareClient;
use super::wire::ApiEnvelope;

/// 状态码判定 + 信封解析 + success 判定，不关心 result 是否存在
fn parse_envelope<T: DeserializeOwned>(response: &RawResponse) -> Result<ApiEnvelope<T>> {
    let raw_message = || {
        if response.body.trim().is_empty() {
            None
        } else {
            Some(truncate_for_log(&response.body))
        }
    };

    match response.status {
        403 => {
            return Err(ApiError::PermissionDenied {
                raw_message: raw_message(),
            });
        }
        401 => {
            return Err(ApiError::AuthenticationFailed {
                raw_message: raw_message(),
            });
        }
        status if status >= 500 => {
            return Err(ApiError::ServerError { status });
        }
        _ => {}
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(&response.body).map_err(|e| {
        log::error!("JSON 解析失败: {e}");
        log::error!("原始响应: {}", truncate_for_log(&response.body));
        ApiError::Parse {
            detail: e.to_string(),
        }
    })?;

    if !envelope.success {
        let (message, code) = envelope
            .errors
            .as_deref()
            .and_then(<[_]>::first)
            .map_or_else(
                || ("Unknown error".to_string(), None),
                |e| (e.message.clone(), Some(e.code)),
            );
        return Err(ApiError::Api { message, code });
    }

    Ok(envelope)
}

/// 将原始 HTTP 响应规范化为领域结果（要求 result 字段存在）
pub(crate) fn normalize<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    parse_envelope::<T>(response)?
        .result
        .ok_or_else(|| ApiError::Parse {
            detail: "Missing result field in response".to_string(),
        })
}

/// 规范化只关心成败的响应：`success: true` 即成功，`result` 可为 null。
///
/// 部分写操作（删除、凭证校验）的成功响应里 result 就是 null。
pub(crate) fn normalize_unit(response: &RawResponse) -> Result<()> {
    parse_envelope::<serde_json::Value>(response).map(|_| ())
}

impl CloudflareClient {
    async fn send_raw(&self, request: &ApiRequest) -> Result<RawResponse> {
        self.transport
            .send(&self.credentials, request)
            .await
            .map_err(|failure| {
                log::error!("{} {}: {failure}", request.method, request.path);
                ApiError::from(failure)
            })
    }

    fn log_outcome(request: &ApiRequest, e: ApiError) -> ApiError {
        if e.is_expected() {
            log::warn!("{} {}: {e}", request.method, request.path);
        } else {
            log::error!("{} {}: {e}", request.method, request.path);
        }
        e
    }

    /// 发送请求并规范化响应
    pub(crate) async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let raw = self.send_raw(&request).await?;
        normalize(&raw).map_err(|e| Self::log_outcome(&request, e))
    }

    /// 发送请求，只关心成败（删除、凭证校验等操作用）
    pub(crate) async fn request_unit(&self, request: ApiRequest) -> Result<()> {
        let raw = self.send_raw(&request).await?;
        normalize_unit(&raw).map_err(|e| Self::log_outcome(&request, e))
    }
}
