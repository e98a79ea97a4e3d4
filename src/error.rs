use serde::{Deserialize, Serialize};

/// Unified error type for all client operations.
///
/// Errors are always returned as data — every operation yields a
/// [`Result`], and batch runs fold per-item errors into outcome messages
/// instead of propagating them. All variants are serializable for
/// structured error reporting.
///
/// The first three variants are transport-level failures (no response was
/// received); the next three are HTTP-status failures mapped before the
/// body is parsed; `Api` carries the provider's own error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "details")]
pub enum ApiError {
    /// The request timed out before a response arrived.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The connection could not be established (DNS failure, refused, etc.).
    ConnectionFailed {
        /// Error details.
        detail: String,
    },

    /// Any other transport-level error (TLS, malformed URL, body read).
    Network {
        /// Error details.
        detail: String,
    },

    /// HTTP 401 — the credentials were rejected.
    AuthenticationFailed {
        /// Original response body, if useful.
        raw_message: Option<String>,
    },

    /// HTTP 403 — the credentials lack permission for this operation.
    PermissionDenied {
        /// Original response body, if useful.
        raw_message: Option<String>,
    },

    /// HTTP 5xx — the remote service failed.
    ServerError {
        /// The HTTP status code.
        status: u16,
    },

    /// The provider answered `success: false`; first entry of its `errors`
    /// array, with the provider error code when present.
    Api {
        /// Human-readable provider message.
        message: String,
        /// Provider error code (e.g., 1003, 81057).
        code: Option<i64>,
    },

    /// Client-side validation failure — no request was sent.
    Validation {
        /// Name of the offending field.
        field: String,
        /// Description of what's wrong.
        reason: String,
    },

    /// The response body could not be parsed as the expected shape.
    Parse {
        /// Details about the parse failure.
        detail: String,
    },

    /// A request body could not be serialized.
    Serialization {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ApiError {
    /// Provider or HTTP error code carried by this error, if any.
    #[must_use]
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => *code,
            Self::ServerError { status } => Some(i64::from(*status)),
            _ => None,
        }
    }

    /// 是否为预期行为（用户输入、权限、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. }
                | Self::PermissionDenied { .. }
                | Self::Api { .. }
                | Self::Validation { .. }
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout { detail } => {
                write!(f, "Request timeout: {detail}")
            }
            Self::ConnectionFailed { detail } => {
                write!(f, "Connection failed: {detail}")
            }
            Self::Network { detail } => {
                write!(f, "Network error: {detail}")
            }
            Self::AuthenticationFailed { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Authentication failed: {msg}")
                } else {
                    write!(f, "Authentication failed, check the API credentials")
                }
            }
            Self::PermissionDenied { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Insufficient permission: {msg}")
                } else {
                    write!(f, "Insufficient permission for this operation")
                }
            }
            Self::ServerError { status } => {
                write!(f, "Cloudflare server error (HTTP {status})")
            }
            Self::Api { message, code } => {
                if let Some(code) = code {
                    write!(f, "{message} (code: {code})")
                } else {
                    write!(f, "{message}")
                }
            }
            Self::Validation { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            Self::Parse { detail } => {
                write!(f, "Parse error: {detail}")
            }
            Self::Serialization { detail } => {
                write!(f, "Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_timeout() {
        let e = ApiError::Timeout {
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(e.to_string(), "Request timeout: 30s elapsed");
    }

    #[test]
    fn display_connection_failed() {
        let e = ApiError::ConnectionFailed {
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "Connection failed: connection refused");
    }

    #[test]
    fn display_authentication_failed_without_message() {
        let e = ApiError::AuthenticationFailed { raw_message: None };
        assert_eq!(
            e.to_string(),
            "Authentication failed, check the API credentials"
        );
    }

    #[test]
    fn display_permission_denied_with_message() {
        let e = ApiError::PermissionDenied {
            raw_message: Some("zone is read-only".to_string()),
        };
        assert_eq!(e.to_string(), "Insufficient permission: zone is read-only");
    }

    #[test]
    fn display_server_error() {
        let e = ApiError::ServerError { status: 502 };
        assert_eq!(e.to_string(), "Cloudflare server error (HTTP 502)");
    }

    #[test]
    fn display_api_with_code() {
        let e = ApiError::Api {
            message: "Record already exists".to_string(),
            code: Some(81057),
        };
        assert_eq!(e.to_string(), "Record already exists (code: 81057)");
    }

    #[test]
    fn display_api_without_code() {
        let e = ApiError::Api {
            message: "Request failed".to_string(),
            code: None,
        };
        assert_eq!(e.to_string(), "Request failed");
    }

    #[test]
    fn display_validation() {
        let e = ApiError::Validation {
            field: "content".to_string(),
            reason: "must not be empty".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid content: must not be empty");
    }

    #[test]
    fn code_accessor() {
        let e = ApiError::Api {
            message: "m".to_string(),
            code: Some(1003),
        };
        assert_eq!(e.code(), Some(1003));

        let e = ApiError::ServerError { status: 500 };
        assert_eq!(e.code(), Some(500));

        let e = ApiError::Timeout {
            detail: "x".to_string(),
        };
        assert_eq!(e.code(), None);
    }

    #[test]
    fn is_expected_variants() {
        assert!(
            ApiError::Validation {
                field: "ttl".into(),
                reason: "bad".into(),
            }
            .is_expected()
        );
        assert!(ApiError::AuthenticationFailed { raw_message: None }.is_expected());
        assert!(
            !ApiError::Timeout {
                detail: "x".into(),
            }
            .is_expected()
        );
        assert!(!ApiError::ServerError { status: 500 }.is_expected());
    }

    #[test]
    fn serialize_json_round_trip() {
        let e = ApiError::Api {
            message: "DNS Validation Error".to_string(),
            code: Some(1004),
        };
        let json_res = serde_json::to_string(&e);
        assert!(json_res.is_ok(), "expected Ok(..), got {json_res:?}");
        let Ok(json) = json_res else {
            return;
        };
        assert!(json.contains("\"kind\":\"Api\""));

        let back_res: serde_json::Result<ApiError> = serde_json::from_str(&json);
        assert!(back_res.is_ok(), "expected Ok(..), got {back_res:?}");
        let Ok(back) = back_res else {
            return;
        };
        assert_eq!(back.to_string(), e.to_string());
    }
}
