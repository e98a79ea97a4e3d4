//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cfzone::{
    ApiRequest, CloudflareClient, Credentials, Method, RawResponse, Transport, TransportFailure,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

// ============ Recording mock transport ============

/// 记录下来的一次请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// 内存传输层：按脚本顺序吐出响应，并记录收到的每个请求。
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportFailure>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// 预置一个成功的 HTTP 响应
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(Ok(RawResponse {
                status,
                body: body.into(),
            }));
        }
    }

    /// 预置一个传输层失败
    pub fn push_failure(&self, failure: TransportFailure) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(Err(failure));
        }
    }

    /// 已记录的所有请求，按发送顺序
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|reqs| reqs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        _credentials: &Credentials,
        request: &ApiRequest,
    ) -> Result<RawResponse, TransportFailure> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                method: request.method,
                path: request.path.clone(),
                body: request.body.clone(),
            });
        }

        self.responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front())
            .unwrap_or_else(|| {
                Err(TransportFailure::Other(
                    "no scripted response left".to_string(),
                ))
            })
    }
}

// ============ Client / body builders ============

/// Token 凭证客户端，挂在给定 mock 上
pub fn token_client(transport: Arc<MockTransport>) -> Option<CloudflareClient> {
    CloudflareClient::with_transport(
        transport,
        Credentials::ApiToken {
            token: "test-token".to_string(),
        },
    )
    .ok()
}

/// Global API Key 凭证客户端
pub fn global_key_client(transport: Arc<MockTransport>) -> Option<CloudflareClient> {
    CloudflareClient::with_transport(
        transport,
        Credentials::GlobalKey {
            email: "me@example.com".to_string(),
            key: "test-key".to_string(),
        },
    )
    .ok()
}

/// 成功信封
pub fn success_body(result: serde_json::Value) -> String {
    serde_json::json!({
        "success": true,
        "errors": [],
        "result": result,
    })
    .to_string()
}

/// 失败信封（带单个错误）
pub fn error_body(code: i64, message: &str) -> String {
    serde_json::json!({
        "success": false,
        "errors": [{ "code": code, "message": message }],
        "result": null,
    })
    .to_string()
}

/// 构造一个 zone 的 JSON 对象
pub fn zone_json(id: &str, name: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "status": status,
        "name_servers": ["ns1.cloudflare.com", "ns2.cloudflare.com"],
    })
}

/// 构造一条 A 记录的 JSON 对象
pub fn a_record_json(id: &str, name: &str, address: &str, ttl: u32, proxied: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "zone_id": "zone-1",
        "type": "A",
        "name": name,
        "content": address,
        "ttl": ttl,
        "proxied": proxied,
        "created_on": "2024-05-01T12:00:00Z",
        "modified_on": "2024-05-01T12:00:00Z",
    })
}

/// 构造一条 TXT 记录的 JSON 对象
pub fn txt_record_json(id: &str, name: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "zone_id": "zone-1",
        "type": "TXT",
        "name": name,
        "content": text,
        "ttl": 300,
        "proxied": false,
    })
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}
