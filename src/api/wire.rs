//! Cloudflare API 线上类型定义
//!
//! 响应信封与记录的原始 JSON 形状，以及与领域类型之间的双向转换。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::types::{DnsRecord, DnsRecordType, RecordData, Zone, ZoneStatus};

// ============ Response envelope ============

/// Cloudflare API 通用响应信封
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<EnvelopeError>>,
    #[allow(dead_code)]
    pub result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnvelopeError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct ResultInfo {
    pub page: u32,
    pub per_page: u32,
    pub total_count: u32,
}

// ============ Zone wire shape ============

/// Cloudflare Zone 结构
#[derive(Debug, Deserialize)]
pub(crate) struct WireZone {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub name_servers: Vec<String>,
}

impl WireZone {
    /// Cloudflare 状态：active, pending, initializing, moved
    pub fn into_zone(self) -> Zone {
        let status = match self.status.as_str() {
            "active" => ZoneStatus::Active,
            "pending" => ZoneStatus::Pending,
            "initializing" => ZoneStatus::Initializing,
            "moved" => ZoneStatus::Moved,
            _ => ZoneStatus::Unknown,
        };

        Zone {
            id: self.id,
            name: self.name,
            status,
            name_servers: self.name_servers,
        }
    }
}

// ============ DNS record wire shapes ============

/// Cloudflare DNS Record 结构（响应）
#[derive(Debug, Deserialize)]
pub(crate) struct WireRecord {
    pub id: String,
    pub zone_id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub priority: Option<u16>,
    pub proxied: Option<bool>,
    pub created_on: Option<String>,
    pub modified_on: Option<String>,
    /// SRV/CAA 等复杂记录类型的结构化数据
    pub data: Option<Value>,
}

/// SRV 记录的 data 字段
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireSrvData {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,
}

/// CAA 记录的 data 字段
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireCaaData {
    pub flags: u8,
    pub tag: String,
    pub value: String,
}

fn parse_timestamp(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

impl WireRecord {
    /// 将 Cloudflare 记录转换为 [`DnsRecord`]
    ///
    /// # Errors
    ///
    /// 记录类型不受支持，或 SRV/CAA 记录缺少结构化 `data` 字段时返回错误。
    pub fn into_record(self) -> Result<DnsRecord> {
        let record_type = DnsRecordType::parse(&self.record_type)?;

        let data = match record_type {
            DnsRecordType::A => RecordData::A {
                address: self.content,
            },
            DnsRecordType::Aaaa => RecordData::AAAA {
                address: self.content,
            },
            DnsRecordType::Cname => RecordData::CNAME {
                target: self.content,
            },
            DnsRecordType::Mx => RecordData::MX {
                priority: self.priority.unwrap_or(0),
                exchange: self.content,
            },
            DnsRecordType::Txt => RecordData::TXT { text: self.content },
            DnsRecordType::Ns => RecordData::NS {
                nameserver: self.content,
            },
            DnsRecordType::Srv => {
                let raw = self.data.ok_or_else(|| ApiError::Parse {
                    detail: "SRV record is missing its data field".to_string(),
                })?;
                let srv: WireSrvData =
                    serde_json::from_value(raw).map_err(|e| ApiError::Parse {
                        detail: format!("Invalid SRV data: {e}"),
                    })?;
                RecordData::SRV {
                    priority: srv.priority,
                    weight: srv.weight,
                    port: srv.port,
                    target: srv.target,
                    service: srv.service,
                    proto: srv.proto,
                }
            }
            DnsRecordType::Caa => {
                let raw = self.data.ok_or_else(|| ApiError::Parse {
                    detail: "CAA record is missing its data field".to_string(),
                })?;
                let caa: WireCaaData =
                    serde_json::from_value(raw).map_err(|e| ApiError::Parse {
                        detail: format!("Invalid CAA data: {e}"),
                    })?;
                RecordData::CAA {
                    flags: caa.flags,
                    tag: caa.tag,
                    value: caa.value,
                }
            }
        };

        Ok(DnsRecord {
            id: self.id,
            zone_id: self.zone_id,
            name: self.name,
            ttl: self.ttl,
            proxied: self.proxied.unwrap_or(false),
            data,
            created_at: parse_timestamp(self.created_on.as_ref()),
            updated_at: parse_timestamp(self.modified_on.as_ref()),
        })
    }
}

/// DNS 记录写请求体（创建 / 全量更新共用）
#[derive(Debug, Serialize)]
pub(crate) struct RecordBody {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RecordBody {
    /// 从领域字段构建请求体
    ///
    /// SRV/CAA 类型通过结构化 `data` 对象提交，其余类型使用 `content`。
    ///
    /// # Errors
    ///
    /// 结构化数据无法序列化时返回 [`ApiError::Serialization`]。
    pub fn build(name: &str, ttl: u32, proxied: bool, data: &RecordData) -> Result<Self> {
        let record_type = data.record_type();

        let structured = match data {
            RecordData::SRV {
                priority,
                weight,
                port,
                target,
                service,
                proto,
            } => Some(serde_json::to_value(WireSrvData {
                priority: *priority,
                weight: *weight,
                port: *port,
                target: target.clone(),
                service: service.clone(),
                proto: proto.clone(),
            })),
            RecordData::CAA { flags, tag, value } => Some(serde_json::to_value(WireCaaData {
                flags: *flags,
                tag: tag.clone(),
                value: value.clone(),
            })),
            _ => None,
        };

        let structured = match structured {
            Some(res) => Some(res.map_err(|e| ApiError::Serialization {
                detail: e.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            record_type: record_type.as_str().to_string(),
            name: name.to_string(),
            content: data.content().to_string(),
            ttl,
            proxied,
            priority: data.priority(),
            data: structured,
        })
    }
}
