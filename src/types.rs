use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

// ============ Credentials ============

/// Type-safe credential container for the two Cloudflare auth schemes.
///
/// Selects the header set the transport attaches to every request, and the
/// endpoint [`verify_credentials`](crate::CloudflareClient::verify_credentials)
/// dispatches to. Immutable for the lifetime of a client.
///
/// # Serialization
///
/// Tagged with `"auth_type"` to match the account records the host
/// application persists:
///
/// ```json
/// { "auth_type": "global_key", "email": "me@example.com", "key": "..." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "auth_type")]
pub enum Credentials {
    /// Scoped API token, sent as `Authorization: Bearer <token>`.
    #[serde(rename = "token")]
    ApiToken {
        /// Cloudflare API token.
        token: String,
    },

    /// Account-wide Global API Key, sent as `X-Auth-Email` + `X-Auth-Key`.
    #[serde(rename = "global_key")]
    GlobalKey {
        /// Cloudflare account email.
        email: String,
        /// Global API Key.
        key: String,
    },
}

impl Credentials {
    /// Check that no credential field is empty or whitespace-only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let check = |field: &'static str, value: &str| {
            if value.trim().is_empty() {
                Err(ApiError::Validation {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                })
            } else {
                Ok(())
            }
        };

        match self {
            Self::ApiToken { token } => check("token", token),
            Self::GlobalKey { email, key } => {
                check("email", email)?;
                check("key", key)
            }
        }
    }
}

// ============ Pagination ============

/// Page cursor for a single paginated request.
///
/// Pages are 1-indexed. Advanced by the paginator, never retained after the
/// collection completes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
}

impl PageRequest {
    /// Cursor for the first page at the given page size.
    #[must_use]
    pub fn first(per_page: u32) -> Self {
        Self { page: 1, per_page }
    }

    /// Cursor for the page after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            page: self.page + 1,
            per_page: self.per_page,
        }
    }
}

// ============ Zone / Account Types ============

/// Activation status of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    /// Zone is active and resolving through Cloudflare.
    Active,
    /// Zone is waiting for its name servers to be switched over.
    Pending,
    /// Zone setup has not completed yet.
    Initializing,
    /// Zone's name servers were moved away from Cloudflare.
    Moved,
    /// Status string the API returned was not recognized.
    Unknown,
}

/// A DNS zone managed under a Cloudflare account.
///
/// Fetched fresh on every list call and replaced wholesale; the only stable
/// identity is the `id` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone identifier.
    pub id: String,
    /// Zone name (e.g., `"example.com"`).
    pub name: String,
    /// Current activation status.
    pub status: ZoneStatus,
    /// Cloudflare name servers assigned to this zone, in API order.
    pub name_servers: Vec<String>,
}

/// A Cloudflare account visible to the authenticated principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier.
    pub id: String,
    /// Human-readable account name.
    pub name: String,
}

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl DnsRecordType {
    /// Uppercase wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }

    /// Parse an uppercase wire string.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for record types this client does
    /// not model.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            "SRV" => Ok(Self::Srv),
            "CAA" => Ok(Self::Caa),
            _ => Err(ApiError::Validation {
                field: "type".to_string(),
                reason: format!("unsupported record type: {s}"),
            }),
        }
    }

    /// Whether Cloudflare allows proxying this record type at all.
    ///
    /// Only A, AAAA and CNAME records can be orange-clouded.
    #[must_use]
    pub fn supports_proxy(self) -> bool {
        matches!(self, Self::A | Self::Aaaa | Self::Cname)
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-safe representation of DNS record data.
///
/// Each variant carries only the fields applicable to that record type.
/// Use [`record_type()`](Self::record_type) for the discriminant and
/// [`content()`](Self::content) for the primary value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    /// A record — maps a hostname to an IPv4 address.
    A {
        /// IPv4 address (e.g., `"192.0.2.1"`).
        address: String,
    },

    /// AAAA record — maps a hostname to an IPv6 address.
    AAAA {
        /// IPv6 address (e.g., `"2001:db8::1"`).
        address: String,
    },

    /// CNAME record — alias from one name to another.
    CNAME {
        /// Target hostname.
        target: String,
    },

    /// MX record — mail exchange server.
    MX {
        /// Priority (lower = preferred).
        priority: u16,
        /// Mail server hostname.
        exchange: String,
    },

    /// TXT record — arbitrary text data.
    TXT {
        /// Text content.
        text: String,
    },

    /// NS record — authoritative name server.
    NS {
        /// Name server hostname.
        nameserver: String,
    },

    /// SRV record — service locator.
    SRV {
        /// Priority (lower = preferred).
        priority: u16,
        /// Weight for load balancing among same-priority targets.
        weight: u16,
        /// TCP/UDP port number.
        port: u16,
        /// Target hostname providing the service.
        target: String,
        /// Service label (e.g., `"_sip"`), when the API returns it.
        #[serde(skip_serializing_if = "Option::is_none")]
        service: Option<String>,
        /// Protocol label (e.g., `"_tcp"`), when the API returns it.
        #[serde(skip_serializing_if = "Option::is_none")]
        proto: Option<String>,
    },

    /// CAA record — Certificate Authority Authorization.
    CAA {
        /// Issuer critical flag (0 or 128).
        flags: u8,
        /// Property tag (`"issue"`, `"issuewild"`, or `"iodef"`).
        tag: String,
        /// CA domain or reporting URI.
        value: String,
    },
}

impl RecordData {
    /// Returns the [`DnsRecordType`] discriminant for this record data.
    #[must_use]
    pub fn record_type(&self) -> DnsRecordType {
        match self {
            Self::A { .. } => DnsRecordType::A,
            Self::AAAA { .. } => DnsRecordType::Aaaa,
            Self::CNAME { .. } => DnsRecordType::Cname,
            Self::MX { .. } => DnsRecordType::Mx,
            Self::TXT { .. } => DnsRecordType::Txt,
            Self::NS { .. } => DnsRecordType::Ns,
            Self::SRV { .. } => DnsRecordType::Srv,
            Self::CAA { .. } => DnsRecordType::Caa,
        }
    }

    /// The primary content value (the string that lands in the provider's
    /// `content` field).
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::A { address } | Self::AAAA { address } => address,
            Self::CNAME { target } | Self::SRV { target, .. } => target,
            Self::MX { exchange, .. } => exchange,
            Self::TXT { text } => text,
            Self::NS { nameserver } => nameserver,
            Self::CAA { value, .. } => value,
        }
    }

    /// Priority field, for the record types that carry one.
    #[must_use]
    pub fn priority(&self) -> Option<u16> {
        match self {
            Self::MX { priority, .. } | Self::SRV { priority, .. } => Some(*priority),
            _ => None,
        }
    }
}

/// A DNS record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Record identifier.
    pub id: String,
    /// Zone this record belongs to.
    pub zone_id: String,
    /// Full record name (e.g., `"www.example.com"`).
    pub name: String,
    /// Time to live in seconds; `1` means "automatic".
    pub ttl: u32,
    /// Whether traffic for this record is proxied through Cloudflare's edge.
    pub proxied: bool,
    /// Type-specific record data.
    pub data: RecordData,

    /// When the record was created, if known.
    #[serde(with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When the record was last updated, if known.
    #[serde(with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Request to create a new DNS record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// Record name (e.g., `"www"` or a full name).
    pub name: String,
    /// Time to live in seconds; `1` for "automatic".
    pub ttl: u32,
    /// Proxy traffic through Cloudflare's edge (A/AAAA/CNAME only).
    pub proxied: bool,
    /// Type-specific record data.
    pub data: RecordData,
}

/// Request to replace an existing DNS record.
///
/// Cloudflare's update endpoints expect the full record body; omitted
/// fields would be cleared, so callers hand over every field each time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    /// New record name.
    pub name: String,
    /// New TTL in seconds; `1` for "automatic".
    pub ttl: u32,
    /// New proxy state (A/AAAA/CNAME only).
    pub proxied: bool,
    /// New type-specific record data.
    pub data: RecordData,
}

// ============ Batch Operation Types ============

/// One row of a batch create run.
///
/// The item's position in the input slice is its index; outcomes come back
/// in the same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAddItem {
    /// Record name.
    pub name: String,
    /// TTL in seconds; `1` for "automatic".
    pub ttl: u32,
    /// Proxy through Cloudflare's edge.
    pub proxied: bool,
    /// Type-specific record data.
    pub data: RecordData,
}

/// Substring replacement applied to record content during a batch edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReplace {
    /// Substring to search for.
    pub find: String,
    /// Replacement text.
    pub replace_with: String,
}

/// The set of edits a batch edit run applies to every selected record.
///
/// Each field is an independent sub-operation; at least one must be set or
/// every item comes back as a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEdit {
    /// Override the TTL (seconds, `1` for "automatic").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Override the proxy state. Records of non-proxyable types are
    /// skipped with an "unsupported" outcome instead of failing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// Replace a substring in the record content. Records whose content
    /// does not contain the substring are left untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<ContentReplace>,
}

impl BatchEdit {
    /// Whether any sub-operation is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ttl.is_none() && self.proxied.is_none() && self.replace.is_none()
    }
}

/// Terminal state of one batch item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// The item was submitted and the API accepted it.
    Succeeded,
    /// Validation or the API rejected the item.
    Failed,
    /// The item required no write (or the edit does not apply to it).
    Skipped,
}

/// Outcome of one batch item, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// Index of the item in the original input slice.
    pub index: usize,
    /// Terminal state.
    pub status: BatchStatus,
    /// Human-readable description, ready for direct rendering.
    pub message: String,
}

impl BatchOutcome {
    pub(crate) fn succeeded(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            status: BatchStatus::Succeeded,
            message: message.into(),
        }
    }

    pub(crate) fn failed(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            status: BatchStatus::Failed,
            message: message.into(),
        }
    }

    pub(crate) fn skipped(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            status: BatchStatus::Skipped,
            message: message.into(),
        }
    }
}

/// Summary of a batch run.
///
/// `outcomes` always has the same length and order as the input;
/// `succeeded + failed + skipped == outcomes.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Number of items the API accepted.
    pub succeeded: usize,
    /// Number of items that failed validation or were rejected.
    pub failed: usize,
    /// Number of items that needed no write.
    pub skipped: usize,
    /// Per-item outcomes, in input order.
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    /// Fold a sequence of outcomes into a report.
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<BatchOutcome>) -> Self {
        let mut succeeded = 0;
        let mut failed = 0;
        let mut skipped = 0;
        for outcome in &outcomes {
            match outcome.status {
                BatchStatus::Succeeded => succeeded += 1,
                BatchStatus::Failed => failed += 1,
                BatchStatus::Skipped => skipped += 1,
            }
        }
        Self {
            succeeded,
            failed,
            skipped,
            outcomes,
        }
    }
}
