//! 资源操作：一个 API 操作一个方法
//!
//! 路径字符串与真实 Cloudflare v4 API 保持一致，不做任何改写。

use futures::FutureExt;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::paginate::collect_all_pages;
use crate::transport::{ApiRequest, Method};
use crate::types::{
    Account, CreateRecordRequest, Credentials, DnsRecord, DnsRecordType, RecordData,
    UpdateRecordRequest, Zone,
};

use super::wire::{RecordBody, WireRecord, WireZone};
use super::{CloudflareClient, MAX_PAGE_SIZE_RECORDS, MAX_PAGE_SIZE_ZONES};

/// 写记录前的本地校验：空字段与代理约束在发请求之前拦下。
fn validate_record_write(name: &str, proxied: bool, data: &RecordData) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "name".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if data.content().trim().is_empty() {
        return Err(ApiError::Validation {
            field: "content".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if proxied && !data.record_type().supports_proxy() {
        return Err(ApiError::Validation {
            field: "proxied".to_string(),
            reason: format!("{} records cannot be proxied", data.record_type()),
        });
    }
    Ok(())
}

/// 代理开启时 TTL 固定为 1（"自动"）
fn effective_ttl(ttl: u32, proxied: bool) -> u32 {
    if proxied { 1 } else { ttl }
}

fn body_value(body: &RecordBody) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Serialization {
        detail: e.to_string(),
    })
}

impl CloudflareClient {
    // ============ Credential / Account ============

    /// Verify the configured credentials against the API.
    ///
    /// Token credentials hit the token introspection endpoint; Global API
    /// Key credentials hit the user identity endpoint. The payload is
    /// discarded; success means the API accepted the credentials.
    ///
    /// # Errors
    ///
    /// [`ApiError::AuthenticationFailed`] for rejected credentials, or any
    /// transport/normalization error.
    pub async fn verify_credentials(&self) -> Result<()> {
        let path = match &self.credentials {
            Credentials::ApiToken { .. } => "/user/tokens/verify",
            Credentials::GlobalKey { .. } => "/user",
        };
        self.request_unit(ApiRequest::get(path)).await
    }

    /// List the accounts visible to the authenticated principal.
    ///
    /// 单页查询即可：一个主体能看到的账户数远小于一页。
    ///
    /// # Errors
    ///
    /// Any transport or normalization error.
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.request(ApiRequest::get(format!(
            "/accounts?page=1&per_page={MAX_PAGE_SIZE_ZONES}"
        )))
        .await
    }

    // ============ Zones ============

    /// List every zone visible to the credentials, aggregating all pages.
    ///
    /// When the client carries a default account id, the listing is
    /// filtered to that account via the `account.id` query parameter.
    ///
    /// # Errors
    ///
    /// Any page failure aborts the collection and is returned as-is.
    pub async fn list_zones(&self) -> Result<Vec<Zone>> {
        let account_filter = self
            .account_id
            .as_deref()
            .map(|id| format!("&account.id={id}"))
            .unwrap_or_default();

        let wire = collect_all_pages(MAX_PAGE_SIZE_ZONES, |page| {
            let account_filter = account_filter.clone();
            async move {
                self.request::<Vec<WireZone>>(ApiRequest::get(format!(
                    "/zones?page={}&per_page={}{account_filter}",
                    page.page, page.per_page
                )))
                .await
            }
            .boxed()
        })
        .await?;
        Ok(wire.into_iter().map(WireZone::into_zone).collect())
    }

    /// Fetch a single zone by id.
    ///
    /// # Errors
    ///
    /// Any transport or normalization error.
    pub async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        let wire: WireZone = self
            .request(ApiRequest::get(format!("/zones/{zone_id}")))
            .await?;
        Ok(wire.into_zone())
    }

    /// Add a zone to an account.
    ///
    /// `account_id` wins over the client's configured default; with
    /// neither, the API picks the principal's only account or rejects
    /// the request.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for an empty name, otherwise any API error
    /// (e.g., zone already exists on another account).
    pub async fn create_zone(&self, name: &str, account_id: Option<&str>) -> Result<Zone> {
        if name.trim().is_empty() {
            return Err(ApiError::Validation {
                field: "name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let account = account_id
            .map(str::to_string)
            .or_else(|| self.account_id.clone());

        let mut body = serde_json::json!({
            "name": name,
            "jump_start": true,
        });
        if let Some(id) = account {
            body["account"] = serde_json::json!({ "id": id });
        }

        let wire: WireZone = self.request(ApiRequest::post("/zones", body)).await?;
        Ok(wire.into_zone())
    }

    /// Delete a zone.
    ///
    /// # Errors
    ///
    /// Any transport or normalization error.
    pub async fn delete_zone(&self, zone_id: &str) -> Result<()> {
        self.request_unit(ApiRequest::delete(format!("/zones/{zone_id}")))
            .await
    }

    /// The Cloudflare name servers assigned to a zone, in API order.
    ///
    /// # Errors
    ///
    /// Any transport or normalization error.
    pub async fn zone_name_servers(&self, zone_id: &str) -> Result<Vec<String>> {
        Ok(self.get_zone(zone_id).await?.name_servers)
    }

    // ============ DNS records ============

    /// List every DNS record in a zone, aggregating all pages.
    ///
    /// # Errors
    ///
    /// Any page failure aborts the collection; a record of an unsupported
    /// type fails the conversion.
    pub async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let wire = collect_all_pages(MAX_PAGE_SIZE_RECORDS, |page| {
            async move {
                self.request::<Vec<WireRecord>>(ApiRequest::get(format!(
                    "/zones/{zone_id}/dns_records?page={}&per_page={}",
                    page.page, page.per_page
                )))
                .await
            }
            .boxed()
        })
        .await?;
        wire.into_iter().map(WireRecord::into_record).collect()
    }

    /// Fetch a single DNS record by id.
    ///
    /// # Errors
    ///
    /// Any transport or normalization error.
    pub async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        let wire: WireRecord = self
            .request(ApiRequest::get(format!(
                "/zones/{zone_id}/dns_records/{record_id}"
            )))
            .await?;
        wire.into_record()
    }

    /// Create a DNS record in a zone.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] before any network write for an empty
    /// name/content or a proxy flag on a non-proxyable type; otherwise
    /// any API error.
    pub async fn create_record(
        &self,
        zone_id: &str,
        req: &CreateRecordRequest,
    ) -> Result<DnsRecord> {
        validate_record_write(&req.name, req.proxied, &req.data)?;
        let ttl = effective_ttl(req.ttl, req.proxied);
        let body = RecordBody::build(&req.name, ttl, req.proxied, &req.data)?;

        let wire: WireRecord = self
            .request(ApiRequest::post(
                format!("/zones/{zone_id}/dns_records"),
                body_value(&body)?,
            ))
            .await?;
        wire.into_record()
    }

    /// Replace a DNS record wholesale (PUT).
    ///
    /// # Errors
    ///
    /// Same validation as [`create_record`](Self::create_record).
    pub async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        req: &UpdateRecordRequest,
    ) -> Result<DnsRecord> {
        validate_record_write(&req.name, req.proxied, &req.data)?;
        let ttl = effective_ttl(req.ttl, req.proxied);
        let body = RecordBody::build(&req.name, ttl, req.proxied, &req.data)?;

        let wire: WireRecord = self
            .request(ApiRequest {
                method: Method::Put,
                path: format!("/zones/{zone_id}/dns_records/{record_id}"),
                body: Some(body_value(&body)?),
            })
            .await?;
        wire.into_record()
    }

    /// Patch a DNS record with a full body (PATCH).
    ///
    /// Cloudflare 的 PATCH 并非稀疏更新：缺失的字段可能被清空，
    /// 所以这里依旧提交完整记录体。
    ///
    /// # Errors
    ///
    /// Same validation as [`create_record`](Self::create_record).
    pub async fn patch_record(
        &self,
        zone_id: &str,
        record_id: &str,
        req: &UpdateRecordRequest,
    ) -> Result<DnsRecord> {
        validate_record_write(&req.name, req.proxied, &req.data)?;
        let ttl = effective_ttl(req.ttl, req.proxied);
        let body = RecordBody::build(&req.name, ttl, req.proxied, &req.data)?;

        let wire: WireRecord = self
            .request(ApiRequest::patch(
                format!("/zones/{zone_id}/dns_records/{record_id}"),
                body_value(&body)?,
            ))
            .await?;
        wire.into_record()
    }

    /// Delete a DNS record.
    ///
    /// # Errors
    ///
    /// Any transport or normalization error.
    pub async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.request_unit(ApiRequest::delete(format!(
            "/zones/{zone_id}/dns_records/{record_id}"
        )))
        .await
    }

    /// Toggle a record's proxy state, read-modify-write.
    ///
    /// Fetches the current record first so the full body can be
    /// re-submitted with only `proxied` changed. Only A and AAAA records
    /// are accepted here; enabling the proxy forces `ttl=1`, disabling it
    /// keeps the existing TTL.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] without any write when the record type is
    /// not A/AAAA; otherwise any API error from the read or the write.
    pub async fn set_record_proxied(
        &self,
        zone_id: &str,
        record_id: &str,
        proxied: bool,
    ) -> Result<DnsRecord> {
        let current = self.get_record(zone_id, record_id).await?;

        let record_type = current.data.record_type();
        if !matches!(record_type, DnsRecordType::A | DnsRecordType::Aaaa) {
            return Err(ApiError::Validation {
                field: "proxied".to_string(),
                reason: format!("{record_type} records cannot be proxied"),
            });
        }

        let ttl = if proxied { 1 } else { current.ttl };
        let body = RecordBody::build(&current.name, ttl, proxied, &current.data)?;

        let wire: WireRecord = self
            .request(ApiRequest::patch(
                format!("/zones/{zone_id}/dns_records/{record_id}"),
                body_value(&body)?,
            ))
            .await?;
        wire.into_record()
    }
}
