//! 批量操作编排
//!
//! 严格按输入顺序逐项执行，单项失败只记录结果、不中断批次。
//! 编辑批次先在本地快照上规划出写请求，再逐项提交。

use crate::CloudflareClient;
use crate::types::{
    BatchAddItem, BatchEdit, BatchOutcome, BatchReport, CreateRecordRequest, DnsRecord, RecordData,
    UpdateRecordRequest,
};

/// 用新内容重建记录数据，保留类型专有字段
fn replace_content(data: &RecordData, new_content: String) -> RecordData {
    match data {
        RecordData::A { .. } => RecordData::A {
            address: new_content,
        },
        RecordData::AAAA { .. } => RecordData::AAAA {
            address: new_content,
        },
        RecordData::CNAME { .. } => RecordData::CNAME {
            target: new_content,
        },
        RecordData::MX { priority, .. } => RecordData::MX {
            priority: *priority,
            exchange: new_content,
        },
        RecordData::TXT { .. } => RecordData::TXT { text: new_content },
        RecordData::NS { .. } => RecordData::NS {
            nameserver: new_content,
        },
        RecordData::SRV {
            priority,
            weight,
            port,
            service,
            proto,
            ..
        } => RecordData::SRV {
            priority: *priority,
            weight: *weight,
            port: *port,
            target: new_content,
            service: service.clone(),
            proto: proto.clone(),
        },
        RecordData::CAA { flags, tag, .. } => RecordData::CAA {
            flags: *flags,
            tag: tag.clone(),
            value: new_content,
        },
    }
}

/// 编辑规划结果：跳过（带原因）或提交一个完整写请求
#[derive(Debug)]
enum EditPlan {
    Skip(String),
    Write(UpdateRecordRequest),
}

/// 在本地快照上决定一条记录的编辑动作，不做任何网络调用。
fn plan_edit(record: &DnsRecord, edit: &BatchEdit) -> EditPlan {
    if edit.is_empty() {
        return EditPlan::Skip("no changes requested".to_string());
    }

    let mut ttl = record.ttl;
    let mut proxied = record.proxied;
    let mut data = record.data.clone();
    let mut changed = false;

    if let Some(new_ttl) = edit.ttl {
        ttl = new_ttl;
        changed = true;
    }

    if let Some(new_proxied) = edit.proxied {
        let record_type = record.data.record_type();
        if !record_type.supports_proxy() {
            return EditPlan::Skip(format!("proxy not supported for {record_type} records"));
        }
        proxied = new_proxied;
        changed = true;
    }

    if let Some(replace) = &edit.replace {
        let content = data.content();
        if content.contains(&replace.find) {
            let new_content = content.replace(&replace.find, &replace.replace_with);
            data = replace_content(&data, new_content);
            changed = true;
        }
    }

    if !changed {
        return EditPlan::Skip("no change".to_string());
    }

    // 代理开启后 TTL 固定为 "自动"
    if proxied {
        ttl = 1;
    }

    EditPlan::Write(UpdateRecordRequest {
        name: record.name.clone(),
        ttl,
        proxied,
        data,
    })
}

/// Add a list of zones one by one, collecting per-item outcomes.
///
/// `account_id` applies to every zone in the run and wins over the
/// client's configured default. Successful outcomes carry the name
/// servers Cloudflare assigned to the new zone, ready for rendering;
/// a failed zone (already taken, invalid name) never stops the rest.
pub async fn run_batch_add_zones(
    client: &CloudflareClient,
    names: &[String],
    account_id: Option<&str>,
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(names.len());

    for (index, name) in names.iter().enumerate() {
        let outcome = match client.create_zone(name, account_id).await {
            Ok(zone) => {
                let message = if zone.name_servers.is_empty() {
                    format!("{}: created", zone.name)
                } else {
                    format!(
                        "{}: created, name servers: {}",
                        zone.name,
                        zone.name_servers.join(", ")
                    )
                };
                BatchOutcome::succeeded(index, message)
            }
            Err(e) => BatchOutcome::failed(index, format!("{name}: {e}")),
        };
        outcomes.push(outcome);
    }

    let report = BatchReport::from_outcomes(outcomes);
    log::info!(
        "Batch zone add finished: {} ok, {} failed",
        report.succeeded,
        report.failed
    );
    report
}

/// Create a list of DNS records one by one, collecting per-item outcomes.
///
/// Items are submitted strictly in input order; a failed item never stops
/// the rest of the batch. Validation failures (empty name/content, proxy
/// on an unsupported type) surface as failed outcomes without a write.
pub async fn run_batch_add(
    client: &CloudflareClient,
    zone_id: &str,
    items: &[BatchAddItem],
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let req = CreateRecordRequest {
            name: item.name.clone(),
            ttl: item.ttl,
            proxied: item.proxied,
            data: item.data.clone(),
        };

        let outcome = match client.create_record(zone_id, &req).await {
            Ok(record) => BatchOutcome::succeeded(index, format!("{}: created", record.name)),
            Err(e) => BatchOutcome::failed(index, format!("{}: {e}", item.name)),
        };
        outcomes.push(outcome);
    }

    let report = BatchReport::from_outcomes(outcomes);
    log::info!(
        "Batch add finished: {} ok, {} failed, {} skipped",
        report.succeeded,
        report.failed,
        report.skipped
    );
    report
}

/// Apply one [`BatchEdit`] to a snapshot of records, one PATCH per record.
///
/// Each record's write request is planned from the caller's snapshot, not
/// re-fetched; records the edit does not change come back as skipped
/// outcomes. Execution is strictly sequential and never aborts early.
pub async fn run_batch_edit(
    client: &CloudflareClient,
    zone_id: &str,
    records: &[DnsRecord],
    edit: &BatchEdit,
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let outcome = match plan_edit(record, edit) {
            EditPlan::Skip(reason) => {
                BatchOutcome::skipped(index, format!("{}: {reason}", record.name))
            }
            EditPlan::Write(req) => match client.patch_record(zone_id, &record.id, &req).await {
                Ok(updated) => {
                    BatchOutcome::succeeded(index, format!("{}: updated", updated.name))
                }
                Err(e) => BatchOutcome::failed(index, format!("{}: {e}", record.name)),
            },
        };
        outcomes.push(outcome);
    }

    let report = BatchReport::from_outcomes(outcomes);
    log::info!(
        "Batch edit finished: {} ok, {} failed, {} skipped",
        report.succeeded,
        report.failed,
        report.skipped
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentReplace;

    fn record(data: RecordData, ttl: u32, proxied: bool) -> DnsRecord {
        DnsRecord {
            id: "r1".to_string(),
            zone_id: "z1".to_string(),
            name: "www.example.com".to_string(),
            ttl,
            proxied,
            data,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn empty_edit_skips() {
        let rec = record(
            RecordData::A {
                address: "192.0.2.1".to_string(),
            },
            300,
            false,
        );
        let plan = plan_edit(&rec, &BatchEdit::default());
        assert!(matches!(plan, EditPlan::Skip(reason) if reason.contains("no changes")));
    }

    #[test]
    fn ttl_override_applies() {
        let rec = record(
            RecordData::A {
                address: "192.0.2.1".to_string(),
            },
            300,
            false,
        );
        let edit = BatchEdit {
            ttl: Some(3600),
            ..Default::default()
        };
        let plan = plan_edit(&rec, &edit);
        assert!(matches!(plan, EditPlan::Write(req) if req.ttl == 3600 && !req.proxied));
    }

    #[test]
    fn proxy_override_on_txt_skips_whole_item() {
        let rec = record(
            RecordData::TXT {
                text: "v=spf1 -all".to_string(),
            },
            300,
            false,
        );
        let edit = BatchEdit {
            ttl: Some(60),
            proxied: Some(true),
            replace: None,
        };
        let plan = plan_edit(&rec, &edit);
        assert!(
            matches!(&plan, EditPlan::Skip(reason) if reason.contains("proxy not supported")),
            "unexpected plan: {plan:?}"
        );
    }

    #[test]
    fn proxy_enable_forces_automatic_ttl() {
        let rec = record(
            RecordData::A {
                address: "192.0.2.1".to_string(),
            },
            3600,
            false,
        );
        let edit = BatchEdit {
            proxied: Some(true),
            ..Default::default()
        };
        let plan = plan_edit(&rec, &edit);
        assert!(
            matches!(&plan, EditPlan::Write(req) if req.proxied && req.ttl == 1),
            "unexpected plan: {plan:?}"
        );
    }

    #[test]
    fn proxy_disable_keeps_existing_ttl() {
        let rec = record(
            RecordData::A {
                address: "192.0.2.1".to_string(),
            },
            1,
            true,
        );
        let edit = BatchEdit {
            proxied: Some(false),
            ..Default::default()
        };
        let plan = plan_edit(&rec, &edit);
        assert!(
            matches!(&plan, EditPlan::Write(req) if !req.proxied && req.ttl == 1),
            "unexpected plan: {plan:?}"
        );
    }

    #[test]
    fn replace_without_match_alone_is_no_change() {
        let rec = record(
            RecordData::CNAME {
                target: "origin.example.net".to_string(),
            },
            300,
            false,
        );
        let edit = BatchEdit {
            replace: Some(ContentReplace {
                find: "missing".to_string(),
                replace_with: "x".to_string(),
            }),
            ..Default::default()
        };
        let plan = plan_edit(&rec, &edit);
        assert!(matches!(plan, EditPlan::Skip(reason) if reason.contains("no change")));
    }

    #[test]
    fn replace_applies_and_preserves_type_fields() {
        let rec = record(
            RecordData::MX {
                priority: 10,
                exchange: "mail.old.example.com".to_string(),
            },
            300,
            false,
        );
        let edit = BatchEdit {
            replace: Some(ContentReplace {
                find: "old".to_string(),
                replace_with: "new".to_string(),
            }),
            ..Default::default()
        };
        let plan = plan_edit(&rec, &edit);
        let EditPlan::Write(req) = plan else {
            panic!("expected a write plan");
        };
        assert_eq!(
            req.data,
            RecordData::MX {
                priority: 10,
                exchange: "mail.new.example.com".to_string()
            }
        );
    }

    #[test]
    fn replace_without_match_still_writes_when_ttl_changes() {
        let rec = record(
            RecordData::A {
                address: "192.0.2.1".to_string(),
            },
            300,
            false,
        );
        let edit = BatchEdit {
            ttl: Some(120),
            replace: Some(ContentReplace {
                find: "missing".to_string(),
                replace_with: "x".to_string(),
            }),
            ..Default::default()
        };
        let plan = plan_edit(&rec, &edit);
        assert!(
            matches!(&plan, EditPlan::Write(req) if req.ttl == 120),
            "unexpected plan: {plan:?}"
        );
    }

    #[test]
    fn srv_replace_rewrites_target_only() {
        let data = RecordData::SRV {
            priority: 10,
            weight: 5,
            port: 443,
            target: "srv.old.example.com".to_string(),
            service: Some("_sip".to_string()),
            proto: Some("_tcp".to_string()),
        };
        let replaced = replace_content(&data, "srv.new.example.com".to_string());
        assert!(
            matches!(
                &replaced,
                RecordData::SRV { target, weight: 5, port: 443, .. }
                    if target == "srv.new.example.com"
            ),
            "unexpected data: {replaced:?}"
        );
    }
}
