// # Route 53 DNS Provider
//
// This crate submits record changes through the Route 53
// `ChangeResourceRecordSets` API.
//
// ## Behavior
//
// - One API call per submitted batch
// - No retry, no backoff, no polling for INSYNC: the change is considered
//   done once Route 53 accepts it (status PENDING)
// - UPSERT semantics make resubmitting the same batch safe
// - Dry-run mode logs the batch that would be sent and makes no call
//
// ## API Reference
//
// - ChangeResourceRecordSets: https://docs.aws.amazon.com/Route53/latest/APIReference/API_ChangeResourceRecordSets.html

use async_trait::async_trait;
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types::{
    Change, ChangeAction as Route53Action, ChangeBatch as Route53Batch, ResourceRecord,
    ResourceRecordSet, RrType,
};
use taskdns_core::traits::{ChangeAction, ChangeBatch, ChangeResult, DnsProvider, RecordChange};
use taskdns_core::{Error, Result};

/// Change id reported for batches that were not sent
const DRY_RUN_CHANGE_ID: &str = "dry-run";

/// Route 53 DNS provider
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider logs the change batch at INFO level
/// and returns a `ChangeResult` with status `DRY_RUN` without calling
/// Route 53.
#[derive(Debug, Clone)]
pub struct Route53Provider {
    client: aws_sdk_route53::Client,
    dry_run: bool,
}

impl Route53Provider {
    /// Create a new Route 53 provider
    ///
    /// # Parameters
    ///
    /// - `client`: Route 53 client; Route 53 is global, any region works
    /// - `dry_run`: If true, log changes instead of submitting them
    pub fn new(client: aws_sdk_route53::Client, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    /// Create a provider that submits changes
    pub fn new_live(client: aws_sdk_route53::Client) -> Self {
        Self::new(client, false)
    }

    /// Create a provider that only logs changes
    pub fn new_dry_run(client: aws_sdk_route53::Client) -> Self {
        Self::new(client, true)
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

#[async_trait]
impl DnsProvider for Route53Provider {
    async fn submit(&self, hosted_zone_id: &str, batch: &ChangeBatch) -> Result<ChangeResult> {
        if self.dry_run {
            for change in &batch.changes {
                tracing::info!("[DRY-RUN] Would {}", describe_change(change));
            }
            let payload = serde_json::to_string(batch)?;
            tracing::info!(
                "[DRY-RUN] Would submit to hosted zone {}: {}",
                hosted_zone_id,
                payload
            );
            return Ok(ChangeResult {
                id: DRY_RUN_CHANGE_ID.to_string(),
                status: "DRY_RUN".to_string(),
            });
        }

        let request = build_change_batch(batch)?;
        tracing::debug!("Submitting {} change(s) to {}", batch.changes.len(), hosted_zone_id);

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(hosted_zone_id)
            .change_batch(request)
            .send()
            .await
            .map_err(|e| {
                Error::provider(
                    "route53",
                    format!("ChangeResourceRecordSets failed: {}", DisplayErrorContext(&e)),
                )
            })?;

        let info = output.change_info().ok_or_else(|| {
            Error::provider("route53", "Invalid response format: missing ChangeInfo")
        })?;

        tracing::info!(
            "updateResult: change {} is {} (submitted {:?})",
            info.id(),
            info.status().as_str(),
            info.submitted_at()
        );

        Ok(ChangeResult {
            id: info.id().to_string(),
            status: info.status().as_str().to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "route53"
    }
}

/// One-line summary of a change, e.g. `UPSERT svc1.x.com A 1.2.3.4 (ttl 180)`
fn describe_change(change: &RecordChange) -> String {
    format!(
        "{} {} {} {} (ttl {})",
        change.action.as_str(),
        change.name,
        change.record_type(),
        change.value,
        change.ttl
    )
}

/// Translate a core change batch into the Route 53 request shape
fn build_change_batch(batch: &ChangeBatch) -> Result<Route53Batch> {
    let changes = batch
        .changes
        .iter()
        .map(build_change)
        .collect::<Result<Vec<_>>>()?;

    Route53Batch::builder()
        .comment(&batch.comment)
        .set_changes(Some(changes))
        .build()
        .map_err(|e| Error::provider("route53", format!("Invalid change batch: {}", e)))
}

fn build_change(change: &RecordChange) -> Result<Change> {
    let action = match change.action {
        ChangeAction::Upsert => Route53Action::Upsert,
    };

    let record = ResourceRecord::builder()
        .value(change.value.to_string())
        .build()
        .map_err(|e| Error::provider("route53", format!("Invalid resource record: {}", e)))?;

    let record_set = ResourceRecordSet::builder()
        .name(&change.name)
        .r#type(RrType::A)
        .ttl(i64::from(change.ttl))
        .resource_records(record)
        .build()
        .map_err(|e| Error::provider("route53", format!("Invalid record set: {}", e)))?;

    Change::builder()
        .action(action)
        .resource_record_set(record_set)
        .build()
        .map_err(|e| Error::provider("route53", format!("Invalid change: {}", e)))
}
