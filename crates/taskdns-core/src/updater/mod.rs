//! Task DNS updater
//!
//! The TaskDnsUpdater turns one task state change into at most one DNS
//! upsert:
//!
//! ```text
//! TaskStateChange
//!       │
//!       ▼
//! ┌──────────────┐  cluster tags   ┌──────────────────┐
//! │ TagSource    │───────────────▶ │                  │
//! └──────────────┘                 │                  │
//! ┌──────────────────┐ public ip   │  TaskDnsUpdater  │── ChangeBatch ──▶ DnsProvider
//! │ InterfaceResolver│───────────▶ │                  │
//! └──────────────────┘             └──────────────────┘
//! ```
//!
//! ## Flow
//!
//! 1. Parse the cluster name from the cluster ARN
//! 2. Fetch the cluster tags; skip if the domain or hosted zone tag is missing
//! 3. Find the task's network interface; skip if there is none
//! 4. Resolve the interface's public address
//! 5. Build `<service>.<domain>` and upsert its A record
//!
//! The steps run strictly in sequence. A skip is a successful no-op; any
//! failure is returned as-is and no later step runs.

use crate::config::UpdaterConfig;
use crate::error::Result;
use crate::event::TaskStateChange;
use crate::traits::{
    ChangeBatch, ChangeResult, ClusterTags, DnsProvider, InterfaceResolver, RecordChange,
    TagSource,
};
use serde::Serialize;
use std::net::Ipv4Addr;
use tracing::{debug, info, warn};

/// Why an event was handled without touching DNS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The cluster lacks the domain and/or hosted zone tag
    MissingClusterTags,
    /// The task has no elastic network interface id
    MissingNetworkInterface,
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// Nothing to publish for this task
    Skipped { reason: SkipReason },

    /// The A record was submitted
    Upserted {
        record_name: String,
        ip: Ipv4Addr,
        hosted_zone_id: String,
        change: ChangeResult,
    },
}

/// Publishes a task's public address under its service name
///
/// The updater holds no per-invocation state. It can be built once and
/// reused for every event the function receives.
pub struct TaskDnsUpdater {
    tag_source: Box<dyn TagSource>,
    resolver: Box<dyn InterfaceResolver>,
    provider: Box<dyn DnsProvider>,
    config: UpdaterConfig,
}

impl TaskDnsUpdater {
    /// Create a new updater
    ///
    /// # Returns
    ///
    /// - `Err(Error)`: If the configuration is invalid
    pub fn new(
        tag_source: Box<dyn TagSource>,
        resolver: Box<dyn InterfaceResolver>,
        provider: Box<dyn DnsProvider>,
        config: UpdaterConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            tag_source,
            resolver,
            provider,
            config,
        })
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Handle one task state change
    pub async fn handle(&self, event: &TaskStateChange) -> Result<UpdateOutcome> {
        let task = &event.detail;
        info!("clusterArn: {}", task.cluster_arn);

        let cluster_name = task.cluster_name()?;

        let tags = ClusterTags::from_tags(self.tag_source.cluster_tags(&task.cluster_arn).await?);
        debug!(
            "Fetched {} tag(s) from {} for {}",
            tags.len(),
            self.tag_source.source_name(),
            task.cluster_arn
        );

        let domain = tags.get(&self.config.domain_tag);
        let hosted_zone_id = tags.get(&self.config.hosted_zone_tag);
        info!(
            "cluster: {}, domain: {:?}, hostedZone: {:?}",
            cluster_name, domain, hosted_zone_id
        );

        let (Some(domain), Some(hosted_zone_id)) = (domain, hosted_zone_id) else {
            warn!(
                "Skipping. Reason: no \"{}\" and/or \"{}\" tags found for cluster {}",
                self.config.domain_tag, self.config.hosted_zone_tag, task.cluster_arn
            );
            return Ok(UpdateOutcome::Skipped {
                reason: SkipReason::MissingClusterTags,
            });
        };

        let Some(eni_id) = task.network_interface_id() else {
            warn!("Network interface not found for task {:?}", task.task_arn);
            return Ok(UpdateOutcome::Skipped {
                reason: SkipReason::MissingNetworkInterface,
            });
        };
        debug!(
            "Network interface: {} (resolving via {})",
            eni_id,
            self.resolver.resolver_name()
        );

        let ip = self.resolver.public_ip(eni_id).await?;
        let service_name = task.service_name()?;
        info!("task: {} public-ip: {}", service_name, ip);

        let record_name = format!("{}.{}", service_name, domain);
        let batch = ChangeBatch::single(
            format!("Auto generated Record for ECS Fargate cluster {}", cluster_name),
            RecordChange::upsert_a(&record_name, self.config.record_ttl, ip),
        );

        let change = self.provider.submit(hosted_zone_id, &batch).await?;
        info!(
            "DNS record update finished for {} ({}) via {}: change {} is {}",
            record_name,
            ip,
            self.provider.provider_name(),
            change.id,
            change.status
        );

        Ok(UpdateOutcome::Upserted {
            record_name,
            ip,
            hosted_zone_id: hosted_zone_id.to_string(),
            change,
        })
    }
}
