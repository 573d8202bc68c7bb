// # DNS Provider Trait
//
// Defines the interface for submitting record changes to a hosted zone.
//
// ## Implementations
//
// - Route 53: `taskdns-provider-route53` crate
//
// ## Usage
//
// ```rust,ignore
// use taskdns_core::traits::{ChangeBatch, DnsProvider, RecordChange};
//
// let provider = /* DnsProvider implementation */;
// let batch = ChangeBatch::single(
//     "Auto generated Record for ECS Fargate cluster web",
//     RecordChange::upsert_a("api.example.com", 180, "203.0.113.7".parse()?),
// );
// let result = provider.submit("Z0123456789ABC", &batch).await?;
// ```

use async_trait::async_trait;
use serde::Serialize;
use std::net::Ipv4Addr;

/// Action applied to a record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create the record, or replace it if it exists
    Upsert,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Upsert => "UPSERT",
        }
    }
}

/// A change to a single A record holding one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordChange {
    pub action: ChangeAction,
    /// Fully qualified record name (e.g. "api.example.com")
    pub name: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// The address the record points to
    pub value: Ipv4Addr,
}

impl RecordChange {
    /// Upsert an A record
    pub fn upsert_a(name: impl Into<String>, ttl: u32, value: Ipv4Addr) -> Self {
        Self {
            action: ChangeAction::Upsert,
            name: name.into(),
            ttl,
            value,
        }
    }

    /// Record type written by this change
    pub fn record_type(&self) -> &'static str {
        "A"
    }
}

/// A set of record changes submitted together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeBatch {
    /// Human readable comment stored with the change
    pub comment: String,
    pub changes: Vec<RecordChange>,
}

impl ChangeBatch {
    /// A batch holding exactly one change
    pub fn single(comment: impl Into<String>, change: RecordChange) -> Self {
        Self {
            comment: comment.into(),
            changes: vec![change],
        }
    }
}

/// What the DNS service reported for a submitted batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeResult {
    /// Change id assigned by the service
    pub id: String,
    /// Change status (e.g. "PENDING", "INSYNC")
    pub status: String,
}

/// Trait for DNS provider implementations
///
/// # Constraints
///
/// - One API call per `submit()`; no retries and no polling for the change
///   to propagate. A returned `Ok` only means the service accepted the batch.
/// - Upserts are idempotent at the service, so submitting the same batch
///   twice is safe and results in two identical calls.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Submit a change batch to a hosted zone
    ///
    /// # Parameters
    ///
    /// - `hosted_zone_id`: The hosted zone to change
    /// - `batch`: The changes to apply
    ///
    /// # Returns
    ///
    /// - `Ok(ChangeResult)`: The service accepted the batch
    /// - `Err(Error)`: If the call failed
    async fn submit(
        &self,
        hosted_zone_id: &str,
        batch: &ChangeBatch,
    ) -> Result<ChangeResult, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
