// # taskdns-core
//
// Core library for publishing ECS task addresses to DNS.
//
// ## Architecture Overview
//
// When a task starts, its public address is published as an A record named
// after the task's service, inside the domain configured on the cluster:
//
// - **TagSource**: Trait for reading the cluster's `domain` and `hostedZoneId` tags
// - **InterfaceResolver**: Trait for resolving the task's network interface to a public IP
// - **DnsProvider**: Trait for submitting record changes to a hosted zone
// - **TaskDnsUpdater**: Runs the tag → interface → DNS pipeline for one event
//
// ## Design Principles
//
// 1. **Stateless**: Nothing is kept between invocations except client handles
// 2. **Sequential**: Each external call finishes before the next one starts
// 3. **No-op over error**: Untagged clusters and tasks without an interface are skipped
// 4. **Single-shot**: No retries; failures surface to the invoking environment

pub mod traits;
pub mod event;
pub mod updater;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{TagSource, InterfaceResolver, DnsProvider};
pub use event::{TaskStateChange, TaskDetail, Attachment, AttachmentDetail};
pub use updater::{TaskDnsUpdater, UpdateOutcome, SkipReason};
pub use config::UpdaterConfig;
pub use error::{Error, Result};
