//! Core traits for taskdns
//!
//! This module defines the interfaces to the three external services the
//! updater talks to.
//!
//! - [`TagSource`]: Read the tags of the task's cluster
//! - [`InterfaceResolver`]: Resolve a network interface to its public address
//! - [`DnsProvider`]: Submit record changes to a hosted zone

pub mod tag_source;
pub mod interface_resolver;
pub mod dns_provider;

pub use tag_source::{TagSource, Tag, ClusterTags};
pub use interface_resolver::InterfaceResolver;
pub use dns_provider::{DnsProvider, ChangeAction, RecordChange, ChangeBatch, ChangeResult};
