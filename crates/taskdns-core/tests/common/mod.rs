//! Test doubles and common utilities for pipeline contract tests
//!
//! The doubles count their calls and record their inputs so tests can assert
//! exactly which external calls a pipeline run made.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use taskdns_core::error::{Error, Result};
use taskdns_core::event::{Attachment, AttachmentDetail, TaskDetail, TaskStateChange};
use taskdns_core::traits::{
    ChangeBatch, ChangeResult, DnsProvider, InterfaceResolver, Tag, TagSource,
};

pub const CLUSTER_ARN: &str = "arn:aws:ecs:eu-west-1:123456789012:cluster/web";

/// A tag source returning a fixed tag list
pub struct StaticTagSource {
    tags: Vec<Tag>,
    fail: bool,
    call_count: Arc<AtomicUsize>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl StaticTagSource {
    pub fn new(tags: Vec<(&str, &str)>) -> Self {
        Self {
            tags: tags.into_iter().map(|(k, v)| Tag::new(k, v)).collect(),
            fail: false,
            call_count: Arc::new(AtomicUsize::new(0)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A source whose call always fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(vec![])
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    /// Create a new StaticTagSource that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            tags: other.tags.clone(),
            fail: other.fail,
            call_count: Arc::clone(&other.call_count),
            requested: Arc::clone(&other.requested),
        }
    }
}

#[async_trait::async_trait]
impl TagSource for StaticTagSource {
    async fn cluster_tags(&self, cluster_arn: &str) -> Result<Vec<Tag>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(cluster_arn.to_string());

        if self.fail {
            return Err(Error::provider("test-tags", "AccessDeniedException"));
        }
        Ok(self.tags.clone())
    }

    fn source_name(&self) -> &'static str {
        "test-tags"
    }
}

/// An interface resolver backed by a fixed id → address map
pub struct StaticInterfaceResolver {
    addresses: HashMap<String, Ipv4Addr>,
    call_count: Arc<AtomicUsize>,
}

impl StaticInterfaceResolver {
    pub fn new(addresses: Vec<(&str, Ipv4Addr)>) -> Self {
        Self {
            addresses: addresses
                .into_iter()
                .map(|(id, ip)| (id.to_string(), ip))
                .collect(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            addresses: other.addresses.clone(),
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl InterfaceResolver for StaticInterfaceResolver {
    async fn public_ip(&self, network_interface_id: &str) -> Result<Ipv4Addr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.addresses
            .get(network_interface_id)
            .copied()
            .ok_or_else(|| {
                Error::not_found(format!(
                    "Network interface {} has no public address",
                    network_interface_id
                ))
            })
    }

    fn resolver_name(&self) -> &'static str {
        "test-resolver"
    }
}

/// A DNS provider that records every submitted batch
pub struct RecordingDnsProvider {
    fail: bool,
    submissions: Arc<Mutex<Vec<(String, ChangeBatch)>>>,
}

impl RecordingDnsProvider {
    pub fn new() -> Self {
        Self {
            fail: false,
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose submissions always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn submit_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    /// Recorded (hosted zone id, batch) pairs, in submission order
    pub fn submissions(&self) -> Vec<(String, ChangeBatch)> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            fail: other.fail,
            submissions: Arc::clone(&other.submissions),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for RecordingDnsProvider {
    async fn submit(&self, hosted_zone_id: &str, batch: &ChangeBatch) -> Result<ChangeResult> {
        self.submissions
            .lock()
            .unwrap()
            .push((hosted_zone_id.to_string(), batch.clone()));

        if self.fail {
            return Err(Error::provider("test-dns", "InvalidChangeBatch"));
        }

        let n = self.submit_count();
        Ok(ChangeResult {
            id: format!("/change/C{}", n),
            status: "PENDING".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "test-dns"
    }
}

/// An `eni` attachment carrying the given interface id
pub fn eni_attachment(eni_id: &str) -> Attachment {
    Attachment {
        id: Some("att-1".to_string()),
        kind: "eni".to_string(),
        status: Some("ATTACHED".to_string()),
        details: vec![
            AttachmentDetail::new("subnetId", "subnet-0abc"),
            AttachmentDetail::new("networkInterfaceId", eni_id),
            AttachmentDetail::new("privateIPv4Address", "10.0.1.17"),
        ],
    }
}

/// A task event for the test cluster
pub fn task_event(group: &str, attachments: Vec<Attachment>) -> TaskStateChange {
    TaskStateChange {
        id: Some("evt-1".to_string()),
        source: Some("aws.ecs".to_string()),
        detail_type: Some("ECS Task State Change".to_string()),
        detail: TaskDetail {
            cluster_arn: CLUSTER_ARN.to_string(),
            group: Some(group.to_string()),
            attachments,
            task_arn: Some("arn:aws:ecs:eu-west-1:123456789012:task/web/abc".to_string()),
            last_status: Some("RUNNING".to_string()),
            desired_status: Some("RUNNING".to_string()),
        },
    }
}
