// # Tag Source Trait
//
// Defines the interface for reading the tags attached to an ECS cluster.
//
// The cluster tags tell the updater where a task's record belongs: the
// domain the service name is prefixed to, and the hosted zone to write into.
//
// ## Implementations
//
// - ECS `ListTagsForResource`: `taskdns-tags-ecs` crate
//
// ## Usage
//
// ```rust,ignore
// use taskdns_core::traits::{ClusterTags, TagSource};
//
// let source = /* TagSource implementation */;
// let tags = ClusterTags::from_tags(source.cluster_tags(cluster_arn).await?);
// let domain = tags.get("domain");
// ```

use async_trait::async_trait;
use std::collections::HashMap;

/// A single key/value resource tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Cluster tags reduced into a lookup map
///
/// When the same key appears more than once, the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterTags {
    tags: HashMap<String, String>,
}

impl ClusterTags {
    /// Reduce a tag list into a map, last write wins
    pub fn from_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        let tags = tags
            .into_iter()
            .map(|tag| (tag.key, tag.value))
            .collect();

        Self { tags }
    }

    /// Value of a tag, or `None` if the tag is absent or empty
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Trait for cluster tag sources
///
/// Implementations make exactly one call to their service per invocation and
/// return the tags in whatever order the service reports them. They do not
/// retry, cache, or interpret the tags.
#[async_trait]
pub trait TagSource: Send + Sync {
    /// List the tags of a cluster
    ///
    /// # Parameters
    ///
    /// - `cluster_arn`: Full ARN of the cluster
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Tag>)`: The cluster's tags, possibly empty
    /// - `Err(Error)`: If the call failed
    async fn cluster_tags(&self, cluster_arn: &str) -> Result<Vec<Tag>, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
