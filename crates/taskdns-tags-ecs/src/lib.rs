// # ECS Tag Source
//
// This crate reads cluster tags through the ECS `ListTagsForResource` API.
//
// ## Behavior
//
// - One API call per invocation, no retries, no caching
// - Tags are returned in the order ECS reports them; reduction into a map
//   (last write wins) is done by `taskdns-core`
// - Tags without a key are dropped; tags without a value get an empty value
//
// ## API Reference
//
// - ListTagsForResource: https://docs.aws.amazon.com/AmazonECS/latest/APIReference/API_ListTagsForResource.html

use async_trait::async_trait;
use aws_sdk_ecs::error::DisplayErrorContext;
use taskdns_core::traits::{Tag, TagSource};
use taskdns_core::{Error, Result};

/// Cluster tag source backed by the ECS API
#[derive(Debug, Clone)]
pub struct EcsTagSource {
    client: aws_sdk_ecs::Client,
}

impl EcsTagSource {
    /// Create a tag source from an existing ECS client
    pub fn new(client: aws_sdk_ecs::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TagSource for EcsTagSource {
    async fn cluster_tags(&self, cluster_arn: &str) -> Result<Vec<Tag>> {
        tracing::debug!("Listing tags for {}", cluster_arn);

        let output = self
            .client
            .list_tags_for_resource()
            .resource_arn(cluster_arn)
            .send()
            .await
            .map_err(|e| {
                Error::provider(
                    "ecs",
                    format!("ListTagsForResource failed: {}", DisplayErrorContext(&e)),
                )
            })?;

        Ok(convert_tags(output.tags()))
    }

    fn source_name(&self) -> &'static str {
        "ecs"
    }
}

/// Convert SDK tags into core tags, preserving order
fn convert_tags(tags: &[aws_sdk_ecs::types::Tag]) -> Vec<Tag> {
    tags.iter()
        .filter_map(|tag| {
            let key = tag.key()?;
            Some(Tag::new(key, tag.value().unwrap_or_default()))
        })
        .collect()
}
