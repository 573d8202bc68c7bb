//! Configuration types for taskdns
//!
//! The updater needs very little configuration: which cluster tags to read
//! and what TTL to publish. Everything else comes from the incoming event and
//! the cluster tags.

use serde::{Deserialize, Serialize};

/// Default TTL of the published record (in seconds)
pub const DEFAULT_RECORD_TTL: u32 = 180;

/// Largest TTL Route 53 accepts (two days)
pub const MAX_RECORD_TTL: u32 = 172_800;

/// Default cluster tag holding the domain name
pub const DEFAULT_DOMAIN_TAG: &str = "domain";

/// Default cluster tag holding the hosted zone id
pub const DEFAULT_HOSTED_ZONE_TAG: &str = "hostedZoneId";

/// Updater configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// TTL of the upserted A record (in seconds)
    #[serde(default = "default_record_ttl")]
    pub record_ttl: u32,

    /// Cluster tag key holding the domain the service name is prefixed to
    #[serde(default = "default_domain_tag")]
    pub domain_tag: String,

    /// Cluster tag key holding the hosted zone id to write into
    #[serde(default = "default_hosted_zone_tag")]
    pub hosted_zone_tag: String,
}

impl UpdaterConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            record_ttl: default_record_ttl(),
            domain_tag: default_domain_tag(),
            hosted_zone_tag: default_hosted_zone_tag(),
        }
    }

    /// Set the record TTL
    pub fn with_record_ttl(mut self, record_ttl: u32) -> Self {
        self.record_ttl = record_ttl;
        self
    }

    /// Set the cluster tag keys to read
    pub fn with_tag_keys(
        mut self,
        domain_tag: impl Into<String>,
        hosted_zone_tag: impl Into<String>,
    ) -> Self {
        self.domain_tag = domain_tag.into();
        self.hosted_zone_tag = hosted_zone_tag.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.record_ttl == 0 || self.record_ttl > MAX_RECORD_TTL {
            return Err(crate::Error::config(format!(
                "Record TTL must be between 1 and {} seconds. Got: {}",
                MAX_RECORD_TTL, self.record_ttl
            )));
        }

        if self.domain_tag.trim().is_empty() {
            return Err(crate::Error::config("Domain tag key cannot be empty"));
        }

        if self.hosted_zone_tag.trim().is_empty() {
            return Err(crate::Error::config("Hosted zone tag key cannot be empty"));
        }

        if self.domain_tag == self.hosted_zone_tag {
            return Err(crate::Error::config(format!(
                "Domain and hosted zone tag keys must differ. Both are '{}'",
                self.domain_tag
            )));
        }

        Ok(())
    }
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_record_ttl() -> u32 {
    DEFAULT_RECORD_TTL
}

fn default_domain_tag() -> String {
    DEFAULT_DOMAIN_TAG.to_string()
}

fn default_hosted_zone_tag() -> String {
    DEFAULT_HOSTED_ZONE_TAG.to_string()
}
