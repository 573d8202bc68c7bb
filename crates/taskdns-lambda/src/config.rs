//! Environment configuration for the Lambda function

use anyhow::{Result, bail};
use std::env;
use taskdns_core::UpdaterConfig;
use taskdns_core::config::{DEFAULT_DOMAIN_TAG, DEFAULT_HOSTED_ZONE_TAG, DEFAULT_RECORD_TTL};

/// Function configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub record_ttl: u32,
    pub domain_tag: String,
    pub hosted_zone_tag: String,
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let record_ttl = match lookup("TASKDNS_RECORD_TTL") {
            Some(raw) => match raw.trim().parse() {
                Ok(ttl) => ttl,
                Err(_) => bail!("TASKDNS_RECORD_TTL must be a number of seconds. Got: '{}'", raw),
            },
            None => DEFAULT_RECORD_TTL,
        };

        let dry_run = match lookup("TASKDNS_DRY_RUN") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                anyhow::anyhow!("TASKDNS_DRY_RUN must be true or false. Got: '{}'", raw)
            })?,
            None => false,
        };

        Ok(Self {
            log_level: lookup("TASKDNS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            record_ttl,
            domain_tag: lookup("TASKDNS_DOMAIN_TAG")
                .unwrap_or_else(|| DEFAULT_DOMAIN_TAG.to_string()),
            hosted_zone_tag: lookup("TASKDNS_HOSTED_ZONE_TAG")
                .unwrap_or_else(|| DEFAULT_HOSTED_ZONE_TAG.to_string()),
            dry_run,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => bail!(
                "TASKDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.updater_config()
            .validate()
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    /// The part of the configuration the core updater consumes
    pub fn updater_config(&self) -> UpdaterConfig {
        UpdaterConfig::new()
            .with_record_ttl(self.record_ttl)
            .with_tag_keys(&self.domain_tag, &self.hosted_zone_tag)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
