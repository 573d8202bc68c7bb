// # EC2 Interface Resolver
//
// This crate resolves a task's elastic network interface to its public IPv4
// address through the EC2 `DescribeNetworkInterfaces` API.
//
// ## Behavior
//
// - One API call per invocation, no retries, no caching
// - Reads the association of the FIRST private address of the FIRST
//   interface returned; other interfaces and secondary addresses are ignored
// - A response without that association is an error: a task without a
//   public address cannot be published
//
// ## API Reference
//
// - DescribeNetworkInterfaces: https://docs.aws.amazon.com/AWSEC2/latest/APIReference/API_DescribeNetworkInterfaces.html

use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::NetworkInterface;
use std::net::Ipv4Addr;
use taskdns_core::traits::InterfaceResolver;
use taskdns_core::{Error, Result};

/// Interface resolver backed by the EC2 API
#[derive(Debug, Clone)]
pub struct Ec2InterfaceResolver {
    client: aws_sdk_ec2::Client,
}

impl Ec2InterfaceResolver {
    /// Create a resolver from an existing EC2 client
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InterfaceResolver for Ec2InterfaceResolver {
    async fn public_ip(&self, network_interface_id: &str) -> Result<Ipv4Addr> {
        tracing::debug!("Describing network interface {}", network_interface_id);

        let output = self
            .client
            .describe_network_interfaces()
            .network_interface_ids(network_interface_id)
            .send()
            .await
            .map_err(|e| {
                Error::provider(
                    "ec2",
                    format!("DescribeNetworkInterfaces failed: {}", DisplayErrorContext(&e)),
                )
            })?;

        extract_public_ip(network_interface_id, output.network_interfaces())
    }

    fn resolver_name(&self) -> &'static str {
        "ec2"
    }
}

/// Public address of the first interface's first private address
fn extract_public_ip(
    network_interface_id: &str,
    interfaces: &[NetworkInterface],
) -> Result<Ipv4Addr> {
    let interface = interfaces.first().ok_or_else(|| {
        Error::not_found(format!("Network interface not found: {}", network_interface_id))
    })?;

    let public_ip = interface
        .private_ip_addresses()
        .first()
        .and_then(|address| address.association())
        .and_then(|association| association.public_ip())
        .ok_or_else(|| {
            Error::not_found(format!(
                "Network interface {} has no public IP association",
                network_interface_id
            ))
        })?;

    public_ip.parse::<Ipv4Addr>().map_err(|_| {
        Error::provider(
            "ec2",
            format!(
                "Network interface {} reported an invalid public IP: '{}'",
                network_interface_id, public_ip
            ),
        )
    })
}
