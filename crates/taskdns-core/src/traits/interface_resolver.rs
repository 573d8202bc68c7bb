// # Interface Resolver Trait
//
// Defines the interface for turning a task's elastic network interface id
// into the public IPv4 address associated with it.
//
// ## Implementations
//
// - EC2 `DescribeNetworkInterfaces`: `taskdns-ip-ec2` crate

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for network interface resolvers
///
/// Implementations make one lookup per call. A task whose interface has no
/// public address cannot be published, so a response without one is an
/// error, not an empty result.
#[async_trait]
pub trait InterfaceResolver: Send + Sync {
    /// Resolve the public address of a network interface
    ///
    /// Uses the association of the interface's first private address.
    ///
    /// # Parameters
    ///
    /// - `network_interface_id`: The interface id (e.g. "eni-0123456789abcdef0")
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The public address
    /// - `Err(Error)`: If the lookup failed or the interface has no public address
    async fn public_ip(&self, network_interface_id: &str) -> Result<Ipv4Addr, crate::Error>;

    /// Get the resolver name (for logging/debugging)
    fn resolver_name(&self) -> &'static str;
}
