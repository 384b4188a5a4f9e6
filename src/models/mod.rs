//! Domain models for address and subnet parsing.
//!
//! - [`ParsedAddress`] - IPv4/IPv6 literal with optional zone id
//! - [`SubnetDescriptor`] - CIDR base address plus prefix length

mod address;
mod subnet;

// Re-export public types
pub use address::{
    is_ip, is_ipv4, is_ipv6, parse_address, IpVersion, Octets, ParsedAddress, IPV4_BITS,
    IPV6_BITS, MAPPED_PREFIX, MAPPED_PREFIX_BITS,
};
pub use subnet::{parse_subnet, SubnetDescriptor};
