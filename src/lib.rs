//! IP address subnet membership and classification.
//!
//! Parses IPv4/IPv6 literals (zone ids and IPv4-mapped forms included) and
//! CIDR specifiers, then answers membership by comparing prefix bits. IPv4
//! addresses and their `::ffff:a.b.c.d` spellings are treated as equivalent.
//!
//! ```
//! use in_subnet::{is_in_subnet, is_localhost, is_private};
//! assert!(is_in_subnet("10.1.2.3", ["127.0.0.1/8", "10.0.0.0/8"]).unwrap());
//! assert!(is_private("fe80::1%eth0").unwrap());
//! assert!(is_localhost("::ffff:127.0.0.1").unwrap());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use error::SubnetError;
pub use models::{
    is_ip, is_ipv4, is_ipv6, parse_address, parse_subnet, IpVersion, ParsedAddress,
    SubnetDescriptor,
};
pub use processing::{
    classify, classify_parsed, is_in_subnet, is_ipv4_mapped_address, is_localhost, is_private,
    is_reserved, is_special, matches, Category, SubnetChecker, Subnets,
};
