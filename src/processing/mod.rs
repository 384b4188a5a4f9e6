//! Subnet matching and address classification.
//!
//! - [`matcher`] - Bitwise prefix comparison and IPv4/IPv6 bridging
//! - [`membership`] - Membership over one or many subnets
//! - [`classify`] - Well-known category tables

pub mod classify;
pub mod matcher;
pub mod membership;

// Re-export public functions
pub use classify::{
    classify, classify_parsed, is_ipv4_mapped_address, is_localhost, is_private, is_reserved,
    is_special, Category,
};
pub use matcher::{bridge, matches, prefix_eq};
pub use membership::{is_in_subnet, SubnetChecker, Subnets};
