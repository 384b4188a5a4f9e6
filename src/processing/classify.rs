//! Well-known address categories.
//!
//! Each category owns a fixed range table, parsed once on first use and never
//! mutated. IPv4 ranges also match their IPv4-mapped IPv6 spellings through
//! the bridging matcher.

use super::membership::SubnetChecker;
use crate::error::SubnetError;
use crate::models::{parse_address, ParsedAddress};
use lazy_static::lazy_static;
use std::fmt;

/// RFC 1918 private use, RFC 4193 unique local, and link local.
const PRIVATE_RANGES: &[&str] = &[
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "169.254.0.0/16",
    "fc00::/7",
    "fe80::/10",
];

const LOCALHOST_RANGES: &[&str] = &["127.0.0.0/8", "::1/128"];

/// IANA special-purpose blocks that are neither private nor loopback.
const RESERVED_RANGES: &[&str] = &[
    "0.0.0.0/8",          // "this" network
    "100.64.0.0/10",      // carrier-grade NAT
    "169.254.0.0/16",     // link local
    "192.0.0.0/24",       // IETF protocol assignments
    "192.0.2.0/24",       // TEST-NET-1
    "192.88.99.0/24",     // 6to4 relay anycast
    "198.18.0.0/15",      // benchmarking
    "198.51.100.0/24",    // TEST-NET-2
    "203.0.113.0/24",     // TEST-NET-3
    "224.0.0.0/4",        // multicast
    "240.0.0.0/4",        // future use
    "255.255.255.255/32", // limited broadcast
    "::/128",             // unspecified
    "fe80::/10",          // link local
    "ff00::/8",           // multicast
    "64:ff9b::/96",       // IPv4/IPv6 translation
    "100::/64",           // discard only
    "2001::/32",          // Teredo
    "2001:db8::/32",      // documentation
    "2002::/16",          // 6to4
];

lazy_static! {
    static ref PRIVATE: SubnetChecker = build_table(Category::Private);
    static ref LOCALHOST: SubnetChecker = build_table(Category::Localhost);
    static ref RESERVED: SubnetChecker = build_table(Category::Reserved);
}

fn build_table(category: Category) -> SubnetChecker {
    SubnetChecker::new(category.ranges())
        .unwrap_or_else(|e| panic!("Invalid {category} range table: {e}"))
}

/// A well-known address category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Localhost,
    Private,
    Reserved,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Localhost, Category::Private, Category::Reserved];

    /// The CIDR ranges making up this category.
    pub fn ranges(self) -> &'static [&'static str] {
        match self {
            Category::Localhost => LOCALHOST_RANGES,
            Category::Private => PRIVATE_RANGES,
            Category::Reserved => RESERVED_RANGES,
        }
    }

    fn table(self) -> &'static SubnetChecker {
        match self {
            Category::Localhost => &LOCALHOST,
            Category::Private => &PRIVATE,
            Category::Reserved => &RESERVED,
        }
    }

    /// True if an already parsed address falls in this category.
    pub fn contains(self, address: &ParsedAddress) -> bool {
        self.table().contains_parsed(address)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::Localhost => write!(f, "localhost"),
            Category::Private => write!(f, "private"),
            Category::Reserved => write!(f, "reserved"),
        }
    }
}

fn is_in_category(address: &str, category: Category) -> Result<bool, SubnetError> {
    let address = parse_address(address)?;
    Ok(category.contains(&address))
}

/// Private, unique-local or link-local address.
pub fn is_private(address: &str) -> Result<bool, SubnetError> {
    is_in_category(address, Category::Private)
}

/// Loopback address.
pub fn is_localhost(address: &str) -> Result<bool, SubnetError> {
    is_in_category(address, Category::Localhost)
}

/// IANA special-purpose address: documentation, multicast, link local etc.
pub fn is_reserved(address: &str) -> Result<bool, SubnetError> {
    is_in_category(address, Category::Reserved)
}

/// Localhost, private or reserved.
pub fn is_special(address: &str) -> Result<bool, SubnetError> {
    let address = parse_address(address)?;
    Ok(Category::ALL.iter().any(|c| c.contains(&address)))
}

/// True iff `address` is IPv6 of the form `::ffff:a.b.c.d`.
pub fn is_ipv4_mapped_address(address: &str) -> Result<bool, SubnetError> {
    Ok(parse_address(address)?.is_v4_mapped())
}

/// Every category `address` belongs to, in [`Category::ALL`] order.
pub fn classify(address: &str) -> Result<Vec<Category>, SubnetError> {
    let address = parse_address(address)?;
    Ok(classify_parsed(&address))
}

/// [`classify`] for an address that is already parsed.
pub fn classify_parsed(address: &ParsedAddress) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|c| c.contains(address))
        .collect()
}
