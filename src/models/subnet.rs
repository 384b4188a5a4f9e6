//! CIDR subnet descriptors.
//!
//! Provides [`SubnetDescriptor`], a base address plus prefix length parsed from
//! `address/prefix` notation or from a bare address.

use super::address::{parse_address, IpVersion, Octets};
use crate::error::SubnetError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// A subnet as a base address and the number of leading bits that must match.
///
/// Bits of `base` past `prefix_len` are kept as written and ignored when
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubnetDescriptor {
    base: IpAddr,
    prefix_len: u8,
}

impl SubnetDescriptor {
    /// Build a descriptor, checking `prefix_len` against the base's version.
    pub fn new(base: IpAddr, prefix_len: u8) -> Result<Self, SubnetError> {
        let max = IpVersion::of(&base).bit_length();
        if prefix_len > max {
            return Err(SubnetError::subnet(
                &format!("{base}/{prefix_len}"),
                format!("prefix length {prefix_len} exceeds {max}"),
            ));
        }
        Ok(SubnetDescriptor { base, prefix_len })
    }

    /// Single-host subnet covering exactly `addr`.
    pub fn host(addr: IpAddr) -> Self {
        SubnetDescriptor {
            base: addr,
            prefix_len: IpVersion::of(&addr).bit_length(),
        }
    }

    pub fn version(&self) -> IpVersion {
        IpVersion::of(&self.base)
    }

    pub fn base(&self) -> IpAddr {
        self.base
    }

    pub fn base_bytes(&self) -> Octets {
        Octets::from(self.base)
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl FromStr for SubnetDescriptor {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_subnet(s)
    }
}

impl fmt::Display for SubnetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

impl Serialize for SubnetDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SubnetDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<SubnetDescriptor, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_subnet(&s).map_err(de::Error::custom)
    }
}

/// Parse `address/prefix` or a bare address into a [`SubnetDescriptor`].
///
/// A bare address gets the full prefix length (32 or 128), so it matches only
/// itself. A zone suffix on the address part is accepted and dropped.
///
/// # Examples
/// ```
/// use in_subnet::models::parse_subnet;
/// let subnet = parse_subnet("10.0.0.0/8").unwrap();
/// assert_eq!(subnet.prefix_len(), 8);
/// assert_eq!(parse_subnet("::1").unwrap().prefix_len(), 128);
/// ```
pub fn parse_subnet(text: &str) -> Result<SubnetDescriptor, SubnetError> {
    let (addr_part, len_part) = match text.split_once('/') {
        Some((addr, len)) => (addr, Some(len)),
        None => (text, None),
    };

    let address = parse_address(addr_part).map_err(|e| SubnetError::subnet(text, e.to_string()))?;
    let max = address.version().bit_length();

    let prefix_len = match len_part {
        None => max,
        Some(len) => {
            let len = parse_prefix_len(len).ok_or_else(|| {
                log::trace!("parse_subnet({text:?}) bad prefix length {len:?}");
                SubnetError::subnet(text, format!("prefix length {len:?} is not an unsigned integer"))
            })?;
            if len > u32::from(max) {
                return Err(SubnetError::subnet(
                    text,
                    format!("prefix length {len} exceeds {max}"),
                ));
            }
            len as u8
        }
    };

    Ok(SubnetDescriptor {
        base: address.addr(),
        prefix_len,
    })
}

/// Plain decimal digits only; `u32::from_str` alone would accept a leading `+`.
fn parse_prefix_len(len: &str) -> Option<u32> {
    if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    len.parse().ok()
}
