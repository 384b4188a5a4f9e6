//! Bitwise prefix matching between an address and a subnet.
//!
//! Same-version pairs compare the leading `prefix_len` bits directly. Mixed
//! IPv4/IPv6 pairs go through [`bridge`], which is the only place IPv4-mapped
//! IPv6 equivalence is decided.

use crate::models::{ParsedAddress, SubnetDescriptor, MAPPED_PREFIX, MAPPED_PREFIX_BITS};
use std::net::IpAddr;

/// Returns true if the leading `subnet.prefix_len()` bits of `address` equal
/// those of the subnet base.
///
/// # Examples
/// ```
/// use in_subnet::models::{parse_address, parse_subnet};
/// use in_subnet::processing::matches;
/// let addr = parse_address("::ffff:172.16.10.10").unwrap();
/// assert!(matches(&addr, &parse_subnet("172.16.0.0/16").unwrap()));
/// ```
pub fn matches(address: &ParsedAddress, subnet: &SubnetDescriptor) -> bool {
    if address.version() == subnet.version() {
        prefix_eq(
            address.bytes().as_ref(),
            subnet.base_bytes().as_ref(),
            subnet.prefix_len(),
        )
    } else {
        bridge(address.addr(), subnet)
    }
}

/// Match an address against a subnet of the other IP version.
///
/// * IPv4 address, IPv6 subnet: the subnet must be at least `/96` and start
///   with `::ffff:0:0`; the address is compared to its low 32 bits over
///   `prefix_len - 96` bits.
/// * IPv6 address, IPv4 subnet: the address must be IPv4-mapped; its payload
///   is compared as a plain IPv4 address.
///
/// Everything else, same-version pairs included, is `false`.
pub fn bridge(address: IpAddr, subnet: &SubnetDescriptor) -> bool {
    match (address, subnet.base()) {
        (IpAddr::V4(v4), IpAddr::V6(base)) => {
            let len = subnet.prefix_len();
            let base = base.octets();
            if len < MAPPED_PREFIX_BITS || base[..12] != MAPPED_PREFIX {
                return false;
            }
            prefix_eq(&v4.octets(), &base[12..], len - MAPPED_PREFIX_BITS)
        }
        (IpAddr::V6(v6), IpAddr::V4(base)) => match v6.to_ipv4_mapped() {
            Some(payload) => prefix_eq(&payload.octets(), &base.octets(), subnet.prefix_len()),
            None => false,
        },
        _ => false,
    }
}

/// Compare the first `bits` bits of two byte strings, most significant first.
///
/// Returns false if either side is shorter than `bits`.
pub fn prefix_eq(a: &[u8], b: &[u8], bits: u8) -> bool {
    let full = usize::from(bits / 8);
    let rem = bits % 8;
    let needed = full + usize::from(rem > 0);
    if a.len() < needed || b.len() < needed {
        return false;
    }

    if a[..full] != b[..full] {
        return false;
    }
    if rem == 0 {
        return true;
    }
    let mask = 0xffu8 << (8 - rem);
    (a[full] ^ b[full]) & mask == 0
}
