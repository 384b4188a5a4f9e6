//! Textual IP address parsing.
//!
//! Provides [`ParsedAddress`] for IPv4 and IPv6 literals, including IPv6 zone
//! identifiers (`fe80::1%eth0`) and IPv4-mapped IPv6 forms (`::ffff:10.0.0.1`).

use crate::error::SubnetError;
use regex::Regex;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::OnceLock;

/// Bit length of an IPv4 address.
pub const IPV4_BITS: u8 = 32;
/// Bit length of an IPv6 address.
pub const IPV6_BITS: u8 = 128;

/// Leading 96 bits of every IPv4-mapped IPv6 address (`::ffff:0:0/96`).
pub const MAPPED_PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];
/// Length of [`MAPPED_PREFIX`] in bits.
pub const MAPPED_PREFIX_BITS: u8 = 96;

/// Zone ids are interface names or numeric scope ids; anything without
/// separators or whitespace is accepted.
static ZONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_zone_regex() -> &'static Regex {
    ZONE_REGEX.get_or_init(|| Regex::new(r"^[^%/\s]+$").expect("Invalid Regex"))
}

/// IP protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Number of bits in an address of this version.
    pub fn bit_length(self) -> u8 {
        match self {
            IpVersion::V4 => IPV4_BITS,
            IpVersion::V6 => IPV6_BITS,
        }
    }

    pub fn of(addr: &IpAddr) -> IpVersion {
        match addr {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "IPv4"),
            IpVersion::V6 => write!(f, "IPv6"),
        }
    }
}

/// Fixed-size address bytes in network order: 4 for IPv4, 16 for IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Octets {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl From<IpAddr> for Octets {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Octets::V4(v4.octets()),
            IpAddr::V6(v6) => Octets::V6(v6.octets()),
        }
    }
}

impl AsRef<[u8]> for Octets {
    fn as_ref(&self) -> &[u8] {
        match self {
            Octets::V4(bytes) => bytes,
            Octets::V6(bytes) => bytes,
        }
    }
}

/// A parsed IPv4 or IPv6 address with its optional zone identifier.
///
/// The zone is kept for display only and never takes part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedAddress {
    addr: IpAddr,
    zone: Option<String>,
}

impl ParsedAddress {
    /// Wrap an already-typed address (no zone).
    pub fn new(addr: IpAddr) -> Self {
        ParsedAddress { addr, zone: None }
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn version(&self) -> IpVersion {
        IpVersion::of(&self.addr)
    }

    /// Address bytes, expanded to the full 4 or 16 byte form.
    pub fn bytes(&self) -> Octets {
        Octets::from(self.addr)
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    /// The embedded IPv4 payload (bytes 12..16) of an IPv4-mapped IPv6 address.
    pub fn mapped_ipv4(&self) -> Option<Ipv4Addr> {
        match self.addr {
            IpAddr::V6(v6) => v6.to_ipv4_mapped(),
            IpAddr::V4(_) => None,
        }
    }

    /// True iff this is IPv6 and starts with the 96-bit `::ffff:0:0` prefix.
    pub fn is_v4_mapped(&self) -> bool {
        self.mapped_ipv4().is_some()
    }
}

impl From<IpAddr> for ParsedAddress {
    fn from(addr: IpAddr) -> Self {
        ParsedAddress::new(addr)
    }
}

impl FromStr for ParsedAddress {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s)
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.zone {
            Some(zone) => write!(f, "{}%{}", self.addr, zone),
            None => write!(f, "{}", self.addr),
        }
    }
}

/// Parse a textual IPv4 or IPv6 literal, with an optional `%zone` suffix.
///
/// Hostnames are rejected, nothing is resolved.
///
/// # Examples
/// ```
/// use in_subnet::models::{parse_address, IpVersion};
/// let addr = parse_address("fe80::1%eth0").unwrap();
/// assert_eq!(addr.version(), IpVersion::V6);
/// assert_eq!(addr.zone(), Some("eth0"));
/// ```
pub fn parse_address(text: &str) -> Result<ParsedAddress, SubnetError> {
    if text.is_empty() {
        return Err(SubnetError::address(text, "empty input"));
    }

    let (literal, zone) = match text.split_once('%') {
        Some((literal, zone)) => {
            if !get_zone_regex().is_match(zone) {
                log::trace!("parse_address({text:?}) rejected zone {zone:?}");
                return Err(SubnetError::address(
                    text,
                    format!("malformed zone identifier {zone:?}"),
                ));
            }
            (literal, Some(zone))
        }
        None => (text, None),
    };

    let addr = if literal.contains(':') {
        let v6 = Ipv6Addr::from_str(literal).map_err(|e| {
            log::trace!("parse_address({text:?}) failed: {e}");
            SubnetError::address(text, format!("not an IPv6 literal ({e})"))
        })?;
        IpAddr::V6(v6)
    } else {
        let v4 = Ipv4Addr::from_str(literal).map_err(|e| {
            log::trace!("parse_address({text:?}) failed: {e}");
            SubnetError::address(text, format!("not an IPv4 literal ({e})"))
        })?;
        if zone.is_some() {
            return Err(SubnetError::address(
                text,
                "zone identifiers are only valid on IPv6 addresses",
            ));
        }
        IpAddr::V4(v4)
    };

    Ok(ParsedAddress {
        addr,
        zone: zone.map(str::to_string),
    })
}

/// True if `text` is a valid IPv4 or IPv6 literal.
pub fn is_ip(text: &str) -> bool {
    parse_address(text).is_ok()
}

/// True if `text` is a valid dotted-decimal IPv4 literal.
pub fn is_ipv4(text: &str) -> bool {
    matches!(parse_address(text), Ok(addr) if addr.version() == IpVersion::V4)
}

/// True if `text` is a valid IPv6 literal, mapped forms included.
pub fn is_ipv6(text: &str) -> bool {
    matches!(parse_address(text), Ok(addr) if addr.version() == IpVersion::V6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4() {
        let addr = parse_address("192.168.1.42").unwrap();
        assert_eq!(addr.version(), IpVersion::V4);
        assert_eq!(addr.bytes(), Octets::V4([192, 168, 1, 42]));
        assert_eq!(addr.bytes().as_ref().len(), 4);
        assert_eq!(addr.zone(), None);
        assert!(!addr.is_v4_mapped());
        assert_eq!(addr.mapped_ipv4(), None);
    }

    #[test]
    fn test_parse_ipv6_expands_compression() {
        let addr = parse_address("2001:db8::1").unwrap();
        assert_eq!(addr.version(), IpVersion::V6);
        let mut expected = [0u8; 16];
        expected[0] = 0x20;
        expected[1] = 0x01;
        expected[2] = 0x0d;
        expected[3] = 0xb8;
        expected[15] = 1;
        assert_eq!(addr.bytes(), Octets::V6(expected));
        assert_eq!(
            addr,
            parse_address("2001:0db8:0000:0000:0000:0000:0000:0001").unwrap()
        );
    }

    #[test]
    fn test_parse_zone() {
        let addr = parse_address("fe80::5555:1111:2222:7777%utun2").unwrap();
        assert_eq!(addr.zone(), Some("utun2"));
        assert_eq!(addr.to_string(), "fe80::5555:1111:2222:7777%utun2");
        assert_eq!(addr.bytes(), parse_address("fe80::5555:1111:2222:7777").unwrap().bytes());

        assert!(parse_address("fe80::1%").is_err());
        assert!(parse_address("fe80::1%eth0%eth1").is_err());
        assert!(parse_address("fe80::1%eth 0").is_err());
        assert!(parse_address("10.0.0.1%eth0").is_err());
    }

    #[test]
    fn test_parse_mapped() {
        let dotted = parse_address("::ffff:172.16.10.10").unwrap();
        assert!(dotted.is_v4_mapped());
        assert_eq!(dotted.mapped_ipv4(), Some(Ipv4Addr::new(172, 16, 10, 10)));

        let hextets = parse_address("::ffff:ac10:a0a").unwrap();
        assert!(hextets.is_v4_mapped());
        assert_eq!(hextets, dotted);

        let expanded = parse_address("0:0:0:0:0:ffff:ac10:0a0a").unwrap();
        assert!(expanded.is_v4_mapped());

        // IPv4-compatible and translated forms are not mapped
        assert!(!parse_address("::172.16.10.10").unwrap().is_v4_mapped());
        assert!(!parse_address("::ffff:0:ac10:a0a").unwrap().is_v4_mapped());
        assert!(!parse_address("::1").unwrap().is_v4_mapped());
    }

    #[test]
    fn test_parse_invalid() {
        for text in [
            "",
            "   ",
            "1.2.3",
            "1.2.3.4.5",
            "256.0.0.1",
            "localhost",
            "example.com",
            "1:2:3:4:5:6:7:8:9",
            "1::2::3",
            "12345::",
            "::ffff:300.1.1.1",
            "10.0.0.0/8",
        ] {
            let err = parse_address(text).unwrap_err();
            assert!(
                matches!(err, SubnetError::InvalidAddress { .. }),
                "{text:?} should be an invalid address"
            );
            assert_eq!(err.input(), text);
        }
    }

    #[test]
    fn test_parse_rejects_padding() {
        for text in [" 10.0.0.1\n", "\t192.168.0.1 ", " ::1", "fe80::1%eth0 "] {
            let err = parse_address(text).unwrap_err();
            assert!(
                matches!(err, SubnetError::InvalidAddress { .. }),
                "{text:?} should be an invalid address"
            );
            assert_eq!(err.input(), text);
        }
    }

    #[test]
    fn test_validators() {
        assert!(is_ip("8.8.8.8"));
        assert!(is_ip("::"));
        assert!(!is_ip("8.8.8"));

        assert!(is_ipv4("8.8.8.8"));
        assert!(!is_ipv4("::ffff:8.8.8.8"));

        assert!(is_ipv6("::ffff:8.8.8.8"));
        assert!(is_ipv6("fe80::1%eth0"));
        assert!(!is_ipv6("8.8.8.8"));
    }

    #[test]
    fn test_version_bit_length() {
        assert_eq!(IpVersion::V4.bit_length(), 32);
        assert_eq!(IpVersion::V6.bit_length(), 128);
        assert_eq!(IpVersion::V6.to_string(), "IPv6");
    }
}
