//! Subnet membership over one or many subnet specifiers.

use super::matcher::matches;
use crate::error::SubnetError;
use crate::models::{parse_address, parse_subnet, ParsedAddress, SubnetDescriptor};

/// One subnet specifier or a list of them.
///
/// Built through `From`, so [`is_in_subnet`] accepts `"10.0.0.0/8"` as well as
/// `&["10.0.0.0/8", "fc00::/7"]` or a `Vec<&str>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subnets<'a> {
    Single(&'a str),
    Many(Vec<&'a str>),
}

impl<'a> Subnets<'a> {
    /// The specifiers as a slice, one element for [`Subnets::Single`].
    pub fn entries(&self) -> &[&'a str] {
        match self {
            Subnets::Single(subnet) => std::slice::from_ref(subnet),
            Subnets::Many(subnets) => subnets,
        }
    }
}

impl<'a> From<&'a str> for Subnets<'a> {
    fn from(subnet: &'a str) -> Self {
        Subnets::Single(subnet)
    }
}

impl<'a> From<&'a String> for Subnets<'a> {
    fn from(subnet: &'a String) -> Self {
        Subnets::Single(subnet.as_str())
    }
}

impl<'a> From<Vec<&'a str>> for Subnets<'a> {
    fn from(subnets: Vec<&'a str>) -> Self {
        Subnets::Many(subnets)
    }
}

impl<'a, 'b> From<&'b Vec<&'a str>> for Subnets<'a> {
    fn from(subnets: &'b Vec<&'a str>) -> Self {
        Subnets::Many(subnets.clone())
    }
}

impl<'a, 'b> From<&'b [&'a str]> for Subnets<'a> {
    fn from(subnets: &'b [&'a str]) -> Self {
        Subnets::Many(subnets.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Subnets<'a> {
    fn from(subnets: [&'a str; N]) -> Self {
        Subnets::Many(subnets.to_vec())
    }
}

impl<'a, 'b, const N: usize> From<&'b [&'a str; N]> for Subnets<'a> {
    fn from(subnets: &'b [&'a str; N]) -> Self {
        Subnets::Many(subnets.to_vec())
    }
}

impl<'a> From<&'a [String]> for Subnets<'a> {
    fn from(subnets: &'a [String]) -> Self {
        Subnets::Many(subnets.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for Subnets<'a> {
    fn from(subnets: &'a Vec<String>) -> Self {
        Subnets::from(subnets.as_slice())
    }
}

/// Returns true if `address` is in any of `subnets`.
///
/// Every subnet is parsed even after a match, so one malformed entry fails
/// the whole call. An empty list is `Ok(false)`.
///
/// # Examples
/// ```
/// use in_subnet::is_in_subnet;
/// let trusted = ["127.0.0.1/8", "::1/128", "10.0.0.0/8", "fc00::/7"];
/// assert!(is_in_subnet("127.1.2.3", &trusted).unwrap());
/// assert!(!is_in_subnet("1.2.3.4", &trusted).unwrap());
/// assert!(is_in_subnet("::ffff:172.16.10.10", "172.16.0.0/16").unwrap());
/// ```
pub fn is_in_subnet<'a>(
    address: &str,
    subnets: impl Into<Subnets<'a>>,
) -> Result<bool, SubnetError> {
    let address = parse_address(address)?;
    let subnets = subnets.into();

    let mut found = false;
    for subnet in subnets.entries() {
        let subnet = parse_subnet(subnet)?;
        found |= matches(&address, &subnet);
    }
    Ok(found)
}

/// A subnet list parsed once and checked many times.
///
/// Suits long-lived allow-lists such as trusted proxies, where re-parsing the
/// list per request is wasted work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubnetChecker {
    subnets: Vec<SubnetDescriptor>,
}

impl SubnetChecker {
    /// Parse every specifier, failing on the first malformed one.
    pub fn new<'a>(subnets: impl Into<Subnets<'a>>) -> Result<Self, SubnetError> {
        let subnets = subnets
            .into()
            .entries()
            .iter()
            .map(|s| parse_subnet(s))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("SubnetChecker::new() parsed {} subnets", subnets.len());
        Ok(SubnetChecker { subnets })
    }

    pub fn from_descriptors(subnets: Vec<SubnetDescriptor>) -> Self {
        SubnetChecker { subnets }
    }

    /// Parse `address` and check it against every subnet.
    pub fn contains(&self, address: &str) -> Result<bool, SubnetError> {
        let address = parse_address(address)?;
        Ok(self.contains_parsed(&address))
    }

    pub fn contains_parsed(&self, address: &ParsedAddress) -> bool {
        self.subnets.iter().any(|subnet| matches(address, subnet))
    }

    pub fn subnets(&self) -> &[SubnetDescriptor] {
        &self.subnets
    }

    pub fn len(&self) -> usize {
        self.subnets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subnets.is_empty()
    }
}

impl Extend<SubnetDescriptor> for SubnetChecker {
    fn extend<T: IntoIterator<Item = SubnetDescriptor>>(&mut self, iter: T) {
        self.subnets.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRUSTED_ADDRESSES: [&str; 4] = ["127.0.0.1/8", "::1/128", "10.0.0.0/8", "fc00::/7"];

    #[test]
    fn test_mixed_ipv4_and_ipv6_list() {
        assert!(is_in_subnet("127.1.2.3", TRUSTED_ADDRESSES).unwrap());
        assert!(is_in_subnet("10.254.254.254", TRUSTED_ADDRESSES).unwrap());
        assert!(!is_in_subnet("1.2.3.4", TRUSTED_ADDRESSES).unwrap());

        assert!(is_in_subnet("::1", TRUSTED_ADDRESSES).unwrap());
        assert!(is_in_subnet("fc00::1", TRUSTED_ADDRESSES).unwrap());
        assert!(!is_in_subnet("fe80::5555:1111:2222:7777", TRUSTED_ADDRESSES).unwrap());
    }

    #[test]
    fn test_empty_list_is_false() {
        let empty: Vec<&str> = vec![];
        assert!(!is_in_subnet("10.0.0.1", empty).unwrap());
        assert!(!is_in_subnet("::1", Subnets::Many(vec![])).unwrap());
    }

    #[test]
    fn test_empty_list_still_checks_address() {
        let empty: Vec<&str> = vec![];
        assert!(matches!(
            is_in_subnet("not-an-ip", empty),
            Err(SubnetError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_single_equals_one_element_list() {
        for (addr, subnet) in [
            ("10.0.0.1", "10.0.0.0/8"),
            ("10.0.0.1", "11.0.0.0/8"),
            ("::ffff:10.0.0.1", "10.0.0.0/8"),
            ("fe80::1%lo0", "fe80::/10"),
        ] {
            assert_eq!(
                is_in_subnet(addr, subnet).unwrap(),
                is_in_subnet(addr, [subnet]).unwrap()
            );
        }
    }

    #[test]
    fn test_order_independent() {
        let forward = ["192.168.0.0/16", "2001:db8::/32", "10.0.0.0/8"];
        let mut backward = forward;
        backward.reverse();
        for addr in ["10.1.1.1", "2001:db8::5", "8.8.8.8", "::ffff:192.168.3.3"] {
            assert_eq!(
                is_in_subnet(addr, &forward).unwrap(),
                is_in_subnet(addr, &backward).unwrap()
            );
        }
    }

    #[test]
    fn test_malformed_entry_fails_whole_call() {
        let err = is_in_subnet("10.0.0.1", ["10.0.0.0/8", "10.0.0.0/40"]).unwrap_err();
        assert_eq!(
            err,
            SubnetError::InvalidSubnet {
                subnet: "10.0.0.0/40".to_string(),
                reason: "prefix length 40 exceeds 32".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_address_named() {
        let err = is_in_subnet("300.1.1.1", "10.0.0.0/8").unwrap_err();
        assert_eq!(err.input(), "300.1.1.1");
        assert!(matches!(err, SubnetError::InvalidAddress { .. }));
    }

    #[test]
    fn test_owned_string_lists() {
        let owned: Vec<String> = TRUSTED_ADDRESSES.iter().map(|s| s.to_string()).collect();
        assert!(is_in_subnet("10.9.9.9", &owned).unwrap());
        assert!(is_in_subnet("10.9.9.9", &owned[2]).unwrap());
        assert!(!is_in_subnet("10.9.9.9", &owned[..2]).unwrap());
    }

    #[test]
    fn test_subnets_entries() {
        assert_eq!(Subnets::from("::1").entries(), &["::1"]);
        assert_eq!(Subnets::from(vec!["a", "b"]).entries().len(), 2);
    }

    #[test]
    fn test_checker() {
        let checker = SubnetChecker::new(TRUSTED_ADDRESSES).unwrap();
        assert_eq!(checker.len(), 4);
        assert!(!checker.is_empty());
        assert!(checker.contains("127.0.0.1").unwrap());
        assert!(checker.contains("::ffff:10.1.2.3").unwrap());
        assert!(!checker.contains("192.168.1.1").unwrap());
        assert!(checker.contains("bogus").is_err());
        assert_eq!(checker.subnets()[2].to_string(), "10.0.0.0/8");
    }

    #[test]
    fn test_checker_rejects_bad_entry() {
        let err = SubnetChecker::new(["10.0.0.0/8", "fc00::/7", "fc00::/200"]).unwrap_err();
        assert_eq!(err.input(), "fc00::/200");
    }

    #[test]
    fn test_checker_default_is_empty() {
        let mut checker = SubnetChecker::default();
        assert!(checker.is_empty());
        assert!(!checker.contains("10.0.0.1").unwrap());
        checker.extend(SubnetChecker::new("10.0.0.0/8").unwrap().subnets().iter().copied());
        assert!(checker.contains("10.0.0.1").unwrap());
    }
}
