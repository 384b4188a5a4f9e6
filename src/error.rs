//! Error types for address and subnet parsing.

/// Errors raised while parsing addresses or subnet specifiers.
///
/// Every variant carries the offending input so a bad allow-list entry can be
/// found from the message alone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubnetError {
    #[error("Invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Invalid subnet {subnet:?}: {reason}")]
    InvalidSubnet { subnet: String, reason: String },
}

impl SubnetError {
    pub(crate) fn address(address: &str, reason: impl Into<String>) -> Self {
        SubnetError::InvalidAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn subnet(subnet: &str, reason: impl Into<String>) -> Self {
        SubnetError::InvalidSubnet {
            subnet: subnet.to_string(),
            reason: reason.into(),
        }
    }

    /// The input text that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            SubnetError::InvalidAddress { address, .. } => address,
            SubnetError::InvalidSubnet { subnet, .. } => subnet,
        }
    }
}
