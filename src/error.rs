//! Error type shared by the address engine, the algorithms and the spec parser.

use thiserror::Error;

/// Errors raised while parsing or computing networks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    /// Malformed address, mask, prefix or host count text.
    #[error("Invalid {what} '{input}'")]
    Parse { what: &'static str, input: String },

    /// CIDR prefix outside `0..=width` for the address family.
    #[error("CIDR prefix {prefix} is too large ({max} is the maximum)")]
    PrefixOutOfRange { prefix: u32, max: u32 },

    /// A scattered mask was given where a CIDR prefix is required.
    #[error("Subnet mask {0} is not a CIDR prefix")]
    InvalidMask(String),

    /// The requested host counts do not fit into the network.
    #[error("Not enough addresses available in {network} for {demands} subnet(s)")]
    InsufficientSpace { network: String, demands: usize },

    /// IPv4 and IPv6 specs given in one invocation.
    #[error("IPv4 and IPv6 cannot be mixed within an invocation")]
    MixedFamilies,

    /// Text that matches none of the network spec forms.
    #[error("Could not detect network spec type of {0}")]
    Unrecognized(String),
}

impl NetError {
    pub(crate) fn parse(what: &'static str, input: &str) -> Self {
        NetError::Parse {
            what,
            input: input.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NetError>;
