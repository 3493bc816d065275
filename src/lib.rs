// cargo watch -x 'fmt' -x 'test'

//! subnet-calc: an IPv4/IPv6 subnet calculator.
//!
//! Networks may carry non-contiguous ("scattered") masks; every operation
//! treats them by unraveling the mask into a contiguous one first.

pub mod cli;
pub mod error;
pub mod models;
pub mod output;
pub mod parse;
pub mod processing;

pub use error::{NetError, Result};
pub use models::{IpAddress, Ipv4Address, Ipv6Address, Network};
pub use parse::{parse_netspec, NetworkSpec};
