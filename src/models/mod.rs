//! Address and network models.
//!
//! This module contains the value types every algorithm works on:
//! - [`IpAddress`] - the capability trait shared by both families
//! - [`Ipv4Address`] and [`Ipv6Address`] - fixed-width address values
//! - [`Network`] - base address plus (possibly scattered) subnet mask
//! - mask conversions and the [`unravel`]/[`weave`] bit permutation

mod address;
pub mod ipv4;
pub mod ipv6;
mod mask;
mod network;
mod permute;

// Re-export public types
pub use address::IpAddress;
pub use ipv4::Ipv4Address;
pub use ipv6::Ipv6Address;
pub use mask::{cidr_from_mask_bytes, mask_bytes_from_cidr, pop_count};
pub use network::Network;
pub use permute::{unravel, weave};
