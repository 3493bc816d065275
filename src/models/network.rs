//! Network (subnet) model.
//!
//! A [`Network`] is a base address plus a subnet mask. The mask may be
//! scattered; every derived address is computed in unraveled space so that
//! contiguous and scattered masks share the same arithmetic.

use super::address::IpAddress;
use super::permute::{unravel, weave};
use crate::error::{NetError, Result};
use num_bigint::BigInt;
use num_traits::One;
use std::fmt;
use std::str::FromStr;

/// An IP network: `base = address & mask`, with the CIDR prefix cached when
/// the mask is contiguous.
///
/// Ordering is by base address, then by mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Network<A: IpAddress> {
    base: A,
    mask: A,
    cidr_prefix: Option<u32>,
}

impl<A: IpAddress> Network<A> {
    /// Build a network from any address inside it and a (possibly scattered) mask.
    pub fn from_mask(address: A, mask: A) -> Self {
        Network {
            base: address & mask,
            mask,
            cidr_prefix: mask.cidr_prefix(),
        }
    }

    /// Build a network from any address inside it and a CIDR prefix length.
    ///
    /// # Errors
    /// [`NetError::PrefixOutOfRange`] when `prefix` exceeds the address width.
    pub fn from_cidr(address: A, prefix: u32) -> Result<Self> {
        let mask = A::mask_from_cidr(prefix)?;
        Ok(Network {
            base: address & mask,
            mask,
            cidr_prefix: Some(prefix),
        })
    }

    pub fn base(&self) -> A {
        self.base
    }

    pub fn mask(&self) -> A {
        self.mask
    }

    /// The prefix length, `None` for a scattered mask.
    pub fn cidr_prefix(&self) -> Option<u32> {
        self.cidr_prefix
    }

    /// Cisco-style wildcard, the inverted mask.
    pub fn wildcard(&self) -> A {
        !self.mask
    }

    /// Number of host (zero) bits in the mask.
    pub fn host_bits(&self) -> u32 {
        self.wildcard().count_ones()
    }

    /// Number of network (one) bits in the mask.
    pub fn network_bits(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Usable hosts: `2^host_bits - 2`. Zero or negative for /31 and /32.
    pub fn host_count(&self) -> BigInt {
        (BigInt::one() << self.host_bits() as usize) - BigInt::from(2u8)
    }

    /// The base address moved into unraveled space.
    pub(crate) fn unraveled_base(&self) -> A {
        unravel(self.base, self.mask)
    }

    /// All host bits set, in unraveled space.
    fn host_span(&self) -> A {
        unravel(self.wildcard(), self.mask)
    }

    pub fn first_host(&self) -> Option<A> {
        if self.host_bits() < 2 {
            return None;
        }
        Some(weave(self.unraveled_base().add_offset(1), self.mask))
    }

    pub fn last_host(&self) -> Option<A> {
        if self.host_bits() < 2 {
            return None;
        }
        let broadcast = self.unraveled_base().wrapping_add(self.host_span());
        Some(weave(broadcast.sub_offset(1), self.mask))
    }

    /// Broadcast address; absent for a host route.
    pub fn broadcast(&self) -> Option<A> {
        if self.host_bits() < 1 {
            return None;
        }
        let broadcast = self.unraveled_base().wrapping_add(self.host_span());
        Some(weave(broadcast, self.mask))
    }

    /// Broadcast address, or the base address when there is none.
    pub fn last_address(&self) -> A {
        self.broadcast().unwrap_or(self.base)
    }

    /// Base address of the next network with the same mask.
    ///
    /// Wraps to the bottom of the address space after the last network.
    pub fn next_subnet_base(&self) -> A {
        let last = unravel(self.last_address(), self.mask);
        weave(last.add_offset(1), self.mask)
    }

    pub fn contains(&self, address: A) -> bool {
        address & self.mask == self.base
    }

    /// `other` lies inside `self` and every host bit of `other` is a host bit of `self`.
    pub fn is_superset_of(&self, other: &Network<A>) -> bool {
        other.base & self.mask == self.base && other.mask & self.mask == self.mask
    }

    pub fn is_subset_of(&self, other: &Network<A>) -> bool {
        other.is_superset_of(self)
    }

    /// The `[base, last_address]` ranges of both networks overlap.
    pub fn intersects(&self, other: &Network<A>) -> bool {
        self.base <= other.last_address() && other.base <= self.last_address()
    }
}

impl<A: IpAddress> fmt::Display for Network<A> {
    /// `base/prefix`, or `base/mask` when the mask is scattered.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.cidr_prefix {
            Some(prefix) => write!(f, "{}/{}", self.base, prefix),
            None => write!(f, "{}/{}", self.base, self.mask),
        }
    }
}

impl<A: IpAddress> FromStr for Network<A> {
    type Err = NetError;

    /// Parse `addr/prefix`, `addr/mask` or `addr/-wildcard`.
    fn from_str(s: &str) -> Result<Self> {
        crate::parse::parse_network(s).map(|(_, network)| network)
    }
}

impl<A: IpAddress> serde::Serialize for Network<A> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, A: IpAddress> serde::Deserialize<'de> for Network<A> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Network<A>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
