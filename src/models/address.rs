//! The capability set shared by the IPv4 and IPv6 address types.
//!
//! Every algorithm in this crate is generic over [`IpAddress`] and runs once
//! per address family; the two families are never mixed in one operation.

use super::mask::{cidr_from_mask_bytes, mask_bytes_from_cidr};
use crate::error::{NetError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::str::FromStr;

/// A fixed-width IP address (IPv4 or IPv6).
///
/// Arithmetic wraps modulo 2^W; addition past the top of the address space
/// is defined behavior, not an error.
pub trait IpAddress:
    Copy
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + FromStr<Err = NetError>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Serialize
    + DeserializeOwned
{
    /// Width of the address in bytes.
    const BYTES: usize;

    /// Big-endian byte representation, `[u8; BYTES]`.
    type Octets: AsRef<[u8]> + AsMut<[u8]> + Default + Copy;

    /// The address as big-endian bytes.
    fn octets(&self) -> Self::Octets;

    /// Build an address from its big-endian byte array.
    fn from_be_octets(octets: Self::Octets) -> Self;

    /// Build an address from big-endian bytes; `None` unless `bytes.len() == BYTES`.
    fn from_octets(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::BYTES {
            return None;
        }
        let mut octets = Self::Octets::default();
        octets.as_mut().copy_from_slice(bytes);
        Some(Self::from_be_octets(octets))
    }

    /// The all-zero address.
    fn zero() -> Self;

    /// `self + other` modulo 2^W.
    fn wrapping_add(self, other: Self) -> Self;

    /// `self - other` modulo 2^W.
    fn wrapping_sub(self, other: Self) -> Self;

    /// `self + offset` modulo 2^W.
    fn add_offset(self, offset: i64) -> Self;

    /// `self - offset` modulo 2^W.
    fn sub_offset(self, offset: i64) -> Self;

    /// Number of set bits.
    fn count_ones(&self) -> u32;

    /// Width of the address in bits.
    fn bit_width() -> u32 {
        8 * Self::BYTES as u32
    }

    fn all_ones() -> Self {
        !Self::zero()
    }

    /// The subnet mask with `prefix` leading one bits.
    fn mask_from_cidr(prefix: u32) -> Result<Self> {
        let bytes = mask_bytes_from_cidr(Self::BYTES, prefix)?;
        let mut octets = Self::Octets::default();
        octets.as_mut().copy_from_slice(&bytes);
        Ok(Self::from_be_octets(octets))
    }

    /// Interpret `self` as a mask and return its CIDR prefix, if contiguous.
    fn cidr_prefix(&self) -> Option<u32> {
        cidr_from_mask_bytes(self.octets().as_ref())
    }
}

/// Implement the bitwise operators for a single-field address newtype.
macro_rules! impl_bit_ops {
    ($addr:ident) => {
        impl std::ops::BitAnd for $addr {
            type Output = $addr;
            fn bitand(self, rhs: $addr) -> $addr {
                $addr(self.0 & rhs.0)
            }
        }

        impl std::ops::BitOr for $addr {
            type Output = $addr;
            fn bitor(self, rhs: $addr) -> $addr {
                $addr(self.0 | rhs.0)
            }
        }

        impl std::ops::BitXor for $addr {
            type Output = $addr;
            fn bitxor(self, rhs: $addr) -> $addr {
                $addr(self.0 ^ rhs.0)
            }
        }

        impl std::ops::Not for $addr {
            type Output = $addr;
            fn not(self) -> $addr {
                $addr(!self.0)
            }
        }
    };
}

/// Serialize an address as its display string and parse it back with `FromStr`.
macro_rules! impl_string_serde {
    ($addr:ident) => {
        impl serde::Serialize for $addr {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::ser::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $addr {
            fn deserialize<D>(deserializer: D) -> std::result::Result<$addr, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_bit_ops;
pub(crate) use impl_string_serde;
