//! IPv4 address type.
//!
//! Provides [`Ipv4Address`], a 32-bit address value with dotted-decimal
//! parsing and formatting, wrapping arithmetic and bitwise operators.

use super::address::{impl_bit_ops, impl_string_serde, IpAddress};
use crate::error::NetError;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// IPv4 address stored as a host-order `u32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv4Address(pub u32);

impl Ipv4Address {
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Ipv4Address(u32::from_be_bytes([a, b, c, d]))
    }

    /// The address as a `u32`.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl IpAddress for Ipv4Address {
    const BYTES: usize = 4;
    type Octets = [u8; 4];

    fn octets(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    fn from_be_octets(octets: [u8; 4]) -> Self {
        Ipv4Address(u32::from_be_bytes(octets))
    }

    fn zero() -> Self {
        Ipv4Address(0)
    }

    fn wrapping_add(self, other: Self) -> Self {
        Ipv4Address(self.0.wrapping_add(other.0))
    }

    fn wrapping_sub(self, other: Self) -> Self {
        Ipv4Address(self.0.wrapping_sub(other.0))
    }

    fn add_offset(self, offset: i64) -> Self {
        // truncation to u32 is reduction modulo 2^32
        Ipv4Address(self.0.wrapping_add(offset as u32))
    }

    fn sub_offset(self, offset: i64) -> Self {
        Ipv4Address(self.0.wrapping_sub(offset as u32))
    }

    fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }
}

impl FromStr for Ipv4Address {
    type Err = NetError;

    /// Parse exactly four dot-separated decimal octets.
    ///
    /// Leading zeros are accepted (`01.002.00003.4`); signs, hex and
    /// surrounding whitespace are not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NetError::parse("IPv4 address", s);

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 4 {
            return Err(invalid());
        }

        let mut value = 0u32;
        for part in parts {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let digits = part.trim_start_matches('0');
            let octet: u8 = if digits.is_empty() {
                0
            } else {
                digits.parse().map_err(|_| invalid())?
            };
            value = (value << 8) | octet as u32;
        }
        Ok(Ipv4Address(value))
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Ipv4Address(u32::from(addr))
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self {
        Ipv4Addr::from(addr.0)
    }
}

impl_bit_ops!(Ipv4Address);
impl_string_serde!(Ipv4Address);
