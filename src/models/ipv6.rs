//! IPv6 address type.
//!
//! Provides [`Ipv6Address`], a 128-bit address value with compressed
//! hex-colon parsing and formatting, wrapping arithmetic and bitwise operators.

use super::address::{impl_bit_ops, impl_string_serde, IpAddress};
use crate::error::NetError;
use itertools::Itertools;
use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

/// IPv6 address stored as a `u128`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv6Address(pub u128);

impl Ipv6Address {
    pub fn from_segments(segments: [u16; 8]) -> Self {
        let value = segments
            .iter()
            .fold(0u128, |acc, &seg| (acc << 16) | seg as u128);
        Ipv6Address(value)
    }

    /// The eight 16-bit groups, most significant first.
    pub fn segments(&self) -> [u16; 8] {
        let mut segments = [0u16; 8];
        for (i, seg) in segments.iter_mut().enumerate() {
            *seg = (self.0 >> (112 - 16 * i)) as u16;
        }
        segments
    }

    /// The address as a `u128`.
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Uncompressed form with every group padded to four hex digits.
    pub fn to_full_string(&self) -> String {
        self.segments()
            .iter()
            .map(|seg| format!("{seg:04x}"))
            .join(":")
    }

    /// Start and length of the longest run of zero groups (first one wins ties).
    fn longest_zero_run(segments: &[u16; 8]) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        let mut i = 0;
        while i < segments.len() {
            if segments[i] != 0 {
                i += 1;
                continue;
            }
            let start = i;
            while i < segments.len() && segments[i] == 0 {
                i += 1;
            }
            let len = i - start;
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((start, len));
            }
        }
        best
    }
}

impl IpAddress for Ipv6Address {
    const BYTES: usize = 16;
    type Octets = [u8; 16];

    fn octets(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    fn from_be_octets(octets: [u8; 16]) -> Self {
        Ipv6Address(u128::from_be_bytes(octets))
    }

    fn zero() -> Self {
        Ipv6Address(0)
    }

    fn wrapping_add(self, other: Self) -> Self {
        Ipv6Address(self.0.wrapping_add(other.0))
    }

    fn wrapping_sub(self, other: Self) -> Self {
        Ipv6Address(self.0.wrapping_sub(other.0))
    }

    fn add_offset(self, offset: i64) -> Self {
        // sign-extend so negative offsets wrap correctly
        Ipv6Address(self.0.wrapping_add(offset as i128 as u128))
    }

    fn sub_offset(self, offset: i64) -> Self {
        Ipv6Address(self.0.wrapping_sub(offset as i128 as u128))
    }

    fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }
}

/// Parse one group of hex digits; leading zeros may pad it past four digits.
fn parse_group(group: &str) -> Option<u16> {
    if group.is_empty() || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(group, 16).ok()
}

/// Parse colon-separated groups; an empty string yields no groups.
fn parse_groups(part: &str) -> Option<Vec<u16>> {
    if part.is_empty() {
        return Some(Vec::new());
    }
    part.split(':').map(parse_group).collect()
}

impl FromStr for Ipv6Address {
    type Err = NetError;

    /// Parse a full or `::`-compressed IPv6 address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NetError::parse("IPv6 address", s);

        let segments: Vec<u16> = match s.split_once("::") {
            Some((head, tail)) => {
                // "1::2::3" and ":::" both leave a "::" or stray ':' behind
                let head = parse_groups(head).ok_or_else(invalid)?;
                let tail = parse_groups(tail).ok_or_else(invalid)?;
                if head.len() + tail.len() > 7 {
                    return Err(invalid());
                }
                let zeros = 8 - head.len() - tail.len();
                head.into_iter()
                    .chain(std::iter::repeat(0).take(zeros))
                    .chain(tail)
                    .collect()
            }
            None => {
                let groups = parse_groups(s).ok_or_else(invalid)?;
                if groups.len() != 8 {
                    return Err(invalid());
                }
                groups
            }
        };

        let segments: [u16; 8] = segments.try_into().map_err(|_| invalid())?;
        Ok(Ipv6Address::from_segments(segments))
    }
}

impl fmt::Display for Ipv6Address {
    /// Lower-case hex groups with the longest zero run collapsed to `::`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let segments = self.segments();
        let hex = |segs: &[u16]| segs.iter().map(|seg| format!("{seg:x}")).join(":");

        match Ipv6Address::longest_zero_run(&segments) {
            Some((start, len)) => write!(
                f,
                "{}::{}",
                hex(&segments[..start]),
                hex(&segments[start + len..])
            ),
            None => write!(f, "{}", hex(&segments)),
        }
    }
}

impl From<Ipv6Addr> for Ipv6Address {
    fn from(addr: Ipv6Addr) -> Self {
        Ipv6Address(u128::from(addr))
    }
}

impl From<Ipv6Address> for Ipv6Addr {
    fn from(addr: Ipv6Address) -> Self {
        Ipv6Addr::from(addr.0)
    }
}

impl_bit_ops!(Ipv6Address);
impl_string_serde!(Ipv6Address);
