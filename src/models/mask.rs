//! Conversions between CIDR prefix lengths and subnet mask byte patterns.

use crate::error::{NetError, Result};

/// The partial mask bytes with 1-7 leading set bits.
const PARTIAL_MASK_BYTES: [u8; 7] = [0x80, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC, 0xFE];

/// Build a subnet mask of `width_bytes` bytes with `prefix` leading one bits.
///
/// # Examples
/// ```
/// use subnet_calc::models::mask_bytes_from_cidr;
/// assert_eq!(mask_bytes_from_cidr(4, 20).unwrap(), vec![0xFF, 0xFF, 0xF0, 0x00]);
/// ```
pub fn mask_bytes_from_cidr(width_bytes: usize, prefix: u32) -> Result<Vec<u8>> {
    let max = 8 * width_bytes as u32;
    if prefix > max {
        return Err(NetError::PrefixOutOfRange { prefix, max });
    }

    let mut remaining = prefix;
    let mut bytes = vec![0x00; width_bytes];
    for byte in bytes.iter_mut() {
        match remaining {
            0 => break,
            1..=7 => {
                *byte = PARTIAL_MASK_BYTES[remaining as usize - 1];
                break;
            }
            _ => {
                *byte = 0xFF;
                remaining -= 8;
            }
        }
    }
    Ok(bytes)
}

/// Prefix length of a canonical partial byte, or `None` for any other value.
fn partial_byte_prefix(byte: u8) -> Option<u32> {
    PARTIAL_MASK_BYTES
        .iter()
        .position(|&b| b == byte)
        .map(|i| i as u32 + 1)
}

/// Return the CIDR prefix described by a mask, or `None` if the mask is scattered.
///
/// Only `FF.. [partial] 00..` shaped masks have a prefix.
pub fn cidr_from_mask_bytes(bytes: &[u8]) -> Option<u32> {
    let mut prefix = 0;
    let mut tail_started = false;

    for &byte in bytes {
        match byte {
            0xFF if tail_started => return None,
            0xFF => prefix += 8,
            0x00 => tail_started = true,
            _ if tail_started => return None,
            _ => {
                prefix += partial_byte_prefix(byte)?;
                tail_started = true;
            }
        }
    }
    Some(prefix)
}

/// Number of set bits across a byte sequence.
pub fn pop_count(bytes: &[u8]) -> u32 {
    bytes.iter().map(|b| b.count_ones()).sum()
}
