//! Bit permutation between address space and "canonical" space.
//!
//! A scattered mask such as `255.0.255.0` spreads the network bits over the
//! address. [`unravel`] gathers the network bits to the front and the host
//! bits to the back, so the network behaves like a contiguous CIDR block and
//! ordinary integer arithmetic applies. [`weave`] scatters the bits back.
//! Both are the identity for contiguous masks.

use super::address::IpAddress;

/// Bit `index` of a big-endian byte string, counting from the MSB.
fn bit_at(bytes: &[u8], index: usize) -> bool {
    bytes[index / 8] & (0x80 >> (index % 8)) != 0
}

/// Pack an MSB-first bit sequence into an address.
fn pack<A: IpAddress>(bits: impl Iterator<Item = bool>) -> A {
    let mut octets = A::Octets::default();
    let bytes = octets.as_mut();
    for (i, bit) in bits.enumerate() {
        if bit {
            bytes[i / 8] |= 0x80 >> (i % 8);
        }
    }
    A::from_be_octets(octets)
}

/// Move the bits of `addr` selected by `mask` to the front, keeping their order,
/// followed by the remaining bits in order.
pub fn unravel<A: IpAddress>(addr: A, mask: A) -> A {
    if mask.cidr_prefix().is_some() {
        return addr;
    }

    let width = A::bit_width() as usize;
    let addr_octets = addr.octets();
    let mask_octets = mask.octets();
    let (addr_bytes, mask_bytes) = (addr_octets.as_ref(), mask_octets.as_ref());

    let net_bits = (0..width)
        .filter(|&i| bit_at(mask_bytes, i))
        .map(|i| bit_at(addr_bytes, i));
    let host_bits = (0..width)
        .filter(|&i| !bit_at(mask_bytes, i))
        .map(|i| bit_at(addr_bytes, i));
    pack(net_bits.chain(host_bits))
}

/// Inverse of [`unravel`]: the first `popcount(mask)` bits of `addr` go to the
/// one-positions of `mask`, the rest to its zero-positions.
pub fn weave<A: IpAddress>(addr: A, mask: A) -> A {
    if mask.cidr_prefix().is_some() {
        return addr;
    }

    let width = A::bit_width() as usize;
    let net_width = mask.count_ones() as usize;
    let addr_octets = addr.octets();
    let mask_octets = mask.octets();
    let (addr_bytes, mask_bytes) = (addr_octets.as_ref(), mask_octets.as_ref());

    let mut net_bits = (0..net_width).map(|i| bit_at(addr_bytes, i));
    let mut host_bits = (net_width..width).map(|i| bit_at(addr_bytes, i));
    pack((0..width).map(|i| {
        let next = if bit_at(mask_bytes, i) {
            net_bits.next()
        } else {
            host_bits.next()
        };
        // both iterators hold exactly as many bits as there are positions
        next.unwrap_or(false)
    }))
}
