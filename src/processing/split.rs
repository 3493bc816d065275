//! Variable-length subnetting (VLSM).
//!
//! Packs one subnet per host-count demand into a CIDR network, largest
//! demand first, and reports the address space left over.

use super::derange::derange;
use crate::error::{NetError, Result};
use crate::models::{IpAddress, Network};
use itertools::Itertools;
use num_bigint::{BigInt, BigUint};

/// Split a CIDR network into one subnet per host-count demand.
///
/// Demands are placed largest first (ties keep their input order), each in
/// the smallest block with at least that many usable hosts, one block after
/// another from the network's base address.
///
/// # Arguments
/// * `network` - The network to split; its mask must be contiguous
/// * `demands` - Requested host counts
///
/// # Returns
/// One subnet per demand, in the same order as `demands`.
///
/// # Errors
/// * [`NetError::InvalidMask`] when `network` has a scattered mask
/// * [`NetError::InsufficientSpace`] when the demands do not fit
pub fn split<A: IpAddress>(network: &Network<A>, demands: &[BigUint]) -> Result<Vec<Network<A>>> {
    if network.cidr_prefix().is_none() {
        return Err(NetError::InvalidMask(network.mask().to_string()));
    }
    let insufficient = || NetError::InsufficientSpace {
        network: network.to_string(),
        demands: demands.len(),
    };

    let width = A::bit_width();
    let by_size = demands
        .iter()
        .map(|demand| BigInt::from(demand.clone()))
        .enumerate()
        .sorted_by(|(_, a), (_, b)| b.cmp(a));

    let mut assigned: Vec<Option<Network<A>>> = vec![None; demands.len()];
    let mut cursor = Network::from_cidr(network.base(), width)?;

    for (index, demand) in by_size {
        let mut prefix = width;
        while cursor.host_count() < demand {
            if prefix == 0 {
                log::debug!("split: {demand} hosts do not fit in any block");
                return Err(insufficient());
            }
            prefix -= 1;
            cursor = Network::from_cidr(cursor.base(), prefix)?;
        }

        if !network.is_superset_of(&cursor) {
            log::debug!("split: {cursor} for {demand} hosts runs outside {network}");
            return Err(insufficient());
        }

        log::debug!("split: demand #{index} ({demand} hosts) -> {cursor}");
        assigned[index] = Some(cursor);
        cursor = Network::from_cidr(cursor.next_subnet_base(), width)?;
    }

    assigned.into_iter().collect::<Option<Vec<_>>>().ok_or_else(insufficient)
}

/// The CIDR blocks of `network` left over after `subnets` were carved from it.
///
/// Covers everything after the highest address used by `subnets`; returns
/// the whole network when `subnets` is empty.
pub fn unused_after_split<A: IpAddress>(
    network: &Network<A>,
    subnets: &[Network<A>],
) -> Result<Vec<Network<A>>> {
    let last = network.last_address();
    match subnets.iter().map(|s| s.last_address()).max() {
        None => derange(network.base(), last),
        Some(max_used) if max_used >= last => Ok(Vec::new()),
        Some(max_used) => derange(max_used.add_offset(1), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4Address, Ipv6Address};

    fn counts(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    fn strings<A: IpAddress>(networks: &[Network<A>]) -> Vec<String> {
        networks.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_split_descending_demands() {
        let net: Network<Ipv4Address> = "10.0.0.0/24".parse().unwrap();
        let subnets = split(&net, &counts(&[100, 50, 20])).unwrap();
        assert_eq!(
            strings(&subnets),
            vec!["10.0.0.0/25", "10.0.0.128/26", "10.0.0.192/27"]
        );
        assert_eq!(
            strings(&unused_after_split(&net, &subnets).unwrap()),
            vec!["10.0.0.224/27"]
        );
    }

    #[test]
    fn test_split_keeps_input_order() {
        let net: Network<Ipv4Address> = "10.0.0.0/24".parse().unwrap();
        let subnets = split(&net, &counts(&[20, 100, 50])).unwrap();
        assert_eq!(
            strings(&subnets),
            vec!["10.0.0.192/27", "10.0.0.0/25", "10.0.0.128/26"]
        );
    }

    #[test]
    fn test_split_ties_are_stable() {
        let net: Network<Ipv4Address> = "192.168.0.0/24".parse().unwrap();
        let subnets = split(&net, &counts(&[60, 60, 60])).unwrap();
        assert_eq!(
            strings(&subnets),
            vec!["192.168.0.0/26", "192.168.0.64/26", "192.168.0.128/26"]
        );
    }

    #[test]
    fn test_split_does_not_fit() {
        let net: Network<Ipv4Address> = "10.0.0.0/30".parse().unwrap();
        assert_eq!(
            split(&net, &counts(&[10])).unwrap_err(),
            NetError::InsufficientSpace {
                network: "10.0.0.0/30".to_string(),
                demands: 1
            }
        );

        let net: Network<Ipv4Address> = "10.0.0.0/24".parse().unwrap();
        assert!(split(&net, &counts(&[126, 126, 1])).is_err());
    }

    #[test]
    fn test_split_exact_fit() {
        let net: Network<Ipv4Address> = "10.0.0.0/24".parse().unwrap();
        let subnets = split(&net, &counts(&[126, 126])).unwrap();
        assert_eq!(strings(&subnets), vec!["10.0.0.0/25", "10.0.0.128/25"]);
        assert!(unused_after_split(&net, &subnets).unwrap().is_empty());
    }

    #[test]
    fn test_split_small_demands() {
        // zero hosts still takes a /31, one or two hosts a /30
        let net: Network<Ipv4Address> = "10.0.0.0/29".parse().unwrap();
        let subnets = split(&net, &counts(&[0, 2])).unwrap();
        assert_eq!(strings(&subnets), vec!["10.0.0.4/31", "10.0.0.0/30"]);
        assert_eq!(
            strings(&unused_after_split(&net, &subnets).unwrap()),
            vec!["10.0.0.6/31"]
        );
    }

    #[test]
    fn test_split_no_demands() {
        let net: Network<Ipv4Address> = "10.0.0.0/24".parse().unwrap();
        assert!(split(&net, &[]).unwrap().is_empty());
        assert_eq!(
            strings(&unused_after_split(&net, &[]).unwrap()),
            vec!["10.0.0.0/24"]
        );
    }

    #[test]
    fn test_split_rejects_scattered_mask() {
        let net: Network<Ipv4Address> = "10.0.0.0/255.0.255.0".parse().unwrap();
        assert_eq!(
            split(&net, &counts(&[10])).unwrap_err(),
            NetError::InvalidMask("255.0.255.0".to_string())
        );
    }

    #[test]
    fn test_split_ipv6() {
        let net: Network<Ipv6Address> = "2001:db8::/64".parse().unwrap();
        let huge = BigUint::from(1u8) << 62usize;
        let subnets = split(&net, &[huge, BigUint::from(1000u32)]).unwrap();
        assert_eq!(
            strings(&subnets),
            vec!["2001:db8::/65", "2001:db8:0:0:8000::/118"]
        );
    }
}
