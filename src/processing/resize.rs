//! Reslicing a network to a different mask.

use crate::error::Result;
use crate::models::{unravel, weave, IpAddress, Network};
use std::cmp::Ordering;

/// Outcome of [`resize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResizeResult<A: IpAddress> {
    /// The new mask has more host bits: the one network containing the old one.
    Supernet(Network<A>),
    /// Same number of host bits, possibly arranged differently.
    Same(Network<A>),
    /// Fewer host bits: the networks tiling the old one, in order.
    Subnets(Vec<Network<A>>),
}

impl<A: IpAddress> ResizeResult<A> {
    /// How the new network size compares to the old one: `Less` for a
    /// supernet, `Equal` for a same-size reslice, `Greater` for subdivision.
    pub fn comparison(&self) -> Ordering {
        match self {
            ResizeResult::Supernet(_) => Ordering::Less,
            ResizeResult::Same(_) => Ordering::Equal,
            ResizeResult::Subnets(_) => Ordering::Greater,
        }
    }

    /// The resulting networks as a list.
    pub fn networks(&self) -> Vec<Network<A>> {
        match self {
            ResizeResult::Supernet(net) | ResizeResult::Same(net) => vec![*net],
            ResizeResult::Subnets(nets) => nets.clone(),
        }
    }
}

/// Resize `network` to `new_mask`.
///
/// Works in unraveled space, so scattered old and new masks are handled the
/// same way as CIDR masks.
pub fn resize<A: IpAddress>(network: &Network<A>, new_mask: A) -> Result<ResizeResult<A>> {
    let old_host_bits = network.host_bits();
    let target = Network::from_mask(A::zero(), new_mask);
    let (new_host_bits, new_net_bits) = (target.host_bits(), target.network_bits());
    let unraveled_base = network.unraveled_base();
    log::debug!(
        "resize {network} to mask {new_mask}: host bits {old_host_bits} -> {new_host_bits}"
    );

    let result = match new_host_bits.cmp(&old_host_bits) {
        Ordering::Greater => {
            let canonical = Network::from_cidr(unraveled_base, new_net_bits)?;
            ResizeResult::Supernet(Network::from_mask(
                weave(canonical.base(), new_mask),
                new_mask,
            ))
        }
        Ordering::Equal => {
            ResizeResult::Same(Network::from_mask(weave(unraveled_base, new_mask), new_mask))
        }
        Ordering::Less => {
            let unraveled_last = unravel(network.last_address(), network.mask());
            let mut subnets = Vec::new();
            let mut cursor = unraveled_base;
            loop {
                let canonical = Network::from_cidr(cursor, new_net_bits)?;
                subnets.push(Network::from_mask(
                    weave(canonical.base(), new_mask),
                    new_mask,
                ));
                if canonical.last_address() >= unraveled_last {
                    break;
                }
                cursor = canonical.last_address().add_offset(1);
            }
            ResizeResult::Subnets(subnets)
        }
    };
    Ok(result)
}

/// Resize `network` to a CIDR prefix length.
pub fn resize_to_prefix<A: IpAddress>(network: &Network<A>, prefix: u32) -> Result<ResizeResult<A>> {
    let mask = A::mask_from_cidr(prefix)?;
    resize(network, mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetError;
    use crate::models::{Ipv4Address, Ipv6Address};

    fn net(spec: &str) -> Network<Ipv4Address> {
        spec.parse().unwrap()
    }

    fn strings<A: IpAddress>(networks: &[Network<A>]) -> Vec<String> {
        networks.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_subdivide() {
        let result = resize_to_prefix(&net("10.0.0.0/24"), 26).unwrap();
        assert_eq!(result.comparison(), Ordering::Greater);
        assert_eq!(
            strings(&result.networks()),
            vec![
                "10.0.0.0/26",
                "10.0.0.64/26",
                "10.0.0.128/26",
                "10.0.0.192/26"
            ]
        );
    }

    #[test]
    fn test_supernet() {
        let result = resize_to_prefix(&net("10.0.5.0/24"), 22).unwrap();
        assert_eq!(result.comparison(), Ordering::Less);
        assert_eq!(result, ResizeResult::Supernet(net("10.0.4.0/22")));
    }

    #[test]
    fn test_same_size() {
        let result = resize_to_prefix(&net("10.0.5.0/24"), 24).unwrap();
        assert_eq!(result.comparison(), Ordering::Equal);
        assert_eq!(result.networks(), vec![net("10.0.5.0/24")]);
    }

    #[test]
    fn test_same_size_scattered() {
        // the host byte moves from the last octet to the third
        let result = resize(&net("10.0.5.0/24"), Ipv4Address::new(255, 255, 0, 255)).unwrap();
        assert_eq!(result, ResizeResult::Same(net("10.0.0.5/255.255.0.255")));
    }

    #[test]
    fn test_supernet_from_scattered() {
        let result = resize_to_prefix(&net("10.1.0.0/255.255.0.255"), 16).unwrap();
        assert_eq!(result, ResizeResult::Supernet(net("10.1.0.0/16")));
    }

    #[test]
    fn test_subdivide_to_host_routes() {
        let result = resize_to_prefix(&net("10.0.0.4/30"), 32).unwrap();
        assert_eq!(
            strings(&result.networks()),
            vec!["10.0.0.4/32", "10.0.0.5/32", "10.0.0.6/32", "10.0.0.7/32"]
        );
    }

    #[test]
    fn test_subdivide_top_of_address_space() {
        let result = resize_to_prefix(&net("255.255.255.0/24"), 25).unwrap();
        assert_eq!(
            strings(&result.networks()),
            vec!["255.255.255.0/25", "255.255.255.128/25"]
        );
    }

    #[test]
    fn test_prefix_out_of_range() {
        assert_eq!(
            resize_to_prefix(&net("10.0.0.0/24"), 40).unwrap_err(),
            NetError::PrefixOutOfRange { prefix: 40, max: 32 }
        );
    }

    #[test]
    fn test_ipv6_subdivide() {
        let network: Network<Ipv6Address> = "2001:db8::/47".parse().unwrap();
        let result = resize_to_prefix(&network, 48).unwrap();
        assert_eq!(
            strings(&result.networks()),
            vec!["2001:db8::/48", "2001:db8:1::/48"]
        );
    }
}
