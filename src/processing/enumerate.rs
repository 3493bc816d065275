//! Host address enumeration.

use crate::models::{unravel, weave, IpAddress, Network};

/// Iterator over the usable host addresses of a network.
///
/// Walks unraveled space from the first to the last host, so scattered
/// masks are listed in network-major order.
pub struct HostIter<A: IpAddress> {
    current: Option<A>,
    last: A,
    mask: A,
}

impl<A: IpAddress> HostIter<A> {
    fn new(network: &Network<A>) -> Self {
        let mask = network.mask();
        match (network.first_host(), network.last_host()) {
            (Some(first), Some(last)) => HostIter {
                current: Some(unravel(first, mask)),
                last: unravel(last, mask),
                mask,
            },
            _ => HostIter {
                current: None,
                last: network.base(),
                mask,
            },
        }
    }
}

impl<A: IpAddress> Iterator for HostIter<A> {
    type Item = A;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = if current == self.last {
            None
        } else {
            Some(current.add_offset(1))
        };
        Some(weave(current, self.mask))
    }
}

/// List every usable host of `network`, from `first_host` to `last_host`.
///
/// Note: a large network (an IPv6 /64, say) yields a practically endless
/// sequence; take only what is needed.
pub fn enumerate<A: IpAddress>(network: &Network<A>) -> HostIter<A> {
    HostIter::new(network)
}
