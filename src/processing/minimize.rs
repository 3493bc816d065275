//! Network list minimization.
//!
//! Reduces a list of networks to the smallest set covering the same
//! addresses: duplicates collapse, subsets are dropped, and adjacent
//! equal-mask siblings are merged into their parent until nothing changes.

use crate::models::{IpAddress, Network};
use std::collections::BTreeSet;

/// Drop every network that is a strict subset of another one in the set.
fn eliminate_subsets<A: IpAddress>(networks: &BTreeSet<Network<A>>) -> BTreeSet<Network<A>> {
    networks
        .iter()
        .filter(|net| {
            let covered = networks
                .iter()
                .any(|other| other != *net && other.is_superset_of(net));
            if covered {
                log::debug!("minimize: dropping {net}, covered by a larger network");
            }
            !covered
        })
        .copied()
        .collect()
}

/// Find the first mergeable pair in `(base, mask)` order and return the pair
/// and the network replacing them.
fn find_merge<A: IpAddress>(
    networks: &BTreeSet<Network<A>>,
) -> Option<(Network<A>, Network<A>, Network<A>)> {
    let sorted: Vec<&Network<A>> = networks.iter().collect();

    for (i, lower) in sorted.iter().enumerate() {
        for upper in &sorted[i + 1..] {
            if lower.mask() != upper.mask() {
                continue;
            }
            if lower.last_address().add_offset(1) != upper.base() {
                continue;
            }
            // siblings differ in exactly one base bit
            let differing = lower.base() ^ upper.base();
            if differing.count_ones() != 1 {
                continue;
            }

            let merged = Network::from_mask(lower.base(), lower.mask() & !differing);
            debug_assert!(merged.is_superset_of(lower) && merged.is_superset_of(upper));
            return Some((**lower, **upper, merged));
        }
    }
    None
}

/// Minimize a list of networks.
///
/// # Arguments
/// * `networks` - The networks to combine, in any order, duplicates allowed
///
/// # Returns
/// The minimized networks sorted by base address, then mask. Running the
/// result through `minimize` again returns it unchanged.
pub fn minimize<A: IpAddress>(networks: &[Network<A>]) -> Vec<Network<A>> {
    let mut current: BTreeSet<Network<A>> = networks.iter().copied().collect();
    log::debug!(
        "minimize: {} network(s), {} distinct",
        networks.len(),
        current.len()
    );

    loop {
        let mut changed = false;

        let filtered = eliminate_subsets(&current);
        if filtered.len() != current.len() {
            changed = true;
            current = filtered;
        }

        while let Some((lower, upper, merged)) = find_merge(&current) {
            log::debug!("minimize: merging {lower} and {upper} into {merged}");
            current.remove(&lower);
            current.remove(&upper);
            current.insert(merged);
            changed = true;
        }

        if !changed {
            break;
        }
    }

    current.into_iter().collect()
}
