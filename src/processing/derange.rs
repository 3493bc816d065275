//! Address range decomposition.
//!
//! Covers an arbitrary `[first, last]` address range with the shortest
//! ordered list of aligned CIDR blocks.

use crate::error::Result;
use crate::models::{IpAddress, Network};

/// Find the biggest CIDR block that starts at `start` and ends at or before `last`.
///
/// Grows from a host route one prefix bit at a time until the larger block
/// would either start below `start` (misaligned) or run past `last`.
fn find_biggest_block<A: IpAddress>(start: A, last: A) -> Result<Network<A>> {
    let mut block = Network::from_cidr(start, A::bit_width())?;
    let mut prefix = A::bit_width();

    while prefix > 0 {
        let larger = Network::from_cidr(start, prefix - 1)?;
        if larger.base() != start || larger.last_address() > last {
            break;
        }
        block = larger;
        prefix -= 1;
    }
    Ok(block)
}

/// Decompose the range between two addresses into CIDR blocks.
///
/// The endpoints may be given in either order; both are included.
///
/// # Arguments
/// * `one` - One end of the range
/// * `two` - The other end of the range
///
/// # Returns
/// The blocks in ascending address order, covering exactly the range.
pub fn derange<A: IpAddress>(one: A, two: A) -> Result<Vec<Network<A>>> {
    let first = one.min(two);
    let last = one.max(two);
    log::debug!("derange({first}, {last})");

    let mut blocks = Vec::new();
    let mut current = first;
    loop {
        let block = find_biggest_block(current, last)?;
        log::trace!("derange block {block}");
        blocks.push(block);

        // stop on reaching `last`; `+ 1` would wrap at the top of the address space
        if block.last_address() >= last {
            break;
        }
        current = block.last_address().add_offset(1);
    }
    Ok(blocks)
}
