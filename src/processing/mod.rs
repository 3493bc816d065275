//! Network set algorithms.
//!
//! This module contains the operations built on top of [`crate::models`]:
//! - [`derange`] - Address range to CIDR blocks
//! - [`minimize`] - Smallest covering set of a network list
//! - [`split`] - VLSM partition by host-count demands
//! - [`resize`] - Reslice a network to a different mask
//! - [`enumerate`] - List the host addresses of a network

mod derange;
mod enumerate;
mod minimize;
mod resize;
mod split;

// Re-export public functions
pub use derange::derange;
pub use enumerate::{enumerate, HostIter};
pub use minimize::minimize;
pub use resize::{resize, resize_to_prefix, ResizeResult};
pub use split::{split, unused_after_split};
