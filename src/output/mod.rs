//! Output formatting for network reports.
//!
//! This module handles formatting results for display:
//! - [`show_net`] - The "show network" report as styled tokens
//! - [`terminal`] - Terminal output with colors

pub mod show_net;
pub mod terminal;

pub use show_net::{show_network, Line, NetworkSummary, Style, Token};
pub use terminal::{pad_field, render};
