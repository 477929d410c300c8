//! tripmate: plan trips with friends.
//!
//! Random seat pairs and capacity-bounded rooms ([`domain::grouping`]),
//! an expense log with equal-split settlement ([`domain::ledger`]), and a
//! JSON file store behind the [`infrastructure::traits::TripStore`] port.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
