//! # Pingado Core
//!
//! The network-discovery engine.
//!
//! * **[`prober`]**: reachability probes against a single address.
//! * **[`sweeper`]**: concurrent sweeps over every host of a subnet.
//! * **[`session`]**: the operations exposed to front ends.

pub mod prober;
pub mod session;
pub mod sweeper;
