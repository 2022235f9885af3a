//! # Pingado Common
//!
//! Models and pure logic shared by the discovery engine and its front ends.
//!
//! * **[`network`]**: interfaces, address math and probe/scan result models.
//! * **[`config`]**: runtime settings collected from the command line.
//! * **[`error`]**: the error taxonomy surfaced to callers.

pub mod config;
pub mod error;
pub mod network;
