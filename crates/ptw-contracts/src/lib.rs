//! # ptw-contracts
//!
//! Contract validation for PTW RS.
//!
//! Contracts check permit content before it is stored and decide whether
//! an actor may move a permit from one status to the next.

pub mod base;
pub mod permits;

pub use base::*;
