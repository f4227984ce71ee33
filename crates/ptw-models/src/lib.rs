//! # ptw-models
//!
//! Domain models for PTW RS.
//!
//! Users, permits and the actions that move a permit through its lifecycle.
//! Models are plain values; status changes are computed elsewhere and never
//! by mutating a shared permit in place.

pub use ptw_core::traits::{Id, Identifiable, UserContext};
pub use ptw_core::types::{DateRange, UserRole};

pub mod action;
pub mod catalog;
pub mod permit;
pub mod user;

pub use action::{Action, ActionKind, ActionPayload};
pub use permit::{Permit, PermitDraft, PermitFilter, PermitPatch, PermitStatus};
pub use user::User;
