//! # ptw-services
//!
//! Business logic for PTW RS: the in-memory permit store, the lifecycle
//! engine that plans status changes, and the permit service callers talk to.

pub mod directory;
pub mod lifecycle;
pub mod permits;
pub mod stats;
pub mod store;

pub use directory::UserDirectory;
pub use lifecycle::{LifecycleEngine, Transition};
pub use permits::PermitService;
pub use stats::PermitStats;
pub use store::{MemoryPermitStore, PermitStore};
