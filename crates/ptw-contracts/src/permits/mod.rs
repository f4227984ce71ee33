//! Permit contracts
//!
//! - content: field rules shared by create and update
//! - create: who may raise a permit
//! - transition: the lifecycle state table and its role gating

mod base;
mod create;
mod transition;

pub use base::PermitContentContract;
pub use create::CreatePermitContract;
pub use transition::{rule_for, TransitionContract, TransitionRule, RULES, WITHDRAWN_COMMENT};
