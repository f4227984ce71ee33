//! Core traits shared by models, contracts, and services

use crate::types::UserRole;

/// Identifier type for users and permits (e.g. "user1", "PTW-001")
pub type Id = String;

/// Trait for entities that have an identifier once stored
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// The acting user, passed explicitly into every permission check
pub trait UserContext: Send + Sync {
    fn user_id(&self) -> &str;
    fn user_name(&self) -> &str;
    fn role(&self) -> UserRole;

    fn is_admin(&self) -> bool {
        self.role() == UserRole::Admin
    }

    /// Supervisors, safety officers, and admins may decide on pending permits
    fn is_approver(&self) -> bool {
        self.role().is_approver()
    }

    fn has_role(&self, role: UserRole) -> bool {
        self.role() == role
    }
}
