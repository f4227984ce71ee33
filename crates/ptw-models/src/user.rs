//! User model

use ptw_core::traits::{Id, Identifiable, UserContext};
use ptw_core::types::UserRole;
use serde::{Deserialize, Serialize};

/// User entity
///
/// Immutable once created. A user is picked from a fixed roster at login;
/// there are no credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub role: UserRole,
}

impl User {
    pub fn new(id: impl Into<Id>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    pub fn worker(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self::new(id, name, UserRole::Worker)
    }

    pub fn supervisor(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self::new(id, name, UserRole::Supervisor)
    }

    pub fn safety_officer(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self::new(id, name, UserRole::SafetyOfficer)
    }

    pub fn admin(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self::new(id, name, UserRole::Admin)
    }
}

impl Identifiable for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl UserContext for User {
    fn user_id(&self) -> &str {
        &self.id
    }

    fn user_name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> UserRole {
        self.role
    }
}
