//! User directory
//!
//! The fixed set of users an actor is picked from. Callers look the actor
//! up here and pass it into every service call.

use ptw_core::error::PtwError;
use ptw_core::result::PtwResult;
use ptw_core::traits::Identifiable;
use ptw_core::types::UserRole;
use ptw_models::User;

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn find(&self, id: &str) -> PtwResult<User> {
        self.users
            .iter()
            .find(|u| u.id() == id)
            .cloned()
            .ok_or_else(|| PtwError::not_found("User", id))
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn by_role(&self, role: UserRole) -> Vec<&User> {
        self.users.iter().filter(|u| u.role == role).collect()
    }
}

impl FromIterator<User> for UserDirectory {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> UserDirectory {
        UserDirectory::from_iter([
            User::worker("user1", "John Doe"),
            User::supervisor("user2", "Jane Smith"),
            User::worker("user5", "Tom Brown"),
        ])
    }

    #[test]
    fn test_find() {
        let dir = directory();
        assert_eq!(dir.find("user2").unwrap().name, "Jane Smith");
        assert!(dir.find("user9").unwrap_err().is_not_found());
    }

    #[test]
    fn test_by_role() {
        let dir = directory();
        let workers: Vec<_> = dir
            .by_role(UserRole::Worker)
            .into_iter()
            .map(|u| u.id.as_str())
            .collect();
        assert_eq!(workers, vec!["user1", "user5"]);
        assert!(dir.by_role(UserRole::Admin).is_empty());
        assert_eq!(dir.users().len(), 3);
    }
}
