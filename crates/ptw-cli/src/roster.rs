//! Built-in users offered at login

use ptw_models::User;
use ptw_services::UserDirectory;

pub fn users() -> Vec<User> {
    vec![
        User::worker("user1", "John Doe"),
        User::supervisor("user2", "Jane Smith"),
        User::safety_officer("user3", "Mike Johnson"),
        User::admin("user4", "Sarah Williams"),
    ]
}

pub fn directory() -> UserDirectory {
    UserDirectory::new(users())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptw_models::UserRole;

    #[test]
    fn test_one_user_per_role() {
        let dir = directory();
        for role in UserRole::ALL {
            assert_eq!(dir.by_role(role).len(), 1, "{:?}", role);
        }
        assert_eq!(dir.find("user3").unwrap().role, UserRole::SafetyOfficer);
    }
}
