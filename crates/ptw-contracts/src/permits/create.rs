//! Create contract for permits

use ptw_core::error::PtwError;
use ptw_core::result::PtwResult;
use ptw_core::types::UserRole;
use ptw_models::PermitDraft;

use super::base::PermitContentContract;
use crate::base::{Contract, UserContext, ValidationResult};

/// Contract for raising a new permit
///
/// Only workers request permits; everyone else reviews them.
pub struct CreatePermitContract<'a, U: UserContext> {
    user: &'a U,
    content: PermitContentContract,
}

impl<'a, U: UserContext> CreatePermitContract<'a, U> {
    pub fn new(user: &'a U) -> Self {
        Self {
            user,
            content: PermitContentContract::new(),
        }
    }

    pub fn user_allowed_to_create(&self) -> bool {
        self.user.has_role(UserRole::Worker)
    }

    /// Permission check, separate from content validation
    pub fn authorize(&self) -> PtwResult<()> {
        if self.user_allowed_to_create() {
            Ok(())
        } else {
            Err(PtwError::forbidden(format!(
                "{} users cannot create permits",
                self.user.role().display_name()
            )))
        }
    }

    pub fn user(&self) -> &'a U {
        self.user
    }
}

impl<'a, U: UserContext> Contract<PermitDraft> for CreatePermitContract<'a, U> {
    fn validate(&self, draft: &PermitDraft) -> ValidationResult {
        self.content.validate(draft)
    }

    fn is_writable(&self, attribute: &str) -> bool {
        self.content.is_writable(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ptw_models::User;

    fn draft() -> PermitDraft {
        let day = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        PermitDraft::new("Tank entry", "Plant 3", "Inspect tank", day, day)
            .with_hazard("Confined space")
            .with_precaution("Gas detection")
    }

    #[test]
    fn test_worker_can_create() {
        let user = User::worker("user1", "John Doe");
        let contract = CreatePermitContract::new(&user);

        assert!(contract.authorize().is_ok());
        assert!(contract.validate(&draft()).is_ok());
    }

    #[test]
    fn test_approver_roles_cannot_create() {
        for user in [
            User::supervisor("user2", "Jane Smith"),
            User::safety_officer("user3", "Mike Johnson"),
            User::admin("user4", "Sarah Williams"),
        ] {
            let err = CreatePermitContract::new(&user).authorize().unwrap_err();
            assert!(err.is_forbidden());
        }
    }
}
