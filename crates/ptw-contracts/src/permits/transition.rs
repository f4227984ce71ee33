//! Transition contract for permits
//!
//! The lifecycle state table and the role, ownership and policy checks that
//! gate each row. Checks run in a fixed order so the same request always
//! fails the same way.

use ptw_core::config::LifecyclePolicy;
use ptw_core::error::PtwError;
use ptw_core::result::PtwResult;
use ptw_core::types::UserRole;
use ptw_models::{Action, ActionKind, Permit, PermitStatus};

use crate::base::UserContext;

/// Comment recorded on a withdrawn permit
pub const WITHDRAWN_COMMENT: &str = "Withdrawn by requester";

const APPROVERS: &[UserRole] = &[UserRole::Supervisor, UserRole::SafetyOfficer, UserRole::Admin];
const WORKERS: &[UserRole] = &[UserRole::Worker];

/// One row of the lifecycle table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub from: PermitStatus,
    pub action: ActionKind,
    pub roles: &'static [UserRole],
    /// Only the permit's requester may act
    pub requester_only: bool,
    pub to: PermitStatus,
}

impl TransitionRule {
    pub fn allows_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }
}

pub const RULES: &[TransitionRule] = &[
    TransitionRule {
        from: PermitStatus::Pending,
        action: ActionKind::Approve,
        roles: APPROVERS,
        requester_only: false,
        to: PermitStatus::Approved,
    },
    TransitionRule {
        from: PermitStatus::Pending,
        action: ActionKind::Reject,
        roles: APPROVERS,
        requester_only: false,
        to: PermitStatus::Rejected,
    },
    TransitionRule {
        from: PermitStatus::Pending,
        action: ActionKind::Withdraw,
        roles: WORKERS,
        requester_only: true,
        to: PermitStatus::Rejected,
    },
    TransitionRule {
        from: PermitStatus::Approved,
        action: ActionKind::StartWork,
        roles: WORKERS,
        requester_only: true,
        to: PermitStatus::InProgress,
    },
    TransitionRule {
        from: PermitStatus::InProgress,
        action: ActionKind::CompleteWork,
        roles: WORKERS,
        requester_only: true,
        to: PermitStatus::Completed,
    },
];

/// Row for a status and action, if the table has one
pub fn rule_for(from: PermitStatus, action: ActionKind) -> Option<&'static TransitionRule> {
    RULES.iter().find(|r| r.from == from && r.action == action)
}

/// Decides whether an actor may apply an action to a permit
pub struct TransitionContract<'a, U: UserContext> {
    user: &'a U,
    policy: LifecyclePolicy,
}

impl<'a, U: UserContext> TransitionContract<'a, U> {
    pub fn new(user: &'a U, policy: LifecyclePolicy) -> Self {
        Self { user, policy }
    }

    /// Run every check for `action` on `permit` and return the matching row
    pub fn check(&self, permit: &Permit, action: &Action) -> PtwResult<&'static TransitionRule> {
        let rule = self.authorize(permit, action.kind())?;
        self.validate_payload(action)?;
        Ok(rule)
    }

    /// State, role, ownership and policy checks; the payload is not looked at
    pub fn authorize(&self, permit: &Permit, kind: ActionKind) -> PtwResult<&'static TransitionRule> {
        let rule = rule_for(permit.status, kind).ok_or_else(|| {
            PtwError::invalid_transition(format!(
                "cannot {} a permit that is {}",
                kind,
                permit.status.label()
            ))
        })?;

        if kind == ActionKind::Withdraw && !self.policy.allow_withdraw {
            return Err(PtwError::invalid_transition("withdrawing permits is disabled"));
        }

        if !rule.allows_role(self.user.role()) {
            return Err(PtwError::forbidden(format!(
                "{} users cannot {} permits",
                self.user.role().display_name(),
                kind
            )));
        }

        if rule.requester_only && !permit.is_requested_by(self.user.user_id()) {
            return Err(PtwError::forbidden(format!(
                "only the requester of {} can {} it",
                permit.id, kind
            )));
        }

        if kind == ActionKind::Approve
            && self.policy.forbid_self_approval
            && permit.is_requested_by(self.user.user_id())
        {
            return Err(PtwError::forbidden("cannot approve your own permit"));
        }

        Ok(rule)
    }

    /// Actions `authorize` would accept for this permit, in table order
    pub fn available_actions(&self, permit: &Permit) -> Vec<ActionKind> {
        ActionKind::ALL
            .into_iter()
            .filter(|kind| self.authorize(permit, *kind).is_ok())
            .collect()
    }

    fn validate_payload(&self, action: &Action) -> PtwResult<()> {
        match action {
            Action::Reject { reason } if reason.trim().is_empty() => {
                Err(PtwError::validation("reason", "can't be blank"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use ptw_models::{PermitDraft, User};

    fn permit(status: PermitStatus) -> Permit {
        let day = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let draft = PermitDraft::new("Panel Fix", "A2", "Replace breakers", day, day)
            .with_hazard("Electrical")
            .with_precaution("Lockout/Tagout");
        let mut permit = Permit::from_draft("PTW-001", "user1", draft, Utc::now());
        permit.status = status;
        permit
    }

    fn requester() -> User {
        User::worker("user1", "John Doe")
    }

    fn other_worker() -> User {
        User::worker("user5", "Tom Brown")
    }

    fn supervisor() -> User {
        User::supervisor("user2", "Jane Smith")
    }

    fn contract(user: &User) -> TransitionContract<'_, User> {
        TransitionContract::new(user, LifecyclePolicy::default())
    }

    #[test]
    fn test_table_rows() {
        assert_eq!(
            rule_for(PermitStatus::Pending, ActionKind::Approve).map(|r| r.to),
            Some(PermitStatus::Approved)
        );
        assert_eq!(
            rule_for(PermitStatus::Approved, ActionKind::StartWork).map(|r| r.to),
            Some(PermitStatus::InProgress)
        );
        assert!(rule_for(PermitStatus::Approved, ActionKind::Approve).is_none());
        assert!(RULES.iter().all(|r| !r.from.is_terminal()));
    }

    #[test]
    fn test_approver_roles() {
        let pending = permit(PermitStatus::Pending);
        for user in [
            supervisor(),
            User::safety_officer("user3", "Mike Johnson"),
            User::admin("user4", "Sarah Williams"),
        ] {
            assert!(contract(&user).check(&pending, &Action::approve()).is_ok());
        }

        let err = contract(&requester()).check(&pending, &Action::approve()).unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn test_requester_only_rows() {
        let approved = permit(PermitStatus::Approved);

        assert!(contract(&requester()).check(&approved, &Action::StartWork).is_ok());

        let err = contract(&other_worker()).check(&approved, &Action::StartWork).unwrap_err();
        assert!(err.is_forbidden());

        let err = contract(&supervisor()).check(&approved, &Action::StartWork).unwrap_err();
        assert!(err.is_forbidden());

        let in_progress = permit(PermitStatus::InProgress);
        let err = contract(&other_worker())
            .check(&in_progress, &Action::complete())
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        let actors = [requester(), supervisor(), User::admin("user4", "Sarah Williams")];
        let actions = [
            Action::approve(),
            Action::reject("late"),
            Action::Withdraw,
            Action::StartWork,
            Action::complete(),
        ];

        for status in [PermitStatus::Completed, PermitStatus::Rejected] {
            let p = permit(status);
            for actor in &actors {
                for action in &actions {
                    let err = contract(actor).check(&p, action).unwrap_err();
                    assert!(err.is_invalid_transition(), "{:?} {:?}", status, action);
                }
            }
        }
    }

    #[test]
    fn test_state_checked_before_role() {
        // A worker approving an approved permit hits the missing row first
        let err = contract(&requester())
            .check(&permit(PermitStatus::Approved), &Action::approve())
            .unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn test_blank_reason() {
        let pending = permit(PermitStatus::Pending);

        let err = contract(&supervisor()).check(&pending, &Action::reject("  ")).unwrap_err();
        assert!(err.is_validation());
        assert!(err.validation_errors().unwrap().has_error("reason"));

        assert!(contract(&supervisor()).check(&pending, &Action::reject("unsafe")).is_ok());
    }

    #[test]
    fn test_role_checked_before_reason() {
        let err = contract(&requester())
            .check(&permit(PermitStatus::Pending), &Action::reject(""))
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn test_withdraw_policy() {
        let pending = permit(PermitStatus::Pending);
        assert!(contract(&requester()).check(&pending, &Action::Withdraw).is_ok());

        let err = contract(&other_worker()).check(&pending, &Action::Withdraw).unwrap_err();
        assert!(err.is_forbidden());

        let policy = LifecyclePolicy {
            allow_withdraw: false,
            ..LifecyclePolicy::default()
        };
        let user = requester();
        let err = TransitionContract::new(&user, policy)
            .check(&pending, &Action::Withdraw)
            .unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn test_self_approval_policy() {
        // An approver who is also recorded as requester
        let mut pending = permit(PermitStatus::Pending);
        pending.requester_id = "user2".to_string();
        let user = supervisor();

        assert!(contract(&user).check(&pending, &Action::approve()).is_ok());

        let policy = LifecyclePolicy {
            forbid_self_approval: true,
            ..LifecyclePolicy::default()
        };
        let err = TransitionContract::new(&user, policy)
            .check(&pending, &Action::approve())
            .unwrap_err();
        assert!(err.is_forbidden());

        // Rejecting your own permit stays allowed
        assert!(TransitionContract::new(&user, policy)
            .check(&pending, &Action::reject("duplicate"))
            .is_ok());
    }

    #[test]
    fn test_available_actions() {
        let pending = permit(PermitStatus::Pending);
        assert_eq!(
            contract(&supervisor()).available_actions(&pending),
            vec![ActionKind::Approve, ActionKind::Reject]
        );
        assert_eq!(
            contract(&requester()).available_actions(&pending),
            vec![ActionKind::Withdraw]
        );
        assert!(contract(&other_worker()).available_actions(&pending).is_empty());

        assert_eq!(
            contract(&requester()).available_actions(&permit(PermitStatus::Approved)),
            vec![ActionKind::StartWork]
        );
        assert!(contract(&requester())
            .available_actions(&permit(PermitStatus::Completed))
            .is_empty());
    }
}
