//! Lifecycle engine
//!
//! Plans permit status changes. The engine never touches stored state: it
//! reads a permit, runs the transition contract and returns a
//! [`Transition`] describing the change. The store applies it.

use chrono::{DateTime, Utc};
use ptw_contracts::permits::{TransitionContract, WITHDRAWN_COMMENT};
use ptw_core::config::LifecyclePolicy;
use ptw_core::result::PtwResult;
use ptw_core::traits::{Id, UserContext};
use ptw_models::{Action, ActionKind, Permit, PermitStatus};

/// A permitted status change, planned against a permit in status `from`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    permit_id: Id,
    action: ActionKind,
    from: PermitStatus,
    to: PermitStatus,
    approved_by: Option<String>,
    approved_date: Option<DateTime<Utc>>,
    comments: Option<String>,
}

impl Transition {
    pub fn permit_id(&self) -> &str {
        &self.permit_id
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn from(&self) -> PermitStatus {
        self.from
    }

    pub fn to(&self) -> PermitStatus {
        self.to
    }

    /// New value of `permit` once this transition is applied.
    ///
    /// Approval and comment fields are only overwritten when the transition
    /// sets them.
    pub fn apply_to(&self, permit: &Permit) -> Permit {
        let mut next = permit.clone();
        next.status = self.to;
        if let Some(approved_by) = &self.approved_by {
            next.approved_by = Some(approved_by.clone());
        }
        if let Some(approved_date) = self.approved_date {
            next.approved_date = Some(approved_date);
        }
        if let Some(comments) = &self.comments {
            next.comments = Some(comments.clone());
        }
        next
    }
}

/// Plans transitions under a lifecycle policy
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleEngine {
    policy: LifecyclePolicy,
}

impl LifecycleEngine {
    pub fn new(policy: LifecyclePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LifecyclePolicy {
        self.policy
    }

    pub fn plan<U: UserContext>(
        &self,
        permit: &Permit,
        actor: &U,
        action: &Action,
    ) -> PtwResult<Transition> {
        self.plan_at(permit, actor, action, Utc::now())
    }

    /// Plan with an explicit clock reading
    pub fn plan_at<U: UserContext>(
        &self,
        permit: &Permit,
        actor: &U,
        action: &Action,
        now: DateTime<Utc>,
    ) -> PtwResult<Transition> {
        let rule = TransitionContract::new(actor, self.policy).check(permit, action)?;

        let mut transition = Transition {
            permit_id: permit.id.clone(),
            action: rule.action,
            from: rule.from,
            to: rule.to,
            approved_by: None,
            approved_date: None,
            comments: None,
        };

        match action {
            Action::Approve { comment } => {
                transition.approved_by = Some(actor.user_name().to_string());
                transition.approved_date = Some(now);
                transition.comments = non_blank(comment.as_deref());
            }
            Action::Reject { reason } => {
                transition.comments = Some(reason.trim().to_string());
            }
            Action::CompleteWork { notes } => {
                transition.comments = non_blank(notes.as_deref());
            }
            Action::Withdraw => {
                transition.comments = Some(WITHDRAWN_COMMENT.to_string());
            }
            Action::StartWork => {}
        }

        Ok(transition)
    }

    /// Plan and return the resulting permit value without storing it
    pub fn apply<U: UserContext>(
        &self,
        permit: &Permit,
        actor: &U,
        action: &Action,
    ) -> PtwResult<Permit> {
        self.apply_at(permit, actor, action, Utc::now())
    }

    pub fn apply_at<U: UserContext>(
        &self,
        permit: &Permit,
        actor: &U,
        action: &Action,
        now: DateTime<Utc>,
    ) -> PtwResult<Permit> {
        let transition = self.plan_at(permit, actor, action, now)?;
        Ok(transition.apply_to(permit))
    }

    /// Actions the actor could take on this permit right now
    pub fn available_actions<U: UserContext>(&self, permit: &Permit, actor: &U) -> Vec<ActionKind> {
        TransitionContract::new(actor, self.policy).available_actions(permit)
    }
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
