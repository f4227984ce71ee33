//! Lifecycle actions

use serde::{Deserialize, Serialize};
use std::fmt;

/// An action a user takes on an existing permit, with its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    Approve {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
    Reject {
        #[serde(default)]
        reason: String,
    },
    Withdraw,
    StartWork,
    CompleteWork {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
}

/// Payload-free discriminant of [`Action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Approve,
    Reject,
    Withdraw,
    StartWork,
    CompleteWork,
}

/// Loose payload fields, as collected by a form or script
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPayload {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Action {
    pub fn approve() -> Self {
        Self::Approve { comment: None }
    }

    pub fn approve_with(comment: impl Into<String>) -> Self {
        Self::Approve {
            comment: Some(comment.into()),
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self::Reject {
            reason: reason.into(),
        }
    }

    pub fn complete() -> Self {
        Self::CompleteWork { notes: None }
    }

    pub fn complete_with(notes: impl Into<String>) -> Self {
        Self::CompleteWork {
            notes: Some(notes.into()),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Approve { .. } => ActionKind::Approve,
            Self::Reject { .. } => ActionKind::Reject,
            Self::Withdraw => ActionKind::Withdraw,
            Self::StartWork => ActionKind::StartWork,
            Self::CompleteWork { .. } => ActionKind::CompleteWork,
        }
    }

    /// Build the tagged action from a kind and loose payload.
    ///
    /// Fields that do not belong to the kind are ignored. A Reject without
    /// a reason carries an empty one and fails later as blank.
    pub fn from_kind(kind: ActionKind, payload: ActionPayload) -> Self {
        match kind {
            ActionKind::Approve => Self::Approve {
                comment: payload.comment,
            },
            ActionKind::Reject => Self::Reject {
                reason: payload.reason.unwrap_or_default(),
            },
            ActionKind::Withdraw => Self::Withdraw,
            ActionKind::StartWork => Self::StartWork,
            ActionKind::CompleteWork => Self::CompleteWork {
                notes: payload.notes,
            },
        }
    }
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Approve,
        ActionKind::Reject,
        ActionKind::Withdraw,
        ActionKind::StartWork,
        ActionKind::CompleteWork,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Withdraw => "withdraw",
            Self::StartWork => "startWork",
            Self::CompleteWork => "completeWork",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::Withdraw => "Withdraw",
            Self::StartWork => "Start Work",
            Self::CompleteWork => "Complete Work",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
