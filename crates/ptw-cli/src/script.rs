//! Scenario scripts
//!
//! A script is a YAML list of steps run in order:
//!
//! ```yaml
//! steps:
//!   - create:
//!       as: user1
//!       draft:
//!         workTitle: Panel Fix
//!         location: Building A
//!         description: Replace breaker panel
//!         startDate: 2026-10-20
//!         endDate: 2026-10-21
//!         hazards: [Electrical]
//!         precautions: [Lockout/Tagout]
//!     expect: ok
//!   - act: { as: user2, permit: PTW-001, action: approve }
//!   - act: { as: user3, permit: PTW-001, action: reject, reason: "" }
//!     expect: validation_failed
//!   - list: { status: approved }
//!   - stats: { as: user4 }
//! ```

use ptw_models::{ActionKind, ActionPayload, PermitDraft, PermitFilter, PermitStatus};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    #[serde(flatten)]
    pub operation: Operation,

    /// `ok`, or the error code the step must fail with
    #[serde(default)]
    pub expect: Option<Expectation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Create {
        #[serde(rename = "as")]
        actor: String,
        draft: PermitDraft,
    },
    Act {
        #[serde(rename = "as")]
        actor: String,
        permit: String,
        action: ActionKind,
        #[serde(default)]
        comment: Option<String>,
        #[serde(default)]
        reason: Option<String>,
        #[serde(default)]
        notes: Option<String>,
    },
    List {
        #[serde(default)]
        status: Option<PermitStatus>,
        #[serde(default)]
        requester: Option<String>,
    },
    Stats {
        #[serde(rename = "as")]
        actor: String,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Act { .. } => "act",
            Self::List { .. } => "list",
            Self::Stats { .. } => "stats",
        }
    }

    pub fn actor(&self) -> Option<&str> {
        match self {
            Self::Create { actor, .. } | Self::Act { actor, .. } | Self::Stats { actor } => {
                Some(actor)
            }
            Self::List { .. } => None,
        }
    }

    /// Loose payload of an `act` step
    pub fn payload(&self) -> ActionPayload {
        match self {
            Self::Act {
                comment,
                reason,
                notes,
                ..
            } => ActionPayload {
                reason: reason.clone(),
                notes: notes.clone(),
                comment: comment.clone(),
            },
            _ => ActionPayload::default(),
        }
    }

    pub fn filter(&self) -> PermitFilter {
        match self {
            Self::List { status, requester } => PermitFilter {
                status: *status,
                requester_id: requester.clone(),
            },
            _ => PermitFilter::all(),
        }
    }
}

/// What a step is expected to produce
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Expectation {
    Ok,
    Error(String),
}

impl From<String> for Expectation {
    fn from(value: String) -> Self {
        match value.trim() {
            "ok" => Expectation::Ok,
            code => Expectation::Error(code.to_string()),
        }
    }
}

impl Expectation {
    /// Check an outcome, given as `None` for success or the error code
    pub fn matches(&self, error_code: Option<&str>) -> bool {
        match (self, error_code) {
            (Expectation::Ok, None) => true,
            (Expectation::Error(expected), Some(actual)) => expected == actual,
            _ => false,
        }
    }
}
