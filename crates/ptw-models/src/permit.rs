//! Permit model
//!
//! A permit to work: the safety authorization a worker needs before
//! hazardous work begins.

use chrono::{DateTime, NaiveDate, Utc};
use ptw_core::traits::{Id, Identifiable};
use ptw_core::types::DateRange;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Lifecycle state of a permit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermitStatus {
    Pending,
    Approved,
    InProgress,
    Completed,
    Rejected,
}

impl PermitStatus {
    pub const ALL: [PermitStatus; 5] = [
        PermitStatus::Pending,
        PermitStatus::Approved,
        PermitStatus::InProgress,
        PermitStatus::Completed,
        PermitStatus::Rejected,
    ];

    /// Wire name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "inProgress" | "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Label shown on status chips
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
        }
    }

    /// No transition leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl fmt::Display for PermitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input for creating a permit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PermitDraft {
    #[validate(length(min = 1, message = "can't be blank"))]
    pub work_title: String,

    #[validate(length(min = 1, message = "can't be blank"))]
    pub location: String,

    #[validate(length(min = 1, message = "can't be blank"))]
    pub description: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default)]
    #[validate(length(min = 1, message = "must identify at least one hazard"))]
    pub hazards: Vec<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "must list at least one precaution"))]
    pub precautions: Vec<String>,
}

impl PermitDraft {
    pub fn new(
        work_title: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            work_title: work_title.into(),
            location: location.into(),
            description: description.into(),
            start_date,
            end_date,
            hazards: Vec::new(),
            precautions: Vec::new(),
        }
    }

    pub fn with_hazard(mut self, hazard: impl Into<String>) -> Self {
        self.hazards.push(hazard.into());
        self
    }

    pub fn with_hazards<I, S>(mut self, hazards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hazards.extend(hazards.into_iter().map(Into::into));
        self
    }

    pub fn with_precaution(mut self, precaution: impl Into<String>) -> Self {
        self.precautions.push(precaution.into());
        self
    }

    pub fn with_precautions<I, S>(mut self, precautions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.precautions.extend(precautions.into_iter().map(Into::into));
        self
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Trim text fields and list entries; drop repeated list entries,
    /// keeping the first occurrence.
    pub fn normalized(self) -> Self {
        Self {
            work_title: self.work_title.trim().to_string(),
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            hazards: normalize_set(self.hazards),
            precautions: normalize_set(self.precautions),
        }
    }

    /// Form completeness in quarters: title, location, description, and
    /// hazards plus precautions together.
    pub fn completeness(&self) -> f32 {
        let mut progress = 0.0;
        if !self.work_title.trim().is_empty() {
            progress += 0.25;
        }
        if !self.location.trim().is_empty() {
            progress += 0.25;
        }
        if !self.description.trim().is_empty() {
            progress += 0.25;
        }
        if !self.hazards.is_empty() && !self.precautions.is_empty() {
            progress += 0.25;
        }
        progress
    }
}

fn normalize_set(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim().to_string();
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Permit entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permit {
    pub id: Id,
    pub work_title: String,
    pub location: String,
    pub description: String,
    pub requester_id: Id,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hazards: Vec<String>,
    pub precautions: Vec<String>,
    pub status: PermitStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Permit {
    /// Build a freshly submitted permit; status is always Pending
    pub fn from_draft(
        id: impl Into<Id>,
        requester_id: impl Into<Id>,
        draft: PermitDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            work_title: draft.work_title,
            location: draft.location,
            description: draft.description,
            requester_id: requester_id.into(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            hazards: draft.hazards,
            precautions: draft.precautions,
            status: PermitStatus::Pending,
            approved_by: None,
            approved_date: None,
            comments: None,
            created_at,
        }
    }

    /// The editable content of this permit, in draft form
    pub fn content(&self) -> PermitDraft {
        PermitDraft {
            work_title: self.work_title.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            hazards: self.hazards.clone(),
            precautions: self.precautions.clone(),
        }
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn is_requested_by(&self, user_id: &str) -> bool {
        self.requester_id == user_id
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Identifiable for Permit {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Content changes to a stored permit
///
/// Status and approval fields are not part of a patch; they only change
/// through a lifecycle transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitPatch {
    pub work_title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub hazards: Option<Vec<String>>,
    pub precautions: Option<Vec<String>>,
}

impl PermitPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_work_title(mut self, work_title: impl Into<String>) -> Self {
        self.work_title = Some(work_title.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }

    pub fn with_hazards(mut self, hazards: Vec<String>) -> Self {
        self.hazards = Some(hazards);
        self
    }

    pub fn with_precautions(mut self, precautions: Vec<String>) -> Self {
        self.precautions = Some(precautions);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the patch into a copy of the permit's content
    pub fn merge_into(&self, content: PermitDraft) -> PermitDraft {
        PermitDraft {
            work_title: self.work_title.clone().unwrap_or(content.work_title),
            location: self.location.clone().unwrap_or(content.location),
            description: self.description.clone().unwrap_or(content.description),
            start_date: self.start_date.unwrap_or(content.start_date),
            end_date: self.end_date.unwrap_or(content.end_date),
            hazards: self.hazards.clone().unwrap_or(content.hazards),
            precautions: self.precautions.clone().unwrap_or(content.precautions),
        }
    }
}

/// Filter for listing permits; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitFilter {
    pub status: Option<PermitStatus>,
    pub requester_id: Option<Id>,
}

impl PermitFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_status(status: PermitStatus) -> Self {
        Self {
            status: Some(status),
            requester_id: None,
        }
    }

    pub fn by_requester(requester_id: impl Into<Id>) -> Self {
        Self {
            status: None,
            requester_id: Some(requester_id.into()),
        }
    }

    pub fn with_status(mut self, status: PermitStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, permit: &Permit) -> bool {
        self.status.map_or(true, |s| permit.status == s)
            && self
                .requester_id
                .as_deref()
                .map_or(true, |r| permit.requester_id == r)
    }
}
