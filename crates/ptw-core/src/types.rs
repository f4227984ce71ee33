//! Common types used throughout PTW RS

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a user; fixed for the lifetime of the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    Worker,
    Supervisor,
    SafetyOfficer,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Worker,
        UserRole::Supervisor,
        UserRole::SafetyOfficer,
        UserRole::Admin,
    ];

    /// Wire name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Supervisor => "supervisor",
            Self::SafetyOfficer => "safetyOfficer",
            Self::Admin => "admin",
        }
    }

    /// Parse from the wire name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "worker" => Some(Self::Worker),
            "supervisor" => Some(Self::Supervisor),
            "safetyOfficer" | "safety_officer" => Some(Self::SafetyOfficer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Worker => "Worker",
            Self::Supervisor => "Supervisor",
            Self::SafetyOfficer => "Safety Officer",
            Self::Admin => "Administrator",
        }
    }

    pub fn is_approver(&self) -> bool {
        matches!(self, Self::Supervisor | Self::SafetyOfficer | Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Inclusive date range of planned work (start_date to end_date)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// End is on or after start
    pub fn is_ordered(&self) -> bool {
        self.end_date >= self.start_date
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
