//! Aggregate permit counts for the admin dashboard

use ptw_models::{Permit, PermitStatus};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub rejected: usize,
    /// Permits waiting on a decision
    pub pending_approvals: usize,
    /// Permits with work under way
    pub active_work: usize,
}

impl PermitStats {
    pub fn from_permits<'a, I>(permits: I) -> Self
    where
        I: IntoIterator<Item = &'a Permit>,
    {
        let mut stats = Self::default();
        for permit in permits {
            stats.total += 1;
            match permit.status {
                PermitStatus::Pending => stats.pending += 1,
                PermitStatus::Approved => stats.approved += 1,
                PermitStatus::InProgress => stats.in_progress += 1,
                PermitStatus::Completed => stats.completed += 1,
                PermitStatus::Rejected => stats.rejected += 1,
            }
        }
        stats.pending_approvals = stats.pending;
        stats.active_work = stats.in_progress;
        stats
    }

    pub fn count(&self, status: PermitStatus) -> usize {
        match status {
            PermitStatus::Pending => self.pending,
            PermitStatus::Approved => self.approved,
            PermitStatus::InProgress => self.in_progress,
            PermitStatus::Completed => self.completed,
            PermitStatus::Rejected => self.rejected,
        }
    }
}
