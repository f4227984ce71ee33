//! Permit store
//!
//! The store owns every permit record. Callers get copies; the only ways to
//! change a stored permit are a content update, which is re-validated, and
//! a lifecycle transition planned by the engine.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use ptw_contracts::permits::PermitContentContract;
use ptw_contracts::Contract;
use ptw_core::config::PermitConfig;
use ptw_core::error::PtwError;
use ptw_core::result::PtwResult;
use ptw_core::traits::Identifiable;
use ptw_models::{Permit, PermitDraft, PermitFilter, PermitPatch, PermitStatus};
use tracing::debug;

use crate::lifecycle::Transition;

const ENTITY: &str = "Permit";

/// Permit storage
pub trait PermitStore: Send + Sync {
    /// Validate and store a new permit, assigning its id
    fn create(&self, draft: PermitDraft, requester_id: &str) -> PtwResult<Permit>;

    fn get(&self, id: &str) -> PtwResult<Permit>;

    /// Permits matching the filter, in insertion order
    fn list(&self, filter: &PermitFilter) -> Vec<Permit>;

    fn list_by_status(&self, status: PermitStatus) -> Vec<Permit> {
        self.list(&PermitFilter::by_status(status))
    }

    fn list_by_requester(&self, user_id: &str) -> Vec<Permit> {
        self.list(&PermitFilter::by_requester(user_id))
    }

    /// Merge content changes; the stored value is untouched on error
    fn update(&self, id: &str, patch: PermitPatch) -> PtwResult<Permit>;

    /// Apply a planned transition if the permit is still in its source status
    fn apply_transition(&self, transition: &Transition) -> PtwResult<Permit>;
}

/// In-memory permit store
pub struct MemoryPermitStore {
    permits: RwLock<Vec<Permit>>,
    next_seq: AtomicU64,
    id_prefix: String,
    contract: PermitContentContract,
}

impl Default for MemoryPermitStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPermitStore {
    pub fn new() -> Self {
        Self::with_config(&PermitConfig::default())
    }

    pub fn with_config(config: &PermitConfig) -> Self {
        Self {
            permits: RwLock::new(Vec::new()),
            next_seq: AtomicU64::new(1),
            id_prefix: config.id_prefix.clone(),
            contract: PermitContentContract::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.permits.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.permits.read().is_empty()
    }

    fn validate(&self, draft: &PermitDraft) -> PtwResult<()> {
        self.contract.validate(draft).map_err(PtwError::Validation)
    }

    fn next_id(&self) -> String {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        format!("{}-{:03}", self.id_prefix, seq)
    }
}

impl PermitStore for MemoryPermitStore {
    fn create(&self, draft: PermitDraft, requester_id: &str) -> PtwResult<Permit> {
        let draft = draft.normalized();
        self.validate(&draft)?;

        let mut permits = self.permits.write();
        let permit = Permit::from_draft(self.next_id(), requester_id, draft, Utc::now());
        permits.push(permit.clone());

        debug!(permit_id = %permit.id, "Permit stored");
        Ok(permit)
    }

    fn get(&self, id: &str) -> PtwResult<Permit> {
        self.permits
            .read()
            .iter()
            .find(|p| p.id() == id)
            .cloned()
            .ok_or_else(|| PtwError::not_found(ENTITY, id))
    }

    fn list(&self, filter: &PermitFilter) -> Vec<Permit> {
        self.permits
            .read()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    fn update(&self, id: &str, patch: PermitPatch) -> PtwResult<Permit> {
        let mut permits = self.permits.write();
        let stored = permits
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| PtwError::not_found(ENTITY, id))?;

        let content = patch.merge_into(stored.content()).normalized();
        self.validate(&content)?;

        stored.work_title = content.work_title;
        stored.location = content.location;
        stored.description = content.description;
        stored.start_date = content.start_date;
        stored.end_date = content.end_date;
        stored.hazards = content.hazards;
        stored.precautions = content.precautions;

        debug!(permit_id = %stored.id, "Permit content updated");
        Ok(stored.clone())
    }

    fn apply_transition(&self, transition: &Transition) -> PtwResult<Permit> {
        let mut permits = self.permits.write();
        let stored = permits
            .iter_mut()
            .find(|p| p.id() == transition.permit_id())
            .ok_or_else(|| PtwError::not_found(ENTITY, transition.permit_id()))?;

        if stored.status != transition.from() {
            return Err(PtwError::invalid_transition(format!(
                "permit {} is {}, expected {}",
                stored.id,
                stored.status.label(),
                transition.from().label()
            )));
        }

        *stored = transition.apply_to(stored);
        debug!(permit_id = %stored.id, status = stored.status.as_str(), "Permit transitioned");
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::LifecycleEngine;
    use chrono::NaiveDate;
    use ptw_models::{Action, User};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn draft(title: &str) -> PermitDraft {
        PermitDraft::new(title, "A2", "Replace breakers", date(1), date(2))
            .with_hazard("Electrical")
            .with_precaution("Lockout/Tagout")
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = MemoryPermitStore::new();

        let first = store.create(draft("Panel Fix"), "user1").unwrap();
        let second = store.create(draft("Pump swap"), "user1").unwrap();

        assert_eq!(first.id, "PTW-001");
        assert_eq!(second.id, "PTW-002");
        assert_eq!(first.status, PermitStatus::Pending);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_uses_prefix() {
        let store = MemoryPermitStore::with_config(&PermitConfig {
            id_prefix: "HOT".to_string(),
        });
        assert_eq!(store.create(draft("Weld"), "user1").unwrap().id, "HOT-001");
    }

    #[test]
    fn test_invalid_draft_not_stored() {
        let store = MemoryPermitStore::new();
        let mut bad = draft("Panel Fix");
        bad.hazards.clear();

        let err = store.create(bad, "user1").unwrap_err();
        assert!(err.is_validation());
        assert!(store.is_empty());

        // the failed create does not burn a sequence number
        assert_eq!(store.create(draft("Panel Fix"), "user1").unwrap().id, "PTW-001");
    }

    #[test]
    fn test_create_normalizes() {
        let store = MemoryPermitStore::new();
        let permit = store
            .create(draft(" Panel Fix ").with_hazard("Electrical "), "user1")
            .unwrap();

        assert_eq!(permit.work_title, "Panel Fix");
        assert_eq!(permit.hazards, vec!["Electrical"]);
    }

    #[test]
    fn test_get_unknown() {
        let store = MemoryPermitStore::new();
        let err = store.get("PTW-404").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_lists_keep_insertion_order() {
        let store = MemoryPermitStore::new();
        store.create(draft("One"), "user1").unwrap();
        store.create(draft("Two"), "user5").unwrap();
        store.create(draft("Three"), "user1").unwrap();

        let titles: Vec<_> = store
            .list_by_requester("user1")
            .into_iter()
            .map(|p| p.work_title)
            .collect();
        assert_eq!(titles, vec!["One", "Three"]);

        assert_eq!(store.list_by_status(PermitStatus::Pending).len(), 3);
        assert!(store.list_by_status(PermitStatus::Approved).is_empty());
        assert_eq!(store.list(&PermitFilter::all()).len(), 3);
    }

    #[test]
    fn test_update_merges_content() {
        let store = MemoryPermitStore::new();
        let permit = store.create(draft("Panel Fix"), "user1").unwrap();

        let updated = store
            .update(&permit.id, PermitPatch::new().with_location("B4"))
            .unwrap();

        assert_eq!(updated.location, "B4");
        assert_eq!(updated.work_title, "Panel Fix");
        assert_eq!(store.get(&permit.id).unwrap(), updated);
    }

    #[test]
    fn test_update_revalidates() {
        let store = MemoryPermitStore::new();
        let permit = store.create(draft("Panel Fix"), "user1").unwrap();

        let err = store
            .update(&permit.id, PermitPatch::new().with_hazards(Vec::new()))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.get(&permit.id).unwrap(), permit);

        let err = store
            .update(&permit.id, PermitPatch::new().with_dates(date(5), date(3)))
            .unwrap_err();
        assert!(err.validation_errors().unwrap().has_error("end_date"));
        assert_eq!(store.get(&permit.id).unwrap(), permit);
    }

    #[test]
    fn test_update_unknown() {
        let store = MemoryPermitStore::new();
        let err = store.update("PTW-404", PermitPatch::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_stale_transition_rejected() {
        let store = MemoryPermitStore::new();
        let engine = LifecycleEngine::default();
        let permit = store.create(draft("Panel Fix"), "user1").unwrap();

        let supervisor = User::supervisor("user2", "Jane Smith");
        let officer = User::safety_officer("user3", "Mike Johnson");

        let approve = engine.plan(&permit, &supervisor, &Action::approve()).unwrap();
        let reject = engine.plan(&permit, &officer, &Action::reject("no isolation")).unwrap();

        store.apply_transition(&approve).unwrap();
        let err = store.apply_transition(&reject).unwrap_err();

        assert!(err.is_invalid_transition());
        let stored = store.get(&permit.id).unwrap();
        assert_eq!(stored.status, PermitStatus::Approved);
        assert!(stored.comments.is_none());
    }

    #[test]
    fn test_transition_keeps_later_content_edit() {
        let store = MemoryPermitStore::new();
        let engine = LifecycleEngine::default();
        let permit = store.create(draft("Panel Fix"), "user1").unwrap();

        let approve = engine
            .plan(&permit, &User::supervisor("user2", "Jane Smith"), &Action::approve())
            .unwrap();
        store.update(&permit.id, PermitPatch::new().with_location("B4")).unwrap();

        let approved = store.apply_transition(&approve).unwrap();
        assert_eq!(approved.status, PermitStatus::Approved);
        assert_eq!(approved.location, "B4");
    }
}
