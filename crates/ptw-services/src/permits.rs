//! Permit service
//!
//! Entry point for callers. Every operation takes the acting user
//! explicitly; nothing here remembers who is logged in.
//!
//! # Example
//! ```ignore
//! let service = PermitService::new(Arc::new(MemoryPermitStore::new()), LifecyclePolicy::default());
//! let permit = service.create_permit(draft, &worker)?;
//! let permit = service.apply_action(&permit.id, &supervisor, Action::approve())?;
//! ```

use std::sync::Arc;

use ptw_contracts::permits::CreatePermitContract;
use ptw_core::config::LifecyclePolicy;
use ptw_core::error::PtwError;
use ptw_core::result::PtwResult;
use ptw_core::traits::UserContext;
use ptw_models::catalog;
use ptw_models::{Action, ActionKind, Permit, PermitDraft, PermitFilter, PermitStatus};
use tracing::info;

use crate::lifecycle::LifecycleEngine;
use crate::stats::PermitStats;
use crate::store::PermitStore;

pub struct PermitService<S: PermitStore> {
    store: Arc<S>,
    engine: LifecycleEngine,
}

impl<S: PermitStore> PermitService<S> {
    pub fn new(store: Arc<S>, policy: LifecyclePolicy) -> Self {
        Self::with_engine(store, LifecycleEngine::new(policy))
    }

    pub fn with_engine(store: Arc<S>, engine: LifecycleEngine) -> Self {
        Self { store, engine }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn engine(&self) -> &LifecycleEngine {
        &self.engine
    }

    /// Raise a new permit on behalf of `actor`
    pub fn create_permit<U: UserContext>(&self, draft: PermitDraft, actor: &U) -> PtwResult<Permit> {
        CreatePermitContract::new(actor).authorize()?;

        let permit = self.store.create(draft, actor.user_id())?;
        info!(
            permit_id = %permit.id,
            requester = %actor.user_id(),
            custom_hazards = catalog::custom_entries(&permit.hazards, catalog::HAZARDS).len(),
            "Permit created"
        );
        Ok(permit)
    }

    pub fn get_permit(&self, permit_id: &str) -> PtwResult<Permit> {
        self.store.get(permit_id)
    }

    /// Move a permit through its lifecycle
    pub fn apply_action<U: UserContext>(
        &self,
        permit_id: &str,
        actor: &U,
        action: Action,
    ) -> PtwResult<Permit> {
        let permit = self.store.get(permit_id)?;
        let transition = self.engine.plan(&permit, actor, &action)?;
        let updated = self.store.apply_transition(&transition)?;

        info!(
            permit_id = %updated.id,
            actor = %actor.user_id(),
            action = %transition.action(),
            from = transition.from().as_str(),
            to = transition.to().as_str(),
            "Permit transitioned"
        );
        Ok(updated)
    }

    /// Actions `actor` may take on the permit as it is stored now
    pub fn available_actions<U: UserContext>(
        &self,
        permit_id: &str,
        actor: &U,
    ) -> PtwResult<Vec<ActionKind>> {
        let permit = self.store.get(permit_id)?;
        Ok(self.engine.available_actions(&permit, actor))
    }

    pub fn list_permits(&self, filter: &PermitFilter) -> Vec<Permit> {
        self.store.list(filter)
    }

    /// Pending permits, for approvers only
    pub fn approval_queue<U: UserContext>(&self, actor: &U) -> PtwResult<Vec<Permit>> {
        if !actor.is_approver() {
            return Err(PtwError::forbidden(format!(
                "{} users cannot review permits",
                actor.role().display_name()
            )));
        }
        Ok(self.store.list_by_status(PermitStatus::Pending))
    }

    pub fn my_permits<U: UserContext>(&self, actor: &U) -> Vec<Permit> {
        self.store.list_by_requester(actor.user_id())
    }

    /// Dashboard counts, for admins only
    pub fn stats<U: UserContext>(&self, actor: &U) -> PtwResult<PermitStats> {
        if !actor.is_admin() {
            return Err(PtwError::forbidden("only administrators can view permit statistics"));
        }
        let permits = self.store.list(&PermitFilter::all());
        Ok(PermitStats::from_permits(&permits))
    }
}
