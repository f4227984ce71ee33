//! Executes scenario scripts against the permit service

use std::sync::Arc;

use ptw_core::config::AppConfig;
use ptw_core::error::PtwError;
use ptw_core::result::PtwResult;
use ptw_models::{Action, Permit};
use ptw_services::{MemoryPermitStore, PermitService, PermitStats, UserDirectory};
use serde::Serialize;

use crate::script::{Operation, Script, Step};

/// What a step returned on success
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StepOutput {
    Permit(Box<Permit>),
    Permits(Vec<Permit>),
    Stats(PermitStats),
}

#[derive(Debug, Clone, Serialize)]
pub struct StepError {
    pub code: &'static str,
    pub message: String,
}

impl From<&PtwError> for StepError {
    fn from(err: &PtwError) -> Self {
        Self {
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub operation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<StepOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StepError>,
    /// False when the step carried an expectation it did not meet
    pub matched: bool,
}

impl StepReport {
    pub fn summary(&self) -> String {
        let who = self.actor.as_deref().unwrap_or("-");
        let outcome = match (&self.output, &self.error) {
            (_, Some(err)) => format!("error {}: {}", err.code, err.message),
            (Some(StepOutput::Permit(p)), None) => format!("ok {} ({})", p.id, p.status),
            (Some(StepOutput::Permits(ps)), None) => {
                let ids: Vec<&str> = ps.iter().map(|p| p.id.as_str()).collect();
                format!("ok {} permit(s) [{}]", ps.len(), ids.join(", "))
            }
            (Some(StepOutput::Stats(s)), None) => format!(
                "ok total={} pending_approvals={} active_work={}",
                s.total, s.pending_approvals, s.active_work
            ),
            (None, None) => "ok".to_string(),
        };
        let flag = if self.matched { "" } else { "  << unexpected" };
        format!("[{}] {} as {} -> {}{}", self.index, self.operation, who, outcome, flag)
    }
}

pub struct ScriptRunner {
    service: PermitService<MemoryPermitStore>,
    directory: UserDirectory,
}

impl ScriptRunner {
    /// A runner over a fresh, empty store
    pub fn new(config: &AppConfig, directory: UserDirectory) -> Self {
        let store = Arc::new(MemoryPermitStore::with_config(&config.permits));
        Self {
            service: PermitService::new(store, config.policy),
            directory,
        }
    }

    pub fn run(&self, script: &Script) -> Vec<StepReport> {
        script
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| self.run_step(i + 1, step))
            .collect()
    }

    fn run_step(&self, index: usize, step: &Step) -> StepReport {
        let result = self.execute(&step.operation);
        let error = result.as_ref().err().map(StepError::from);
        let matched = step
            .expect
            .as_ref()
            .map_or(true, |e| e.matches(error.as_ref().map(|err| err.code)));

        StepReport {
            index,
            operation: step.operation.name(),
            actor: step.operation.actor().map(str::to_string),
            output: result.ok(),
            error,
            matched,
        }
    }

    fn execute(&self, operation: &Operation) -> PtwResult<StepOutput> {
        match operation {
            Operation::Create { actor, draft } => {
                let actor = self.directory.find(actor)?;
                let permit = self.service.create_permit(draft.clone(), &actor)?;
                Ok(StepOutput::Permit(Box::new(permit)))
            }
            Operation::Act {
                actor,
                permit,
                action,
                ..
            } => {
                let actor = self.directory.find(actor)?;
                let action = Action::from_kind(*action, operation.payload());
                let permit = self.service.apply_action(permit, &actor, action)?;
                Ok(StepOutput::Permit(Box::new(permit)))
            }
            Operation::List { .. } => Ok(StepOutput::Permits(
                self.service.list_permits(&operation.filter()),
            )),
            Operation::Stats { actor } => {
                let actor = self.directory.find(actor)?;
                Ok(StepOutput::Stats(self.service.stats(&actor)?))
            }
        }
    }
}
