//! Content contract for permits
//!
//! Applied to a draft before creation and to the merged content of an
//! update, so a stored permit always satisfies the same rules.

use ptw_core::error::ValidationErrors;
use ptw_models::PermitDraft;
use validator::Validate;

use crate::base::{into_result, merge_validator_errors, Contract, ValidationResult};

/// Field rules every permit's content must satisfy
#[derive(Debug, Default, Clone, Copy)]
pub struct PermitContentContract;

impl PermitContentContract {
    pub fn new() -> Self {
        Self
    }

    /// Text fields must carry something other than whitespace
    fn validate_text(&self, field: &str, value: &str, errors: &mut ValidationErrors) {
        if !errors.has_error(field) && value.trim().is_empty() {
            errors.add(field, "can't be blank");
        }
    }

    fn validate_entries(&self, field: &str, entries: &[String], errors: &mut ValidationErrors) {
        if entries.iter().any(|e| e.trim().is_empty()) {
            errors.add(field, "contains a blank entry");
        }
    }

    pub fn validate_dates(&self, draft: &PermitDraft, errors: &mut ValidationErrors) {
        if !draft.date_range().is_ordered() {
            errors.add("end_date", "must be on or after the start date");
        }
    }
}

impl Contract<PermitDraft> for PermitContentContract {
    fn validate(&self, draft: &PermitDraft) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Err(derived) = draft.validate() {
            merge_validator_errors(&mut errors, &derived);
        }

        self.validate_text("work_title", &draft.work_title, &mut errors);
        self.validate_text("location", &draft.location, &mut errors);
        self.validate_text("description", &draft.description, &mut errors);
        self.validate_entries("hazards", &draft.hazards, &mut errors);
        self.validate_entries("precautions", &draft.precautions, &mut errors);
        self.validate_dates(draft, &mut errors);

        into_result(errors)
    }

    fn is_writable(&self, attribute: &str) -> bool {
        matches!(
            attribute,
            "work_title"
                | "location"
                | "description"
                | "start_date"
                | "end_date"
                | "hazards"
                | "precautions"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    fn valid_draft() -> PermitDraft {
        PermitDraft::new("Panel Fix", "A2", "Replace breakers", date(1), date(1))
            .with_hazard("Electrical")
            .with_precaution("Lockout/Tagout")
    }

    #[test]
    fn test_valid_draft() {
        assert!(PermitContentContract::new().validate(&valid_draft()).is_ok());
    }

    #[test]
    fn test_empty_hazards() {
        let mut draft = valid_draft();
        draft.hazards.clear();

        let errors = PermitContentContract::new().validate(&draft).unwrap_err();
        assert!(errors.has_error("hazards"));
        assert!(!errors.has_error("precautions"));
    }

    #[test]
    fn test_empty_precautions() {
        let mut draft = valid_draft();
        draft.precautions.clear();

        let errors = PermitContentContract::new().validate(&draft).unwrap_err();
        assert!(errors.has_error("precautions"));
    }

    #[test]
    fn test_whitespace_title_is_blank() {
        let mut draft = valid_draft();
        draft.work_title = "   ".to_string();

        let errors = PermitContentContract::new().validate(&draft).unwrap_err();
        assert_eq!(errors.get("work_title"), Some(&vec!["can't be blank".to_string()]));
    }

    #[test]
    fn test_empty_title_reported_once() {
        let mut draft = valid_draft();
        draft.work_title.clear();

        let errors = PermitContentContract::new().validate(&draft).unwrap_err();
        assert_eq!(errors.get("work_title").map(Vec::len), Some(1));
    }

    #[test]
    fn test_blank_entry() {
        let draft = valid_draft().with_precaution(" ");

        let errors = PermitContentContract::new().validate(&draft).unwrap_err();
        assert_eq!(
            errors.get("precautions"),
            Some(&vec!["contains a blank entry".to_string()])
        );
    }

    #[test]
    fn test_end_before_start() {
        let mut draft = valid_draft();
        draft.start_date = date(5);
        draft.end_date = date(4);

        let errors = PermitContentContract::new().validate(&draft).unwrap_err();
        assert!(errors.has_error("end_date"));
    }

    #[test]
    fn test_status_not_writable() {
        let contract = PermitContentContract::new();
        assert!(contract.is_writable("hazards"));
        assert!(!contract.is_writable("status"));
        assert!(!contract.is_writable("approved_by"));
    }
}
