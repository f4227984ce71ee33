//! Base contract system

use ptw_core::error::ValidationErrors;

pub use ptw_core::result::ValidationResult;
pub use ptw_core::traits::UserContext;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;

    /// Check if an attribute is writable
    fn is_writable(&self, _attribute: &str) -> bool {
        true
    }
}

/// Fold derive-level validator errors into our collection, one message per
/// failed rule. Rules without a message fall back to their code.
pub fn merge_validator_errors(errors: &mut ValidationErrors, source: &validator::ValidationErrors) {
    let mut fields: Vec<_> = source.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    for (field, field_errors) in fields {
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            errors.add(field, message);
        }
    }
}

/// Wrap collected errors in a contract result
pub fn into_result(errors: ValidationErrors) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
