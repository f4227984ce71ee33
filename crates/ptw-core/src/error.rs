//! Core error types for PTW RS
//!
//! Every failure of the permit core is one of four kinds. Callers decide how
//! to present them; the core only returns them.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Core error type for all permit operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PtwError {
    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid transition: {message}")]
    InvalidTransition { message: String },
}

impl PtwError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition {
            message: message.into(),
        }
    }

    /// Single-field validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        Self::Validation(errors)
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            PtwError::NotFound { .. } => "not_found",
            PtwError::Forbidden { .. } => "forbidden",
            PtwError::Validation(_) => "validation_failed",
            PtwError::InvalidTransition { .. } => "invalid_transition",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PtwError::NotFound { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, PtwError::Forbidden { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PtwError::Validation(_))
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, PtwError::InvalidTransition { .. })
    }

    /// Validation details, if this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            PtwError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Validation errors collection
///
/// Field errors are kept sorted by field name so messages come out in a
/// stable order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: BTreeMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}
