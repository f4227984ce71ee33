//! Result type aliases

use crate::error::{PtwError, ValidationErrors};

/// Standard Result type for permit operations
pub type PtwResult<T> = Result<T, PtwError>;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;
