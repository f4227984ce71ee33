//! Standard hazards and precautions offered when filling in a permit.
//! Drafts are not limited to these.

pub const HAZARDS: &[&str] = &[
    "Electrical",
    "Fire",
    "Chemical",
    "Height work",
    "Confined space",
    "Hot work",
    "Machinery",
    "Toxic materials",
    "Heavy lifting",
    "Slips and trips",
];

pub const PRECAUTIONS: &[&str] = &[
    "PPE required",
    "Area isolation",
    "Fire extinguisher",
    "First aid kit",
    "Lockout/Tagout",
    "Ventilation",
    "Safety harness",
    "Gas detection",
    "Training required",
    "Supervision required",
    "Emergency response plan",
];

pub fn is_standard_hazard(hazard: &str) -> bool {
    HAZARDS.iter().any(|h| h.eq_ignore_ascii_case(hazard.trim()))
}

pub fn is_standard_precaution(precaution: &str) -> bool {
    PRECAUTIONS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(precaution.trim()))
}

/// Entries of `items` that are not in `catalog`
pub fn custom_entries<'a>(items: &'a [String], catalog: &[&str]) -> Vec<&'a str> {
    items
        .iter()
        .map(String::as_str)
        .filter(|item| !catalog.iter().any(|c| c.eq_ignore_ascii_case(item.trim())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_entries() {
        assert!(is_standard_hazard("Electrical"));
        assert!(is_standard_hazard(" hot work "));
        assert!(!is_standard_hazard("Asbestos"));
        assert!(is_standard_precaution("Lockout/Tagout"));
        assert_eq!(HAZARDS.len(), 10);
        assert_eq!(PRECAUTIONS.len(), 11);
    }

    #[test]
    fn test_custom_entries() {
        let items = vec!["Fire".to_string(), "Asbestos".to_string()];
        assert_eq!(custom_entries(&items, HAZARDS), vec!["Asbestos"]);
    }
}
