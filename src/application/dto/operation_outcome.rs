use serde::Serialize;
use serde_json::Value;

/// Result of an operation plus the advisory warnings collected on the way.
///
/// Warnings come from dependent steps (inventory, category link) that
/// failed without failing the operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationOutcome<T> {
    pub value: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T> OperationOutcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<String>) -> Self {
        Self { value, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationOutcome<U> {
        OperationOutcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Created (or verified) course and what happened to its dependent records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreation {
    pub product: Value,
    pub inventory_bvin: Option<String>,
    pub category_id: Option<String>,
    /// The product write reported an error that a read-back disproved
    pub verified_after_error: bool,
}

/// Deleted course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDeletion {
    pub bvin: String,
    /// The platform answered 500 and success was assumed
    pub assumed: bool,
    pub mapping_removed: bool,
}

/// Inventory id found for a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResolution {
    pub product_bvin: String,
    pub inventory_bvin: String,
    pub candidates: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_serialization_skips_empty_warnings() {
        let outcome = OperationOutcome::new(json!({"Bvin": "p-1"}));
        assert!(!outcome.has_warnings());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"value": {"Bvin": "p-1"}})
        );
    }

    #[test]
    fn test_outcome_map_keeps_warnings() {
        let outcome = OperationOutcome::with_warnings(1, vec!["inventory failed".to_string()]);
        let mapped = outcome.map(|n| n + 1);
        assert_eq!(mapped.value, 2);
        assert_eq!(mapped.warnings, vec!["inventory failed".to_string()]);
    }
}
