use crate::shared::error::PlatformError;

/// Text the platform puts in the 500 response when a write succeeded but
/// its journal bookkeeping failed afterwards.
pub const JOURNAL_UPDATE_MARKER: &str = "UpdateJournalItem";

/// Write operations the platform is known to misreport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformOperation {
    CreateProduct,
    CreateInventory,
    CreateAssociation,
    UpdateProduct,
    DeleteProduct,
    UpdateInventory,
}

impl std::fmt::Display for PlatformOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlatformOperation::CreateProduct => "create product",
            PlatformOperation::CreateInventory => "create inventory",
            PlatformOperation::CreateAssociation => "create category association",
            PlatformOperation::UpdateProduct => "update product",
            PlatformOperation::DeleteProduct => "delete product",
            PlatformOperation::UpdateInventory => "update inventory",
        };
        write!(f, "{}", name)
    }
}

/// Shape of an error that may hide a write which actually took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureSignature {
    /// HTTP 500 whose reason or body contains the marker
    ServerErrorWithMarker(&'static str),
    /// Any HTTP 500
    AnyServerError,
    /// Any failure at all
    AnyFailure,
}

impl FailureSignature {
    pub fn matches(&self, error: &PlatformError) -> bool {
        match self {
            FailureSignature::ServerErrorWithMarker(marker) => {
                error.status() == Some(500) && error.mentions(marker)
            }
            FailureSignature::AnyServerError => error.status() == Some(500),
            FailureSignature::AnyFailure => true,
        }
    }
}

/// Read-only step that decides whether a suspect write went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStrategy {
    /// Look the product up by the SKU that was sent
    LookupBySku,
    /// List inventory records filtered by the product id
    ResolveInventoryByProduct,
    /// Nothing to read back; the payload that was sent is the new state
    AssumeSentPayload,
    /// Nothing to read back and nothing to return
    AssumeSuccess,
}

/// One row of the compensation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompensationRule {
    pub operation: PlatformOperation,
    pub signature: FailureSignature,
    pub strategy: VerificationStrategy,
}

/// Known false failures of the platform, one row per operation.
///
/// Association creation has no row: its failures are reported as-is.
pub const STANDARD_RULES: &[CompensationRule] = &[
    CompensationRule {
        operation: PlatformOperation::CreateProduct,
        signature: FailureSignature::ServerErrorWithMarker(JOURNAL_UPDATE_MARKER),
        strategy: VerificationStrategy::LookupBySku,
    },
    CompensationRule {
        operation: PlatformOperation::CreateInventory,
        signature: FailureSignature::AnyFailure,
        strategy: VerificationStrategy::ResolveInventoryByProduct,
    },
    CompensationRule {
        operation: PlatformOperation::UpdateProduct,
        signature: FailureSignature::ServerErrorWithMarker(JOURNAL_UPDATE_MARKER),
        strategy: VerificationStrategy::AssumeSentPayload,
    },
    CompensationRule {
        operation: PlatformOperation::DeleteProduct,
        signature: FailureSignature::AnyServerError,
        strategy: VerificationStrategy::AssumeSuccess,
    },
    CompensationRule {
        operation: PlatformOperation::UpdateInventory,
        signature: FailureSignature::ServerErrorWithMarker(JOURNAL_UPDATE_MARKER),
        strategy: VerificationStrategy::AssumeSentPayload,
    },
];

/// Lookup over a compensation table.
#[derive(Debug, Clone)]
pub struct FalseFailurePolicy {
    rules: Vec<CompensationRule>,
}

impl FalseFailurePolicy {
    pub fn standard() -> Self {
        Self::with_rules(STANDARD_RULES.to_vec())
    }

    pub fn with_rules(rules: Vec<CompensationRule>) -> Self {
        Self { rules }
    }

    /// The verification to run for `error` raised by `operation`, if the table has one.
    ///
    /// Verification failures are never compensated again.
    pub fn strategy_for(
        &self,
        operation: PlatformOperation,
        error: &PlatformError,
    ) -> Option<VerificationStrategy> {
        if matches!(error, PlatformError::Verification { .. }) {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| rule.operation == operation && rule.signature.matches(error))
            .map(|rule| rule.strategy)
    }
}

impl Default for FalseFailurePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(body: &str) -> PlatformError {
        PlatformError::HttpStatus {
            status: 500,
            reason: "Internal Server Error".to_string(),
            body: body.to_string(),
        }
    }

    fn journal_error() -> PlatformError {
        server_error("System.Exception: UpdateJournalItem failed")
    }

    #[test]
    fn test_create_product_journal_error_looks_up_sku() {
        let policy = FalseFailurePolicy::standard();
        assert_eq!(
            policy.strategy_for(PlatformOperation::CreateProduct, &journal_error()),
            Some(VerificationStrategy::LookupBySku)
        );
    }

    #[test]
    fn test_create_product_plain_500_is_fatal() {
        let policy = FalseFailurePolicy::standard();
        assert_eq!(
            policy.strategy_for(PlatformOperation::CreateProduct, &server_error("boom")),
            None
        );
    }

    #[test]
    fn test_marker_on_other_status_is_not_compensated() {
        let policy = FalseFailurePolicy::standard();
        let error = PlatformError::HttpStatus {
            status: 400,
            reason: "Bad Request".to_string(),
            body: JOURNAL_UPDATE_MARKER.to_string(),
        };
        assert_eq!(
            policy.strategy_for(PlatformOperation::UpdateProduct, &error),
            None
        );
    }

    #[test]
    fn test_delete_any_500_is_assumed_success() {
        let policy = FalseFailurePolicy::standard();
        assert_eq!(
            policy.strategy_for(PlatformOperation::DeleteProduct, &server_error("")),
            Some(VerificationStrategy::AssumeSuccess)
        );
        let not_found = PlatformError::HttpStatus {
            status: 404,
            reason: "Not Found".to_string(),
            body: String::new(),
        };
        assert_eq!(
            policy.strategy_for(PlatformOperation::DeleteProduct, &not_found),
            None
        );
    }

    #[test]
    fn test_inventory_creation_resolves_on_any_failure() {
        let policy = FalseFailurePolicy::standard();
        let timeout = PlatformError::Timeout {
            target: "shop:80".to_string(),
            seconds: 30,
        };
        assert_eq!(
            policy.strategy_for(PlatformOperation::CreateInventory, &timeout),
            Some(VerificationStrategy::ResolveInventoryByProduct)
        );
    }

    #[test]
    fn test_updates_assume_sent_payload() {
        let policy = FalseFailurePolicy::standard();
        for operation in [
            PlatformOperation::UpdateProduct,
            PlatformOperation::UpdateInventory,
        ] {
            assert_eq!(
                policy.strategy_for(operation, &journal_error()),
                Some(VerificationStrategy::AssumeSentPayload)
            );
        }
    }

    #[test]
    fn test_association_has_no_rule() {
        let policy = FalseFailurePolicy::standard();
        assert_eq!(
            policy.strategy_for(PlatformOperation::CreateAssociation, &journal_error()),
            None
        );
    }

    #[test]
    fn test_platform_logical_errors_not_compensated_for_writes() {
        let policy = FalseFailurePolicy::standard();
        let logical = PlatformError::PlatformLogical {
            messages: vec![JOURNAL_UPDATE_MARKER.to_string()],
        };
        assert_eq!(
            policy.strategy_for(PlatformOperation::CreateProduct, &logical),
            None
        );
    }

    #[test]
    fn test_verification_errors_never_recompensated() {
        let policy = FalseFailurePolicy::with_rules(vec![CompensationRule {
            operation: PlatformOperation::CreateProduct,
            signature: FailureSignature::AnyFailure,
            strategy: VerificationStrategy::AssumeSuccess,
        }]);
        let error = PlatformError::Verification {
            original: Box::new(journal_error()),
            verification: "not found".to_string(),
        };
        assert_eq!(
            policy.strategy_for(PlatformOperation::CreateProduct, &error),
            None
        );
    }

    #[test]
    fn test_custom_marker_table() {
        let policy = FalseFailurePolicy::with_rules(vec![CompensationRule {
            operation: PlatformOperation::UpdateProduct,
            signature: FailureSignature::ServerErrorWithMarker("JournalV2"),
            strategy: VerificationStrategy::AssumeSentPayload,
        }]);
        assert_eq!(
            policy.strategy_for(PlatformOperation::UpdateProduct, &journal_error()),
            None
        );
        assert!(policy
            .strategy_for(PlatformOperation::UpdateProduct, &server_error("JournalV2"))
            .is_some());
    }
}
