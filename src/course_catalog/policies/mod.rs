pub mod false_failure;

pub use false_failure::{
    CompensationRule, FailureSignature, FalseFailurePolicy, PlatformOperation,
    VerificationStrategy, JOURNAL_UPDATE_MARKER, STANDARD_RULES,
};
