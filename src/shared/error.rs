use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Lets scripts distinguish a clean run from one where a dependent step
/// (inventory, category link) only succeeded partially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every step succeeded
    Success = 0,
    /// The primary operation succeeded but advisory warnings were recorded
    CompletedWithWarnings = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (platform error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::CompletedWithWarnings => write!(f, "Completed With Warnings (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors produced while talking to the commerce platform.
///
/// One variant per failure class: transport, framing, HTTP status,
/// platform-logical, body-parse and failed verification.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Connection to {target} failed: {details}")]
    Connection { target: String, details: String },

    #[error("Connection to {target} timed out after {seconds}s")]
    Timeout { target: String, seconds: u64 },

    #[error("Malformed HTTP response: {details}")]
    Framing { details: String },

    #[error("HTTP error ({status}): {reason} - {}", excerpt(body, STATUS_EXCERPT_CHARS))]
    HttpStatus {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Platform reported logical errors: {}", messages.join("; "))]
    PlatformLogical { messages: Vec<String> },

    #[error("Failed to parse JSON response (status {status}): {}", excerpt(body, PARSE_EXCERPT_CHARS))]
    BodyParse { status: u16, body: String },

    #[error("{original} (verification failed: {verification})")]
    Verification {
        original: Box<PlatformError>,
        verification: String,
    },

    #[error("Invalid request: {details}")]
    InvalidRequest { details: String },
}

const STATUS_EXCERPT_CHARS: usize = 200;
const PARSE_EXCERPT_CHARS: usize = 500;

impl PlatformError {
    /// HTTP status carried by the error, if it is an HTTP-status error
    pub fn status(&self) -> Option<u16> {
        match self {
            PlatformError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when this is an HTTP-status error whose reason or body contains `marker`
    pub fn mentions(&self, marker: &str) -> bool {
        match self {
            PlatformError::HttpStatus { reason, body, .. } => {
                reason.contains(marker) || body.contains(marker)
            }
            _ => false,
        }
    }

    /// True for "not found" answers (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Local application errors (settings, stores, lookups, user input).
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Platform settings are incomplete: {missing}\n\n💡 Hint: Run `course-admin settings set --api-key <KEY> --base-url <URL>`")]
    SettingsIncomplete { missing: String },

    #[error("Invalid site base URL: {url}\nReason: {reason}\n\n💡 Hint: Use a full URL such as http://shop.example.com:8080/")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("No default category is configured\n\n💡 Hint: Run `course-admin categories` and then `course-admin settings set ... --category <ID>`")]
    NoDefaultCategory,

    #[error("Product not found: {bvin}")]
    ProductNotFound { bvin: String },

    #[error("No inventory record found for product {product_bvin}")]
    InventoryNotFound { product_bvin: String },

    #[error("Inventory record {bvin} is missing or has no ProductBvin")]
    InventoryIncomplete { bvin: String },

    #[error("Template not found: {template_id}\n\n💡 Hint: Run `course-admin templates list` to see the available templates")]
    TemplateNotFound { template_id: String },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Failed to read store file: {path}\nDetails: {details}")]
    StoreReadError { path: PathBuf, details: String },

    #[error("Failed to write store file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the data directory exists and you have write permissions")]
    StoreWriteError { path: PathBuf, details: String },

    #[error("Failed to write output file: {path}\nDetails: {details}")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder patterns and config files
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl AdminError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        AdminError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
