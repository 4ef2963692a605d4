/// Shared kernel - error types, result alias and file safety checks
pub mod error;
pub mod result;
pub mod security;

pub use result::{PlatformResult, Result};
