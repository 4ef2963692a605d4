use crate::adapters::outbound::network::{RawSocketTransport, StandardHttpTransport};
use crate::application::dto::TransportKind;
use crate::ports::outbound::PlatformTransport;
use crate::shared::Result;
use std::time::Duration;

/// Factory for creating the platform transport selected in the configuration
pub struct TransportFactory;

impl TransportFactory {
    /// Creates a transport of `kind` with the given per-request timeout
    ///
    /// # Errors
    /// Returns an error if the standard HTTP client cannot be built.
    pub fn create(kind: TransportKind, timeout: Duration) -> Result<Box<dyn PlatformTransport>> {
        Ok(match kind {
            TransportKind::Raw => Box::new(RawSocketTransport::with_timeout(timeout)),
            TransportKind::Standard => Box::new(StandardHttpTransport::new(timeout)?),
        })
    }
}
