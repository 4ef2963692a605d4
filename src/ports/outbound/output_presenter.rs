use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// Abstracts where formatted results end up (stdout, file).
pub trait OutputPresenter {
    /// Presents the formatted content
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
