/// ProgressReporter port for user-facing progress during operations
///
/// Messages go to the operator (stderr), never into command output.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a multi-item step
    ///
    /// # Arguments
    /// * `current` - Items done so far
    /// * `total` - Total expected items
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or advisory warning
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
