/// Mock implementations for testing
mod mock_platform;
mod mock_progress_reporter;

pub use mock_platform::MockPlatform;
pub use mock_progress_reporter::MockProgressReporter;
