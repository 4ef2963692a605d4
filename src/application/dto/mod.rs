/// Data Transfer Objects for the application layer
///
/// DTOs carry validated inputs into the use cases and structured results
/// back out to the CLI.
mod course_requests;
mod operation_outcome;
mod output_format;
mod transport_kind;

pub use course_requests::{CreateCourseRequest, UpdateCourseRequest};
pub use operation_outcome::{CourseCreation, CourseDeletion, InventoryResolution, OperationOutcome};
pub use output_format::OutputFormat;
pub use transport_kind::TransportKind;
