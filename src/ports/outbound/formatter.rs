use crate::application::read_models::CourseListing;
use crate::course_catalog::domain::{Category, CourseTemplate};
use crate::shared::Result;
use serde_json::Value;

/// ResultFormatter port for rendering operation results
///
/// Lists get dedicated renderings; every other result is rendered from its
/// JSON document.
pub trait ResultFormatter {
    fn format_courses(&self, courses: &[CourseListing]) -> Result<String>;

    fn format_templates(&self, templates: &[CourseTemplate]) -> Result<String>;

    fn format_categories(&self, categories: &[Category]) -> Result<String>;

    /// Renders any other result (product, inventory record, outcome)
    fn format_document(&self, document: &Value) -> Result<String>;
}
