use crate::application::read_models::CourseListing;
use crate::course_catalog::domain::{Category, CourseTemplate};
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use serde::Serialize;
use serde_json::Value;

/// JsonFormatter adapter: pretty-printed JSON for every result
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format_courses(&self, courses: &[CourseListing]) -> Result<String> {
        Self::render(courses)
    }

    fn format_templates(&self, templates: &[CourseTemplate]) -> Result<String> {
        Self::render(templates)
    }

    fn format_categories(&self, categories: &[Category]) -> Result<String> {
        Self::render(categories)
    }

    fn format_document(&self, document: &Value) -> Result<String> {
        Self::render(document)
    }
}
