use crate::course_catalog::domain::CourseTemplate;
use crate::shared::Result;

/// TemplateStore port for the ordered list of course templates
pub trait TemplateStore: Send + Sync {
    /// Reads all templates in stored order, seeding an example when none exist yet
    fn read_templates(&self) -> Result<Vec<CourseTemplate>>;

    /// Replaces the stored list
    fn write_templates(&self, templates: &[CourseTemplate]) -> Result<()>;
}
