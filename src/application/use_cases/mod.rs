/// Use cases module containing application business logic orchestration
mod configure_settings;
mod course_catalog;
mod manage_templates;

pub use configure_settings::ConfigureSettingsUseCase;
pub use course_catalog::{CourseCatalogUseCase, DEFAULT_STOCK_CONCURRENCY};
pub use manage_templates::{ManageTemplatesUseCase, TemplateUpsert};
