use crate::course_catalog::domain::{validate_templates, CourseTemplate};
use crate::ports::outbound::TemplateStore;
use crate::shared::error::AdminError;
use crate::shared::Result;
use tracing::info;
use uuid::Uuid;

/// ManageTemplatesUseCase - edits the locally stored course templates
///
/// Every change is validated as a whole list before it is written, so a
/// rejected edit leaves the stored file untouched.
pub struct ManageTemplatesUseCase<TS> {
    template_store: TS,
}

/// Result of adding a template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateUpsert {
    pub template: CourseTemplate,
    /// An existing template with the same id was replaced
    pub replaced: bool,
}

impl<TS: TemplateStore> ManageTemplatesUseCase<TS> {
    pub fn new(template_store: TS) -> Self {
        Self { template_store }
    }

    pub fn list(&self) -> Result<Vec<CourseTemplate>> {
        self.template_store.read_templates()
    }

    pub fn show(&self, template_id: &str) -> Result<CourseTemplate> {
        self.list()?
            .into_iter()
            .find(|template| template.template_id == template_id)
            .ok_or_else(|| not_found(template_id))
    }

    /// Adds a template, replacing the one with the same id in place.
    ///
    /// A template without an id gets a fresh `TPL-<uuid>`.
    pub fn add(&self, mut template: CourseTemplate) -> Result<TemplateUpsert> {
        if template.template_id.trim().is_empty() {
            template.template_id = format!("TPL-{}", Uuid::new_v4());
        }

        let mut templates = self.list()?;
        let replaced = match templates
            .iter_mut()
            .find(|existing| existing.template_id == template.template_id)
        {
            Some(existing) => {
                *existing = template.clone();
                true
            }
            None => {
                templates.push(template.clone());
                false
            }
        };

        validate_templates(&templates)?;
        self.template_store.write_templates(&templates)?;
        info!(template = %template.template_id, replaced, "template saved");
        Ok(TemplateUpsert { template, replaced })
    }

    /// Parses one template object and adds it.
    pub fn add_from_json(&self, document: &str) -> Result<TemplateUpsert> {
        let template: CourseTemplate = serde_json::from_str(document).map_err(|e| {
            AdminError::Validation {
                message: format!("template is not a valid JSON object: {}", e),
            }
        })?;
        self.add(template)
    }

    pub fn remove(&self, template_id: &str) -> Result<CourseTemplate> {
        let mut templates = self.list()?;
        let position = templates
            .iter()
            .position(|template| template.template_id == template_id)
            .ok_or_else(|| not_found(template_id))?;
        let removed = templates.remove(position);

        self.template_store.write_templates(&templates)?;
        info!(template = template_id, "template removed");
        Ok(removed)
    }

    /// Replaces the whole list with a JSON array of templates.
    pub fn replace_all(&self, document: &str) -> Result<Vec<CourseTemplate>> {
        let templates: Vec<CourseTemplate> =
            serde_json::from_str(document).map_err(|e| AdminError::Validation {
                message: format!("templates must be a JSON array of template objects: {}", e),
            })?;

        validate_templates(&templates)?;
        self.template_store.write_templates(&templates)?;
        info!(count = templates.len(), "templates replaced");
        Ok(templates)
    }
}

fn not_found(template_id: &str) -> anyhow::Error {
    AdminError::TemplateNotFound {
        template_id: template_id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::InMemoryStore;
    use serde_json::Map;

    fn template(id: &str, name: &str) -> CourseTemplate {
        CourseTemplate {
            template_id: id.to_string(),
            name: name.to_string(),
            base_sku: Some("BREW".to_string()),
            default_price: Some(12000.0),
            extra: Map::new(),
            ..CourseTemplate::default()
        }
    }

    #[test]
    fn test_list_seeds_example() {
        let use_case = ManageTemplatesUseCase::new(InMemoryStore::new());
        let templates = use_case.list().unwrap();
        assert_eq!(templates, vec![CourseTemplate::example()]);
    }

    #[test]
    fn test_show_unknown_template() {
        let use_case = ManageTemplatesUseCase::new(InMemoryStore::new());
        let err = use_case.show("TPL-NOPE").unwrap_err();
        assert!(err.to_string().contains("Template not found: TPL-NOPE"));
    }

    #[test]
    fn test_add_appends_new_template() {
        let store = InMemoryStore::new();
        let use_case = ManageTemplatesUseCase::new(store.clone());

        let upsert = use_case.add(template("TPL-BREW", "Beer Brewing")).unwrap();

        assert!(!upsert.replaced);
        let ids: Vec<String> = store
            .read_templates()
            .unwrap()
            .into_iter()
            .map(|t| t.template_id)
            .collect();
        assert_eq!(ids, vec!["TPL-EXAMPLE-1H", "TPL-BREW"]);
    }

    #[test]
    fn test_add_replaces_in_place() {
        let use_case = ManageTemplatesUseCase::new(InMemoryStore::new());
        use_case.add(template("TPL-BREW", "Beer Brewing")).unwrap();

        let upsert = use_case.add(template("TPL-EXAMPLE-1H", "Renamed")).unwrap();

        assert!(upsert.replaced);
        let templates = use_case.list().unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].name, "Renamed");
    }

    #[test]
    fn test_add_assigns_id_when_missing() {
        let use_case = ManageTemplatesUseCase::new(InMemoryStore::new());
        let upsert = use_case.add(template("  ", "Sourdough")).unwrap();

        assert!(upsert.template.template_id.starts_with("TPL-"));
        assert_eq!(upsert.template.template_id.len(), "TPL-".len() + 36);
        assert!(use_case.show(&upsert.template.template_id).is_ok());
    }

    #[test]
    fn test_add_invalid_template_leaves_store_untouched() {
        let use_case = ManageTemplatesUseCase::new(InMemoryStore::new());
        assert!(use_case.add(template("TPL-X", "")).is_err());
        assert_eq!(use_case.list().unwrap().len(), 1);
    }

    #[test]
    fn test_add_from_json_rejects_non_object() {
        let use_case = ManageTemplatesUseCase::new(InMemoryStore::new());
        let err = use_case.add_from_json("\"just text\"").unwrap_err();
        assert!(err.to_string().contains("not a valid JSON object"));
    }

    #[test]
    fn test_remove() {
        let use_case = ManageTemplatesUseCase::new(InMemoryStore::new());
        let removed = use_case.remove("TPL-EXAMPLE-1H").unwrap();
        assert_eq!(removed.name, "Example Template (1h)");
        assert!(use_case.list().unwrap().is_empty());
        assert!(use_case.remove("TPL-EXAMPLE-1H").is_err());
    }

    #[test]
    fn test_replace_all() {
        let use_case = ManageTemplatesUseCase::new(InMemoryStore::new());
        let replaced = use_case
            .replace_all(r#"[{"templateId": "A", "name": "Alpha"}, {"templateId": "B", "name": "Beta"}]"#)
            .unwrap();
        assert_eq!(replaced.len(), 2);
        assert_eq!(use_case.show("B").unwrap().name, "Beta");
    }

    #[test]
    fn test_replace_all_rejects_invalid_documents() {
        let use_case = ManageTemplatesUseCase::new(InMemoryStore::new());

        assert!(use_case.replace_all("{not json").is_err());
        assert!(use_case
            .replace_all(r#"{"templateId": "A", "name": "Alpha"}"#)
            .is_err());
        let duplicate = use_case
            .replace_all(r#"[{"templateId": "A", "name": "x"}, {"templateId": "A", "name": "y"}]"#)
            .unwrap_err();
        assert!(duplicate.to_string().contains("duplicate templateId"));

        assert_eq!(use_case.list().unwrap(), vec![CourseTemplate::example()]);
    }
}
