use crate::course_catalog::domain::{validate_templates, CourseTemplate, PlatformSettings};
use crate::ports::outbound::{InventoryMap, InventoryMapStore, SettingsStore, TemplateStore};
use crate::shared::Result;
use dashmap::DashMap;
use std::sync::{Arc, RwLock};

/// InMemoryStore adapter: process-local settings, templates and inventory map
///
/// Backs tests and embedding where nothing should touch the disk. Clones
/// share the same state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    settings: Arc<RwLock<Option<PlatformSettings>>>,
    templates: Arc<RwLock<Option<Vec<CourseTemplate>>>>,
    mapping: Arc<DashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PlatformSettings) -> Self {
        let store = Self::new();
        if let Ok(mut slot) = store.settings.write() {
            *slot = Some(settings);
        }
        store
    }

    /// Number of cached product→inventory links
    pub fn mapping_len(&self) -> usize {
        self.mapping.len()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow::anyhow!("in-memory store lock was poisoned")
}

impl SettingsStore for InMemoryStore {
    fn read_settings(&self) -> Result<PlatformSettings> {
        let mut slot = self.settings.write().map_err(poisoned)?;
        Ok(slot.get_or_insert_with(PlatformSettings::default).clone())
    }

    fn write_settings(&self, settings: &PlatformSettings) -> Result<()> {
        *self.settings.write().map_err(poisoned)? = Some(settings.clone());
        Ok(())
    }
}

impl TemplateStore for InMemoryStore {
    fn read_templates(&self) -> Result<Vec<CourseTemplate>> {
        let mut slot = self.templates.write().map_err(poisoned)?;
        Ok(slot
            .get_or_insert_with(|| vec![CourseTemplate::example()])
            .clone())
    }

    fn write_templates(&self, templates: &[CourseTemplate]) -> Result<()> {
        validate_templates(templates)?;
        *self.templates.write().map_err(poisoned)? = Some(templates.to_vec());
        Ok(())
    }
}

impl InventoryMapStore for InMemoryStore {
    fn read_mapping(&self) -> Result<InventoryMap> {
        Ok(self
            .mapping
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    fn write_mapping(&self, mapping: &InventoryMap) -> Result<()> {
        self.mapping.clear();
        for (product, inventory) in mapping {
            self.mapping.insert(product.clone(), inventory.clone());
        }
        Ok(())
    }

    fn lookup(&self, product_bvin: &str) -> Result<Option<String>> {
        Ok(self.mapping.get(product_bvin).map(|entry| entry.value().clone()))
    }

    fn remember(&self, product_bvin: &str, inventory_bvin: &str) -> Result<()> {
        self.mapping
            .insert(product_bvin.to_string(), inventory_bvin.to_string());
        Ok(())
    }

    fn forget(&self, product_bvin: &str) -> Result<bool> {
        Ok(self.mapping.remove(product_bvin).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_seeded() {
        let store = InMemoryStore::new();
        assert_eq!(store.read_settings().unwrap(), PlatformSettings::default());
        assert_eq!(store.read_templates().unwrap(), vec![CourseTemplate::example()]);
        assert!(store.read_mapping().unwrap().is_empty());
    }

    #[test]
    fn test_clones_share_mapping() {
        let store = InMemoryStore::new();
        let clone = store.clone();
        store.remember("p-1", "inv-1").unwrap();

        assert_eq!(clone.lookup("p-1").unwrap().as_deref(), Some("inv-1"));
        assert!(clone.forget("p-1").unwrap());
        assert_eq!(store.mapping_len(), 0);
    }

    #[test]
    fn test_write_mapping_replaces_everything() {
        let store = InMemoryStore::new();
        store.remember("old", "inv-0").unwrap();

        let mut mapping = InventoryMap::new();
        mapping.insert("p-1".to_string(), "inv-1".to_string());
        store.write_mapping(&mapping).unwrap();

        assert_eq!(store.read_mapping().unwrap(), mapping);
    }

    #[test]
    fn test_rejects_invalid_templates() {
        let store = InMemoryStore::new();
        let mut template = CourseTemplate::example();
        template.name = String::new();
        assert!(store.write_templates(&[template]).is_err());
    }
}
