use crate::shared::Result;
use std::collections::BTreeMap;

/// Product id → inventory id
pub type InventoryMap = BTreeMap<String, String>;

/// InventoryMapStore port for the cached product→inventory linkage
///
/// The platform offers no reliable reverse lookup, so the link is cached
/// once discovered. Entries are a cache, never a source of truth: a stale
/// entry is dropped and re-resolved when it fails.
///
/// The whole mapping is read and rewritten on every change; concurrent
/// writers are last-write-wins.
pub trait InventoryMapStore: Send + Sync {
    /// Reads the whole mapping
    fn read_mapping(&self) -> Result<InventoryMap>;

    /// Replaces the whole mapping
    fn write_mapping(&self, mapping: &InventoryMap) -> Result<()>;

    /// Cached inventory id for a product
    fn lookup(&self, product_bvin: &str) -> Result<Option<String>> {
        Ok(self.read_mapping()?.get(product_bvin).cloned())
    }

    /// Stores or replaces the link for a product
    fn remember(&self, product_bvin: &str, inventory_bvin: &str) -> Result<()> {
        let mut mapping = self.read_mapping()?;
        if mapping.get(product_bvin).map(String::as_str) == Some(inventory_bvin) {
            return Ok(());
        }
        mapping.insert(product_bvin.to_string(), inventory_bvin.to_string());
        self.write_mapping(&mapping)
    }

    /// Drops the link for a product; returns whether an entry existed
    fn forget(&self, product_bvin: &str) -> Result<bool> {
        let mut mapping = self.read_mapping()?;
        if mapping.remove(product_bvin).is_none() {
            return Ok(false);
        }
        self.write_mapping(&mapping)?;
        Ok(true)
    }
}
