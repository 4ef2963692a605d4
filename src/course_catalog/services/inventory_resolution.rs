use serde_json::Value;

/// Outcome of picking an inventory record out of a by-product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySelection {
    pub bvin: String,
    /// How many records the listing returned; more than one is ambiguous
    pub candidates: usize,
}

impl InventorySelection {
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > 1
    }
}

/// Picks the first inventory record from a by-product listing.
///
/// The listing may arrive as a bare array, as an object with a `Content`
/// array, or as a single record. Returns `None` when nothing usable is
/// present. The platform should hold one record per product but does not
/// enforce it, so extra records are reported through `candidates`.
pub fn select_inventory(listing: &Value) -> Option<InventorySelection> {
    let records: Vec<&Value> = match listing {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => match map.get("Content") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ if map.contains_key("Bvin") => vec![listing],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    let first = records.first()?;
    let bvin = first
        .get("Bvin")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())?;

    Some(InventorySelection {
        bvin: bvin.to_string(),
        candidates: records.len(),
    })
}
