use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stock record linked to exactly one product through `ProductBvin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bvin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_bvin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_point: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_of_stock_point: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InventoryRecord {
    /// Creation payload for a course with `seats` places; low stock starts at 10%.
    pub fn for_seats(seats: u32) -> Self {
        Self {
            quantity_on_hand: Some(i64::from(seats)),
            low_stock_point: Some(i64::from(seats / 10)),
            out_of_stock_point: Some(0),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.bvin.as_deref().filter(|id| !id.trim().is_empty())
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_bvin.as_deref().filter(|id| !id.trim().is_empty())
    }

    pub fn from_reply(value: &Value) -> Option<Self> {
        serde_json::from_value::<InventoryRecord>(value.clone())
            .ok()
            .filter(|record| record.id().is_some())
    }
}

/// Partial update the platform accepts for stock changes.
///
/// Serializes to exactly `Bvin`, `ProductBvin` and `QuantityOnHand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryQuantityUpdate {
    pub bvin: String,
    pub product_bvin: String,
    pub quantity_on_hand: u32,
}

impl From<&InventoryQuantityUpdate> for InventoryRecord {
    fn from(update: &InventoryQuantityUpdate) -> Self {
        Self {
            bvin: Some(update.bvin.clone()),
            product_bvin: Some(update.product_bvin.clone()),
            quantity_on_hand: Some(i64::from(update.quantity_on_hand)),
            ..Self::default()
        }
    }
}
