use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Fields the platform manages itself and rejects when sent back on update
const SERVER_MANAGED_FIELDS: [&str; 1] = ["CreationDateUtc"];

/// A course as stored on the platform: a product whose SKU carries the start date.
///
/// Only the fields this tool edits are typed; everything else is kept
/// in `extra` so a fetched record can be sent back without losing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CourseProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bvin: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sku: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CourseProduct {
    /// The platform id, if present and non-empty
    pub fn id(&self) -> Option<&str> {
        self.bvin.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Removes fields the platform refuses to accept on update.
    pub fn strip_server_managed_fields(&mut self) {
        for field in SERVER_MANAGED_FIELDS {
            self.extra.remove(field);
        }
    }

    /// Interprets a platform reply as a product; `None` if it carries no usable id.
    pub fn from_reply(value: &Value) -> Option<Self> {
        serde_json::from_value::<CourseProduct>(value.clone())
            .ok()
            .filter(|product| product.id().is_some())
    }
}

/// The platform sends `null` for text fields it never filled in
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
