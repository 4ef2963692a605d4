use serde::{Deserialize, Serialize};

/// Catalog category as listed by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Category {
    pub bvin: String,
    #[serde(default)]
    pub name: String,
}

/// Link between a product and a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryProductAssociation {
    pub product_id: String,
    pub category_id: String,
}
