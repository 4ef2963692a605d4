use crate::course_catalog::domain::{CourseProduct, SkuSchedule};
use serde::Serialize;

/// One row of the course list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListing {
    pub bvin: String,
    pub sku: String,
    pub name: String,
    pub price: Option<f64>,
    /// Start decoded from the SKU suffix, if it carries one
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<StockView>,
}

impl CourseListing {
    pub fn from_product(product: &CourseProduct) -> Option<Self> {
        let bvin = product.id()?.to_string();
        Some(Self {
            bvin,
            sku: product.sku.clone(),
            name: product.product_name.clone(),
            price: product.site_price,
            schedule: SkuSchedule::from_sku(&product.sku).label(),
            stock: None,
        })
    }
}

/// Stock of one course; a failed lookup is kept on the row as `error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_bvin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Advisory notes from resolving the inventory record
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl StockView {
    pub fn known(inventory_bvin: impl Into<String>, quantity_on_hand: Option<i64>) -> Self {
        Self {
            inventory_bvin: Some(inventory_bvin.into()),
            quantity_on_hand,
            error: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            inventory_bvin: None,
            quantity_on_hand: None,
            error: Some(error.into()),
            warnings: Vec::new(),
        }
    }
}
