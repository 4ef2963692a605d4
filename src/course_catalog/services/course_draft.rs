use crate::course_catalog::domain::{CourseProduct, CourseSchedule, CourseTemplate, InventoryRecord};
use crate::course_catalog::services::SkuScheduler;
use serde_json::{json, Map};

/// Inventory mode used when a template does not set one
const DEFAULT_INVENTORY_MODE: i64 = 100;

/// Product status code for an active listing
const ACTIVE_STATUS: i64 = 1;

/// Payloads for a new course, ready to be sent to the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub product: CourseProduct,
    pub inventory: InventoryRecord,
}

impl CourseDraft {
    /// Builds product and inventory payloads from a template, a start and a seat count.
    pub fn from_template(template: &CourseTemplate, schedule: &CourseSchedule, seats: u32) -> Self {
        let mut extra = Map::new();
        extra.insert(
            "ShortDescription".to_string(),
            json!(template.default_description.clone().unwrap_or_default()),
        );
        extra.insert(
            "InventoryMode".to_string(),
            json!(template
                .default_inventory_mode
                .unwrap_or(DEFAULT_INVENTORY_MODE)),
        );
        extra.insert("IsAvailableForSale".to_string(), json!(true));
        extra.insert("Status".to_string(), json!(ACTIVE_STATUS));

        let product = CourseProduct {
            bvin: None,
            sku: SkuScheduler::course_sku(template.base_sku.as_deref(), schedule),
            product_name: SkuScheduler::course_name(&template.name, schedule),
            site_price: template.default_price,
            extra,
        };

        Self {
            product,
            inventory: InventoryRecord::for_seats(seats),
        }
    }
}
