pub mod course_draft;
pub mod inventory_resolution;
pub mod sku_scheduler;

pub use course_draft::CourseDraft;
pub use inventory_resolution::{select_inventory, InventorySelection};
pub use sku_scheduler::SkuScheduler;
