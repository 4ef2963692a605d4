pub mod bvin;
pub mod category;
pub mod course_product;
pub mod inventory_record;
pub mod schedule;
pub mod settings;
pub mod template;

pub use bvin::Bvin;
pub use category::{Category, CategoryProductAssociation};
pub use course_product::CourseProduct;
pub use inventory_record::{InventoryQuantityUpdate, InventoryRecord};
pub use schedule::{CourseSchedule, SkuSchedule};
pub use settings::{PlatformEndpoint, PlatformSettings, PLATFORM_API_BASE_PATH};
pub use template::{validate_templates, CourseTemplate};
