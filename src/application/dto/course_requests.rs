use crate::course_catalog::domain::{Bvin, CourseSchedule};
use crate::shared::error::AdminError;
use crate::shared::Result;

/// Input of the create-course operation
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCourseRequest {
    pub template_id: String,
    pub schedule: CourseSchedule,
    pub seats: u32,
}

impl CreateCourseRequest {
    /// Parses the raw CLI inputs; seats must be at least 1.
    pub fn new(template_id: &str, start: &str, seats: u32) -> Result<Self> {
        let template_id = template_id.trim();
        if template_id.is_empty() {
            return Err(AdminError::invalid_input("template", "must not be empty").into());
        }
        if seats == 0 {
            return Err(AdminError::invalid_input("seats", "must be at least 1").into());
        }
        Ok(Self {
            template_id: template_id.to_string(),
            schedule: CourseSchedule::parse(start)?,
            seats,
        })
    }
}

/// Input of the update-schedule/price operation
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCourseRequest {
    pub product_bvin: Bvin,
    pub price: f64,
    pub schedule: CourseSchedule,
}

impl UpdateCourseRequest {
    pub fn new(product_bvin: &str, price: f64, start: &str) -> Result<Self> {
        if !price.is_finite() || price < 0.0 {
            return Err(AdminError::invalid_input("price", "must be a number >= 0").into());
        }
        Ok(Self {
            product_bvin: Bvin::new(product_bvin)?,
            price,
            schedule: CourseSchedule::parse(start)?,
        })
    }
}
