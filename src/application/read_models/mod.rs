//! Read models: view-shaped rows for listings

pub mod course_listing;

pub use course_listing::{CourseListing, StockView};
