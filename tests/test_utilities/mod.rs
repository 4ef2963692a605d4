#![allow(dead_code)]
/// Shared helpers for integration and end-to-end tests
pub mod fake_platform;
pub mod mocks;
