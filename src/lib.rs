//! course-admin - admin backend for course products on a Hotcakes store
//!
//! A course is a product whose SKU carries its start date, paired with one
//! inventory record (the seats) and linked to a default category. The
//! platform's REST API misreports some successful writes as failures; every
//! write goes through a compensating client that checks what really happened.
//!
//! # Architecture
//!
//! - **Domain Layer** (`course_catalog`): entities, SKU scheduling, draft building and the false-failure table
//! - **Application Layer** (`application`): use cases, DTOs, read models and factories
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): raw socket and reqwest transports, JSON file stores, formatters
//! - **Shared** (`shared`): error types, result aliases and file safety checks
//!
//! # Example
//!
//! ```no_run
//! use course_admin::prelude::*;
//!
//! # async fn demo() -> Result<()> {
//! let store = JsonFileStore::new("course-admin-data");
//! let use_case = CourseCatalogUseCase::new(
//!     RawSocketTransport::new(),
//!     store.clone(),
//!     store.clone(),
//!     store,
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = CreateCourseRequest::new("TPL-EXAMPLE-1H", "2024-02-01T09:30", 25)?;
//! let outcome = use_case.create_course(request).await?;
//! for warning in &outcome.warnings {
//!     eprintln!("{}", warning);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod course_catalog;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, JsonFileStore, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::memory::InMemoryStore;
    pub use crate::adapters::outbound::network::{
        CompensatingClient, RawSocketTransport, Settlement, StandardHttpTransport,
        VerificationContext,
    };
    pub use crate::application::dto::{
        CourseCreation, CourseDeletion, CreateCourseRequest, InventoryResolution,
        OperationOutcome, OutputFormat, TransportKind, UpdateCourseRequest,
    };
    pub use crate::application::read_models::{CourseListing, StockView};
    pub use crate::application::use_cases::{
        ConfigureSettingsUseCase, CourseCatalogUseCase, ManageTemplatesUseCase,
    };
    pub use crate::course_catalog::domain::{
        Bvin, Category, CourseProduct, CourseSchedule, CourseTemplate, InventoryRecord,
        PlatformEndpoint, PlatformSettings, PLATFORM_API_BASE_PATH,
    };
    pub use crate::course_catalog::policies::{FalseFailurePolicy, PlatformOperation};
    pub use crate::ports::outbound::{
        HttpMethod, InventoryMapStore, OutputPresenter, PlatformTransport, ProgressReporter,
        RequestDescriptor, ResponseBody, ResponseEnvelope, ResultFormatter, SettingsStore,
        TemplateStore,
    };
    pub use crate::shared::error::{AdminError, ExitCode, PlatformError};
    pub use crate::shared::{PlatformResult, Result};
}
