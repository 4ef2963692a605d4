/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define what the application core needs from the outside:
/// the commerce platform, local persistence and the console.
pub mod formatter;
pub mod inventory_map_store;
pub mod output_presenter;
pub mod platform_transport;
pub mod progress_reporter;
pub mod settings_store;
pub mod template_store;

pub use formatter::ResultFormatter;
pub use inventory_map_store::{InventoryMap, InventoryMapStore};
pub use output_presenter::OutputPresenter;
pub use platform_transport::{
    success_marker, HttpMethod, PlatformTransport, RequestDescriptor, ResponseBody,
    ResponseEnvelope,
};
pub use progress_reporter::ProgressReporter;
pub use settings_store::SettingsStore;
pub use template_store::TemplateStore;
