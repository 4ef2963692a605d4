/// Filesystem adapters: JSON stores and output writers
mod file_writer;
mod json_file_store;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use json_file_store::{
    JsonFileStore, DEFAULT_DATA_DIR, INVENTORY_MAP_FILE, SETTINGS_FILE, TEMPLATES_FILE,
};
