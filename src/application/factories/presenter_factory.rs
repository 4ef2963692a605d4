use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Presenter type enumeration for factory pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    /// Stdout unless an output file was requested
    pub fn for_output(output: Option<PathBuf>) -> Box<dyn OutputPresenter> {
        Self::create(match output {
            Some(path) => PresenterType::File(path),
            None => PresenterType::Stdout,
        })
    }

    /// Creates a presenter instance for the specified type
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_presenter_writes_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("courses.json");

        let presenter = PresenterFactory::for_output(Some(path.clone()));
        presenter.present("[]").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }

    #[test]
    fn test_presenter_type_equality() {
        assert_eq!(PresenterType::Stdout, PresenterType::Stdout);
        assert_ne!(
            PresenterType::File(PathBuf::from("/tmp/a.json")),
            PresenterType::File(PathBuf::from("/tmp/b.json"))
        );
    }
}
