mod formatter_factory;
mod presenter_factory;
mod transport_factory;

pub use formatter_factory::FormatterFactory;
pub use presenter_factory::{PresenterFactory, PresenterType};
pub use transport_factory::TransportFactory;
