/// Ports module defining interfaces for hexagonal architecture
///
/// The application core only ever talks to the outside through these
/// outbound (driven) ports.
pub mod outbound;
