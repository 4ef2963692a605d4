/// Course catalog domain: entities, derivation services and the
/// false-failure compensation table.
pub mod domain;
pub mod policies;
pub mod services;
