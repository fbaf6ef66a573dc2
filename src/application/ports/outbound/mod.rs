//! Outbound ports - Interfaces that the application requires from external systems

mod clock_port;
mod repository_port;

pub use clock_port::ClockPort;
pub use repository_port::{EncounterRepositoryPort, RepositoryError};
