//! Application layer - Use cases built on the domain core
//!
//! This layer contains:
//! - Ports: interfaces the use cases require (storage, clock)
//! - Services: the encounter-update use cases that sequence combat

pub mod ports;
pub mod services;
