//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: document-backed encounter repository
//! - Clock: system time adapter
//! - Config: engine configuration

pub mod clock;
pub mod config;
pub mod persistence;
