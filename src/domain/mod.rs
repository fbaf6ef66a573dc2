//! Domain layer - Core combat rules with no I/O
//!
//! This layer contains:
//! - Entities: Encounter, Participant, CombatState
//! - Value Objects: identifiers, settings, difficulty labels
//! - Domain Services: pure combat operations (initiative, HP, conditions, duration)

pub mod entities;
pub mod services;
pub mod value_objects;
