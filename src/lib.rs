//! Encounter Engine - Combat bookkeeping for turn-based TTRPG encounters
//!
//! The engine owns the rules an encounter follows once combat starts:
//! - Initiative ordering and d20 rolls
//! - Hit point damage, healing and invariant repair
//! - Condition tracking
//! - Combat duration accounting
//!
//! The `domain` layer is a pure transformation library. The `application`
//! layer sequences turns on top of it, and `infrastructure` holds adapters.

pub mod application;
pub mod domain;
pub mod infrastructure;
