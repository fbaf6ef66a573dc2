//! Application services - Use case implementations
//!
//! Services accept port implementations and return domain entities or small
//! result types describing what changed.

pub mod encounter_service;

pub use encounter_service::{
    CombatSummary, CreateEncounterRequest, EncounterError, EncounterService, HitPointsEdit,
    HitPointsSnapshot, InitiativeSeed, StartCombatRequest, TurnAdvance,
};
