//! Domain entities - Core business objects with identity

mod combat_state;
mod encounter;
mod participant;

pub use combat_state::{create_default_combat_state, CombatState, InitiativeEntry};
pub use encounter::Encounter;
pub use participant::Participant;
