//! Value objects - Immutable objects defined by their attributes

mod difficulty;
mod ids;
mod participant_type;
mod settings;

pub use difficulty::Difficulty;
pub use ids::{same_identity, CanonicalId, CharacterId, EncounterId};
pub use participant_type::ParticipantType;
pub use settings::{create_default_encounter_settings, EncounterSettings};
