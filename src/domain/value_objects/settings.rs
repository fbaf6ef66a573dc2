//! Encounter settings value object
//!
//! Settings are stored inside the encounter document, so every field is set
//! explicitly by the default constructor. Two defaults always compare and
//! serialize identically.

use serde::{Deserialize, Serialize};

/// Per-encounter table options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncounterSettings {
    /// Whether players can see the encounter before combat starts
    pub visible_to_players: bool,
    /// Roll initiative automatically for combatants without a manual roll
    pub auto_roll_initiative: bool,
    /// Track limited resources (spell slots, legendary actions)
    pub track_resources: bool,
    /// Insert lair actions at initiative count 20
    pub enable_lair_actions: bool,
    /// Use a movement grid for positioning
    pub enable_grid_movement: bool,
    /// Size of one grid square, in feet
    pub grid_size: u32,
}

impl Default for EncounterSettings {
    fn default() -> Self {
        Self {
            visible_to_players: false,
            auto_roll_initiative: true,
            track_resources: true,
            enable_lair_actions: false,
            enable_grid_movement: false,
            grid_size: 5,
        }
    }
}

/// Canonical default settings for a new encounter
pub fn create_default_encounter_settings() -> EncounterSettings {
    EncounterSettings::default()
}
