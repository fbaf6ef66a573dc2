//! Participant entity - A combatant placed into an encounter

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CharacterId, ParticipantType};

/// A combatant inside an encounter.
///
/// Participants are copied from a character or monster template when the
/// encounter is assembled and live only inside their encounter's participant
/// list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Reference to the source character or monster
    pub character_id: CharacterId,
    pub name: String,
    pub participant_type: ParticipantType,
    pub max_hit_points: i32,
    /// Kept within `0..=max_hit_points`
    pub current_hit_points: i32,
    /// Absorbs damage before `current_hit_points`, never negative
    pub temporary_hit_points: i32,
    pub armor_class: i32,
    pub is_player: bool,
    pub is_visible: bool,
    /// Active condition names, no duplicates
    pub conditions: Vec<String>,
    pub notes: String,
    /// Caller-specific metadata the engine never interprets
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
}

impl Participant {
    /// Create a participant at full health
    pub fn new(
        character_id: CharacterId,
        name: impl Into<String>,
        participant_type: ParticipantType,
        max_hit_points: i32,
    ) -> Self {
        Self {
            character_id,
            name: name.into(),
            participant_type,
            max_hit_points,
            current_hit_points: max_hit_points,
            temporary_hit_points: 0,
            armor_class: 10,
            is_player: participant_type.is_player_character(),
            is_visible: true,
            conditions: Vec::new(),
            notes: String::new(),
            extensions: BTreeMap::new(),
        }
    }

    pub fn with_current_hp(mut self, current: i32) -> Self {
        self.current_hit_points = current;
        self
    }

    pub fn with_temp_hp(mut self, temporary: i32) -> Self {
        self.temporary_hit_points = temporary;
        self
    }

    pub fn with_armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = armor_class;
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// A participant at 0 HP is down, not removed
    pub fn is_down(&self) -> bool {
        self.current_hit_points <= 0
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.iter().any(|c| c == name)
    }

    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).map(String::as_str)
    }
}
