use serde::{Deserialize, Serialize};

/// Kind of combatant placed into an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantType {
    /// Controlled by a player at the table
    PlayerCharacter,
    /// Controlled by the DM but not a monster (allies, bystanders)
    NonPlayerCharacter,
    Monster,
}

impl ParticipantType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PlayerCharacter => "Player Character",
            Self::NonPlayerCharacter => "NPC",
            Self::Monster => "Monster",
        }
    }

    pub fn is_player_character(&self) -> bool {
        matches!(self, Self::PlayerCharacter)
    }
}

impl std::fmt::Display for ParticipantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
