//! Encounter Engine - Roll initiative for a stored encounter document
//!
//! Usage: `encounter-engine <encounter.json>`
//!
//! Reads an encounter document, starts combat with automatic initiative rolls
//! and prints the resulting turn order, difficulty and combat state as JSON.
//! Dexterity tie-breaks come from each participant's `dexterity` extension.
//! Documents that disable auto-roll are rolled anyway, since the command line
//! has no way to enter table rolls.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use encounter_engine::application::services::{
    EncounterService, InitiativeSeed, StartCombatRequest,
};
use encounter_engine::domain::entities::{Encounter, Participant};
use encounter_engine::domain::services::RngDiceRoller;
use encounter_engine::infrastructure::clock::SystemClock;
use encounter_engine::infrastructure::config::EngineConfig;
use encounter_engine::infrastructure::persistence::InMemoryEncounterRepository;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = EngineConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: encounter-engine <encounter.json>")?;
    let document = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;
    let mut encounter: Encounter = serde_json::from_str(&document)
        .with_context(|| format!("Invalid encounter document: {}", path))?;
    tracing::info!(encounter_id = %encounter.id, "Loaded encounter: {}", encounter.name);
    if force_auto_roll(&mut encounter) {
        tracing::warn!("Document disables auto-roll; rolling initiative anyway");
    }

    let roller = match config.dice_seed {
        Some(seed) => {
            tracing::info!(seed, "Using seeded dice");
            RngDiceRoller::seeded(seed)
        }
        None => RngDiceRoller::from_entropy(),
    };

    let repository = Arc::new(InMemoryEncounterRepository::new());
    let service = EncounterService::new(repository, Arc::new(SystemClock), Box::new(roller));
    let encounter = service.import_encounter(encounter).await?;

    let seeds = encounter
        .participants
        .iter()
        .map(|p| InitiativeSeed::auto(p.character_id, dexterity(p)))
        .collect();

    let combat_state = service
        .start_combat(encounter.id, StartCombatRequest { seeds })
        .await?;
    let difficulty = service.estimate_difficulty(encounter.id).await?;

    let turn_order: Vec<_> = combat_state
        .initiative_order
        .iter()
        .map(|entry| {
            let name = encounter
                .participant(&entry.participant_id)
                .map(|p| p.name.as_str())
                .unwrap_or("unknown");
            serde_json::json!({
                "name": name,
                "initiative": entry.initiative,
                "dexterity": entry.dexterity,
            })
        })
        .collect();

    let report = serde_json::json!({
        "encounter": encounter.name,
        "difficulty": difficulty,
        "turn_order": turn_order,
        "combat_state": combat_state,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Returns true if the document had auto-roll switched off
fn force_auto_roll(encounter: &mut Encounter) -> bool {
    let was_off = !encounter.settings.auto_roll_initiative;
    encounter.settings.auto_roll_initiative = true;
    was_off
}

/// Dexterity from the participant's extensions, 0 when absent or malformed
fn dexterity(participant: &Participant) -> i32 {
    let Some(raw) = participant.extension("dexterity") else {
        return 0;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(participant = %participant.name, value = raw, "Ignoring bad dexterity");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_engine::application::services::EncounterError;
    use encounter_engine::domain::value_objects::{CharacterId, ParticipantType};

    fn document() -> Encounter {
        let scout = Participant::new(CharacterId::new(), "Scout", ParticipantType::Monster, 9)
            .with_extension("dexterity", " 14 ");
        let mut encounter = Encounter::new("Watchtower").with_participant(scout);
        encounter.settings.auto_roll_initiative = false;
        encounter
    }

    #[test]
    fn test_dexterity_extension() {
        let encounter = document();
        assert_eq!(dexterity(&encounter.participants[0]), 14);

        let sloppy = Participant::new(CharacterId::new(), "Imp", ParticipantType::Monster, 5)
            .with_extension("dexterity", "quick");
        assert_eq!(dexterity(&sloppy), 0);
    }

    #[tokio::test]
    async fn test_document_without_auto_roll_still_starts() {
        let mut encounter = document();
        let seeds: Vec<_> = encounter
            .participants
            .iter()
            .map(|p| InitiativeSeed::auto(p.character_id, dexterity(p)))
            .collect();
        let service = EncounterService::new(
            Arc::new(InMemoryEncounterRepository::new()),
            Arc::new(SystemClock),
            Box::new(RngDiceRoller::seeded(3)),
        );

        let stored = service.import_encounter(encounter.clone()).await.unwrap();
        let refused = service
            .start_combat(stored.id, StartCombatRequest { seeds: seeds.clone() })
            .await;
        assert!(matches!(refused, Err(EncounterError::MissingInitiative(_))));

        assert!(force_auto_roll(&mut encounter));
        assert!(!force_auto_roll(&mut encounter));
        let stored = service.import_encounter(encounter).await.unwrap();
        let state = service
            .start_combat(stored.id, StartCombatRequest { seeds })
            .await
            .unwrap();
        assert_eq!(state.initiative_order[0].dexterity, 14);
    }
}
