//! Encounter Service - Single-writer use cases for running combat
//!
//! Each use case loads the encounter through the repository port, applies one
//! or more domain operations, and writes the result back. Cycles on the same
//! encounter are serialized by a per-encounter lock so concurrent callers do
//! not overwrite each other. Timing segments live here; turn bookkeeping is
//! on `CombatState`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{ClockPort, EncounterRepositoryPort, RepositoryError};
use crate::domain::entities::{
    create_default_combat_state, CombatState, Encounter, InitiativeEntry, Participant,
};
use crate::domain::services::{
    add_condition, apply_damage, calculate_combat_duration, heal, remove_condition,
    roll_initiative, sort_initiative_in_place, validate_participant_hp, DiceRoller,
};
use crate::domain::value_objects::{
    same_identity, CharacterId, Difficulty, EncounterId, EncounterSettings,
};

/// Errors that can occur while running an encounter
#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    #[error("Encounter not found: {0}")]
    NotFound(EncounterId),

    #[error("Participant not found: {0}")]
    ParticipantNotFound(CharacterId),

    #[error("Participant already in encounter: {0}")]
    DuplicateParticipant(CharacterId),

    #[error("Amount must not be negative: {0}")]
    InvalidAmount(i32),

    #[error("Combat is already active")]
    CombatAlreadyActive,

    #[error("No combat is active")]
    CombatNotActive,

    #[error("Combat is already paused")]
    CombatAlreadyPaused,

    #[error("Combat is not paused")]
    CombatNotPaused,

    #[error("No initiative given for {0} and auto-roll is disabled")]
    MissingInitiative(CharacterId),

    #[error("Encounter has no combatants")]
    EmptyInitiativeOrder,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Request to create a new encounter
#[derive(Debug, Clone)]
pub struct CreateEncounterRequest {
    pub name: String,
    pub description: Option<String>,
    pub participants: Vec<Participant>,
    pub settings: Option<EncounterSettings>,
}

/// Initiative input for one participant
#[derive(Debug, Clone)]
pub struct InitiativeSeed {
    pub participant_id: CharacterId,
    pub dexterity: i32,
    /// A roll made at the table; `None` rolls automatically if allowed
    pub initiative: Option<i32>,
}

impl InitiativeSeed {
    pub fn rolled(participant_id: CharacterId, initiative: i32, dexterity: i32) -> Self {
        Self {
            participant_id,
            dexterity,
            initiative: Some(initiative),
        }
    }

    pub fn auto(participant_id: CharacterId, dexterity: i32) -> Self {
        Self {
            participant_id,
            dexterity,
            initiative: None,
        }
    }
}

/// Request to start combat.
///
/// Participants without a seed enter with dexterity 0 and an automatic roll.
#[derive(Debug, Clone, Default)]
pub struct StartCombatRequest {
    pub seeds: Vec<InitiativeSeed>,
}

/// Direct edit of hit point fields, repaired after writing
#[derive(Debug, Clone, Default)]
pub struct HitPointsEdit {
    pub current: Option<i32>,
    pub max: Option<i32>,
    pub temporary: Option<i32>,
}

/// Hit points of one participant after a change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitPointsSnapshot {
    pub character_id: CharacterId,
    pub current: i32,
    pub max: i32,
    pub temporary: i32,
    pub is_down: bool,
}

impl From<&Participant> for HitPointsSnapshot {
    fn from(p: &Participant) -> Self {
        Self {
            character_id: p.character_id,
            current: p.current_hit_points,
            max: p.max_hit_points,
            temporary: p.temporary_hit_points,
            is_down: p.is_down(),
        }
    }
}

/// Result of advancing the turn
#[derive(Debug, Clone)]
pub struct TurnAdvance {
    pub round: u32,
    pub turn: usize,
    pub active: InitiativeEntry,
    /// True when the order wrapped and a new round began
    pub new_round: bool,
}

/// Totals reported when combat ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatSummary {
    pub rounds: u32,
    pub total_duration_ms: u64,
}

/// Service for running encounters
pub struct EncounterService {
    repository: Arc<dyn EncounterRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    roller: Mutex<Box<dyn DiceRoller + Send>>,
    locks: Mutex<HashMap<EncounterId, Arc<Mutex<()>>>>,
}

impl EncounterService {
    pub fn new(
        repository: Arc<dyn EncounterRepositoryPort>,
        clock: Arc<dyn ClockPort>,
        roller: Box<dyn DiceRoller + Send>,
    ) -> Self {
        Self {
            repository,
            clock,
            roller: Mutex::new(roller),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Hold this across a whole load-mutate-store cycle
    async fn lock(&self, id: EncounterId) -> OwnedMutexGuard<()> {
        let lock = self.locks.lock().await.entry(id).or_default().clone();
        lock.lock_owned().await
    }

    async fn load(&self, id: EncounterId) -> Result<Encounter, EncounterError> {
        self.repository
            .get(id)
            .await?
            .ok_or(EncounterError::NotFound(id))
    }

    async fn store(&self, encounter: &mut Encounter) -> Result<(), EncounterError> {
        encounter.touch();
        self.repository.save(encounter).await?;
        Ok(())
    }

    /// Load, mutate one participant, store
    async fn update_participant<T>(
        &self,
        encounter_id: EncounterId,
        participant_id: CharacterId,
        update: impl FnOnce(&mut Participant) -> Result<T, EncounterError>,
    ) -> Result<T, EncounterError> {
        let _guard = self.lock(encounter_id).await;
        let mut encounter = self.load(encounter_id).await?;
        let participant = encounter
            .participant_mut(&participant_id)
            .ok_or(EncounterError::ParticipantNotFound(participant_id))?;
        let result = update(participant)?;
        self.store(&mut encounter).await?;
        Ok(result)
    }

    #[instrument(skip(self), fields(name = %request.name))]
    pub async fn create_encounter(
        &self,
        request: CreateEncounterRequest,
    ) -> Result<Encounter, EncounterError> {
        let mut encounter = Encounter::new(request.name);
        if let Some(description) = request.description {
            encounter = encounter.with_description(description);
        }
        if let Some(settings) = request.settings {
            encounter = encounter.with_settings(settings);
        }
        for participant in request.participants {
            let id = participant.character_id;
            if !encounter.add_participant(participant) {
                return Err(EncounterError::DuplicateParticipant(id));
            }
        }

        self.store(&mut encounter).await?;
        info!(
            encounter_id = %encounter.id,
            participants = encounter.participants.len(),
            "Created encounter: {}",
            encounter.name
        );
        Ok(encounter)
    }

    /// Store an encounter document that came from outside the service.
    ///
    /// Hit points are clamped and duplicate conditions dropped first, since
    /// nothing upstream guarantees either.
    #[instrument(skip(self, encounter), fields(encounter_id = %encounter.id))]
    pub async fn import_encounter(
        &self,
        mut encounter: Encounter,
    ) -> Result<Encounter, EncounterError> {
        let _guard = self.lock(encounter.id).await;
        encounter.repair_participants();
        self.repository.save(&encounter).await?;
        info!(
            participants = encounter.participants.len(),
            "Imported encounter: {}",
            encounter.name
        );
        Ok(encounter)
    }

    #[instrument(skip(self))]
    pub async fn get_encounter(
        &self,
        id: EncounterId,
    ) -> Result<Option<Encounter>, EncounterError> {
        debug!(encounter_id = %id, "Fetching encounter");
        Ok(self.repository.get(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_encounters(&self) -> Result<Vec<Encounter>, EncounterError> {
        Ok(self.repository.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_encounter(&self, id: EncounterId) -> Result<(), EncounterError> {
        let _guard = self.lock(id).await;
        if !self.repository.delete(id).await? {
            return Err(EncounterError::NotFound(id));
        }
        self.locks.lock().await.remove(&id);
        info!(encounter_id = %id, "Deleted encounter");
        Ok(())
    }

    /// Add a participant. During combat it joins the turn order with an
    /// automatic roll and dexterity 0.
    pub async fn add_participant(
        &self,
        encounter_id: EncounterId,
        participant: Participant,
    ) -> Result<Encounter, EncounterError> {
        let seed = InitiativeSeed::auto(participant.character_id, 0);
        self.add_participant_with_initiative(encounter_id, participant, seed)
            .await
    }

    /// Add a participant, using `seed` if combat is already running.
    ///
    /// The joiner is slotted into its sorted position; the current combatant
    /// keeps the turn. Joining above the current turn means acting next round.
    #[instrument(skip(self, participant, seed), fields(participant_id = %participant.character_id))]
    pub async fn add_participant_with_initiative(
        &self,
        encounter_id: EncounterId,
        participant: Participant,
        seed: InitiativeSeed,
    ) -> Result<Encounter, EncounterError> {
        let _guard = self.lock(encounter_id).await;
        let mut encounter = self.load(encounter_id).await?;
        let id = participant.character_id;
        if encounter.participant(&id).is_some() {
            return Err(EncounterError::DuplicateParticipant(id));
        }

        let joining = if encounter.combat_state.is_active {
            let mut roller = self.roller.lock().await;
            Some(resolve_initiative(
                &encounter.settings,
                &participant,
                Some(&seed),
                &mut **roller,
            )?)
        } else {
            None
        };

        if !encounter.add_participant(participant) {
            return Err(EncounterError::DuplicateParticipant(id));
        }
        if let Some(entry) = joining {
            let initiative = entry.initiative;
            let slot = encounter.combat_state.insert_entry(entry);
            info!(participant_id = %id, initiative, slot, "Participant joined combat");
        }
        self.store(&mut encounter).await?;
        info!(encounter_id = %encounter_id, participant_id = %id, "Added participant");
        Ok(encounter)
    }

    #[instrument(skip(self))]
    pub async fn remove_participant(
        &self,
        encounter_id: EncounterId,
        participant_id: CharacterId,
    ) -> Result<Participant, EncounterError> {
        let _guard = self.lock(encounter_id).await;
        let mut encounter = self.load(encounter_id).await?;
        let removed = encounter
            .remove_participant(&participant_id)
            .ok_or(EncounterError::ParticipantNotFound(participant_id))?;
        self.store(&mut encounter).await?;
        info!(
            encounter_id = %encounter_id,
            participant_id = %participant_id,
            "Removed participant: {}",
            removed.name
        );
        Ok(removed)
    }

    /// Build the initiative order and start round 1
    #[instrument(skip(self, request))]
    pub async fn start_combat(
        &self,
        encounter_id: EncounterId,
        request: StartCombatRequest,
    ) -> Result<CombatState, EncounterError> {
        let _guard = self.lock(encounter_id).await;
        let mut encounter = self.load(encounter_id).await?;
        if encounter.combat_state.is_active {
            return Err(EncounterError::CombatAlreadyActive);
        }
        if encounter.participants.is_empty() {
            return Err(EncounterError::EmptyInitiativeOrder);
        }
        if let Some(stray) = request
            .seeds
            .iter()
            .find(|s| encounter.participant(&s.participant_id).is_none())
        {
            return Err(EncounterError::ParticipantNotFound(stray.participant_id));
        }

        let mut order = Vec::with_capacity(encounter.participants.len());
        {
            let mut roller = self.roller.lock().await;
            for participant in &encounter.participants {
                let seed = request
                    .seeds
                    .iter()
                    .find(|s| same_identity(&s.participant_id, &participant.character_id));
                order.push(resolve_initiative(
                    &encounter.settings,
                    participant,
                    seed,
                    &mut **roller,
                )?);
            }
        }

        sort_initiative_in_place(&mut order);
        order[0].is_active = true;

        encounter.combat_state = CombatState {
            is_active: true,
            current_round: 1,
            current_turn: 0,
            initiative_order: order,
            total_duration: 0,
            started_at: Some(self.clock.now()),
            paused_at: None,
        };
        self.store(&mut encounter).await?;

        info!(
            encounter_id = %encounter_id,
            combatants = encounter.combat_state.initiative_order.len(),
            "Combat started"
        );
        Ok(encounter.combat_state)
    }

    /// Hand the turn to the next combatant, wrapping into a new round
    #[instrument(skip(self))]
    pub async fn next_turn(
        &self,
        encounter_id: EncounterId,
    ) -> Result<TurnAdvance, EncounterError> {
        let _guard = self.lock(encounter_id).await;
        let mut encounter = self.load(encounter_id).await?;
        let state = &mut encounter.combat_state;
        if !state.is_active {
            return Err(EncounterError::CombatNotActive);
        }

        let new_round = state.advance_turn();
        let active = state
            .current_entry()
            .cloned()
            .ok_or(EncounterError::EmptyInitiativeOrder)?;
        let advance = TurnAdvance {
            round: state.current_round,
            turn: state.current_turn,
            active,
            new_round,
        };
        self.store(&mut encounter).await?;

        debug!(
            encounter_id = %encounter_id,
            round = advance.round,
            turn = advance.turn,
            "Turn advanced"
        );
        Ok(advance)
    }

    #[instrument(skip(self))]
    pub async fn pause_combat(
        &self,
        encounter_id: EncounterId,
    ) -> Result<CombatState, EncounterError> {
        let _guard = self.lock(encounter_id).await;
        let mut encounter = self.load(encounter_id).await?;
        let state = &mut encounter.combat_state;
        if !state.is_active {
            return Err(EncounterError::CombatNotActive);
        }
        if state.is_paused() {
            return Err(EncounterError::CombatAlreadyPaused);
        }
        state.paused_at = Some(self.clock.now());

        self.store(&mut encounter).await?;
        info!(encounter_id = %encounter_id, "Combat paused");
        Ok(encounter.combat_state)
    }

    /// Close the paused timing segment and open a new one
    #[instrument(skip(self))]
    pub async fn resume_combat(
        &self,
        encounter_id: EncounterId,
    ) -> Result<CombatState, EncounterError> {
        let _guard = self.lock(encounter_id).await;
        let mut encounter = self.load(encounter_id).await?;
        let now = self.clock.now();
        let state = &mut encounter.combat_state;
        if !state.is_active {
            return Err(EncounterError::CombatNotActive);
        }
        if !state.is_paused() {
            return Err(EncounterError::CombatNotPaused);
        }

        let segment =
            calculate_combat_duration(state.started_at.unwrap_or(now), now, state.paused_at);
        state.total_duration = state.total_duration.saturating_add(segment);
        state.started_at = Some(now);
        state.paused_at = None;

        self.store(&mut encounter).await?;
        info!(
            encounter_id = %encounter_id,
            total_ms = encounter.combat_state.total_duration,
            "Combat resumed"
        );
        Ok(encounter.combat_state)
    }

    /// Stop combat, reset its state and report the totals
    #[instrument(skip(self))]
    pub async fn end_combat(
        &self,
        encounter_id: EncounterId,
    ) -> Result<CombatSummary, EncounterError> {
        let _guard = self.lock(encounter_id).await;
        let mut encounter = self.load(encounter_id).await?;
        let now = self.clock.now();
        let state = &encounter.combat_state;
        if !state.is_active {
            return Err(EncounterError::CombatNotActive);
        }

        let segment =
            calculate_combat_duration(state.started_at.unwrap_or(now), now, state.paused_at);
        let summary = CombatSummary {
            rounds: state.current_round,
            total_duration_ms: state.total_duration.saturating_add(segment),
        };

        encounter.combat_state = create_default_combat_state();
        self.store(&mut encounter).await?;

        info!(
            encounter_id = %encounter_id,
            rounds = summary.rounds,
            duration_ms = summary.total_duration_ms,
            "Combat ended"
        );
        Ok(summary)
    }

    #[instrument(skip(self))]
    pub async fn apply_damage(
        &self,
        encounter_id: EncounterId,
        participant_id: CharacterId,
        amount: i32,
    ) -> Result<HitPointsSnapshot, EncounterError> {
        self.update_participant(encounter_id, participant_id, |participant| {
            if !apply_damage(participant, amount) {
                return Err(EncounterError::InvalidAmount(amount));
            }
            if participant.is_down() {
                warn!(participant = %participant.name, "Participant is down");
            }
            Ok(HitPointsSnapshot::from(&*participant))
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn heal(
        &self,
        encounter_id: EncounterId,
        participant_id: CharacterId,
        amount: i32,
    ) -> Result<HitPointsSnapshot, EncounterError> {
        self.update_participant(encounter_id, participant_id, |participant| {
            if !heal(participant, amount) {
                return Err(EncounterError::InvalidAmount(amount));
            }
            Ok(HitPointsSnapshot::from(&*participant))
        })
        .await
    }

    /// Overwrite hit point fields directly, then repair the invariants
    #[instrument(skip(self))]
    pub async fn edit_hit_points(
        &self,
        encounter_id: EncounterId,
        participant_id: CharacterId,
        edit: HitPointsEdit,
    ) -> Result<HitPointsSnapshot, EncounterError> {
        self.update_participant(encounter_id, participant_id, |participant| {
            if let Some(max) = edit.max {
                participant.max_hit_points = max;
            }
            if let Some(current) = edit.current {
                participant.current_hit_points = current;
            }
            if let Some(temporary) = edit.temporary {
                participant.temporary_hit_points = temporary;
            }
            validate_participant_hp(participant);
            Ok(HitPointsSnapshot::from(&*participant))
        })
        .await
    }

    /// Returns false if the condition was already present
    #[instrument(skip(self))]
    pub async fn add_condition(
        &self,
        encounter_id: EncounterId,
        participant_id: CharacterId,
        condition: &str,
    ) -> Result<bool, EncounterError> {
        self.update_participant(encounter_id, participant_id, |participant| {
            Ok(add_condition(participant, condition))
        })
        .await
    }

    /// Returns false if the condition was not present
    #[instrument(skip(self))]
    pub async fn remove_condition(
        &self,
        encounter_id: EncounterId,
        participant_id: CharacterId,
        condition: &str,
    ) -> Result<bool, EncounterError> {
        self.update_participant(encounter_id, participant_id, |participant| {
            Ok(remove_condition(participant, condition))
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn estimate_difficulty(
        &self,
        encounter_id: EncounterId,
    ) -> Result<Difficulty, EncounterError> {
        let encounter = self.load(encounter_id).await?;
        Ok(encounter.difficulty())
    }
}

/// Turn a seed into an initiative entry, rolling when the seed has no roll
fn resolve_initiative<D: DiceRoller + ?Sized>(
    settings: &EncounterSettings,
    participant: &Participant,
    seed: Option<&InitiativeSeed>,
    roller: &mut D,
) -> Result<InitiativeEntry, EncounterError> {
    let dexterity = seed.map(|s| s.dexterity).unwrap_or(0);
    let initiative = match seed.and_then(|s| s.initiative) {
        Some(rolled) => rolled,
        None if settings.auto_roll_initiative => {
            let rolled = roll_initiative(roller);
            debug!(participant = %participant.name, roll = rolled, "Rolled initiative");
            rolled
        }
        None => return Err(EncounterError::MissingInitiative(participant.character_id)),
    };
    Ok(InitiativeEntry::new(participant.character_id, initiative, dexterity))
}
