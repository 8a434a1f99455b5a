//! Timed unit skills.
//!
//! Each skill of a unit has a [`SkillManager`] running the state machine
//! Ready → Casting → OnCooldown → Ready. Timers are tokio tasks that only
//! send a [`SkillSignal`] back; the main loop applies signals through
//! [`SkillSystem::handle_signal`]. Every trigger bumps a generation number
//! and owns a [`CancellationToken`], so cancelled or stale timers never
//! change state.

pub mod effect;

use crate::game::catalog::SkillData;
use crate::game::events::{EventBus, EventPayload, PLAY_SOUND, SKILL_READY};
use crate::game::{GameState, UnitId};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

/// Phase of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillPhase {
    Ready,
    Casting,
    OnCooldown,
}

/// Skill trigger failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillError {
    #[error("unit {0} has no skills")]
    UnknownUnit(UnitId),

    #[error("unit {unit} has no skill in slot {slot}")]
    NoSuchSlot { unit: UnitId, slot: usize },

    #[error("skill '{skill}' is not ready ({phase:?})")]
    NotReady { skill: String, phase: SkillPhase },
}

impl From<SkillError> for crate::error::SkirmishError {
    fn from(err: SkillError) -> Self {
        Self::skill(err.to_string())
    }
}

/// Which timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    CastFinished,
    CooldownFinished,
}

/// Message sent by a timer task when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillSignal {
    pub unit: UnitId,
    pub slot: usize,
    pub generation: u64,
    pub kind: SignalKind,
}

/// State machine of one skill on one unit.
#[derive(Debug)]
pub struct SkillManager {
    skill: SkillData,
    source: UnitId,
    slot: usize,
    phase: SkillPhase,
    generation: u64,
    cancel: Option<CancellationToken>,
}

impl SkillManager {
    pub fn new(skill: SkillData, source: UnitId, slot: usize) -> Self {
        Self {
            skill,
            source,
            slot,
            phase: SkillPhase::Ready,
            generation: 0,
            cancel: None,
        }
    }

    pub fn skill(&self) -> &SkillData {
        &self.skill
    }

    pub fn phase(&self) -> SkillPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == SkillPhase::Ready
    }

    /// Starts casting. Only allowed when Ready.
    pub fn trigger(
        &mut self,
        events: &mut EventBus,
        signals: &mpsc::UnboundedSender<SkillSignal>,
    ) -> Result<(), SkillError> {
        if !self.is_ready() {
            return Err(SkillError::NotReady {
                skill: self.skill.code.clone(),
                phase: self.phase,
            });
        }

        self.generation += 1;
        self.phase = SkillPhase::Casting;
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        if let Some(sound) = &self.skill.on_start_sound {
            events.publish(PLAY_SOUND, EventPayload::Text(sound.clone()));
        }
        info!(skill = %self.skill.code, unit = %self.source, "Skill cast started");

        self.spawn_timer(
            self.skill.cast_duration(),
            SignalKind::CastFinished,
            token,
            signals.clone(),
        );
        Ok(())
    }

    /// Applies a timer signal. Returns false if it was stale or out of phase.
    pub fn handle_signal(
        &mut self,
        signal: SkillSignal,
        game: &mut GameState,
        events: &mut EventBus,
        signals: &mpsc::UnboundedSender<SkillSignal>,
    ) -> bool {
        if signal.generation != self.generation {
            trace!(?signal, current = self.generation, "Stale skill signal");
            return false;
        }

        match (self.phase, signal.kind) {
            (SkillPhase::Casting, SignalKind::CastFinished) => {
                if let Some(sound) = &self.skill.on_end_sound {
                    events.publish(PLAY_SOUND, EventPayload::Text(sound.clone()));
                }
                effect::apply(&self.skill, game, events, self.source);

                self.phase = SkillPhase::OnCooldown;
                let token = self.cancel.get_or_insert_with(CancellationToken::new).clone();
                self.spawn_timer(
                    self.skill.cooldown_duration(),
                    SignalKind::CooldownFinished,
                    token,
                    signals.clone(),
                );
                true
            }
            (SkillPhase::OnCooldown, SignalKind::CooldownFinished) => {
                self.phase = SkillPhase::Ready;
                self.cancel = None;
                events.publish(SKILL_READY, EventPayload::Unit(self.source));
                debug!(skill = %self.skill.code, unit = %self.source, "Skill ready");
                true
            }
            _ => false,
        }
    }

    /// Aborts any running timer and returns to Ready.
    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        if self.phase != SkillPhase::Ready {
            debug!(skill = %self.skill.code, unit = %self.source, phase = ?self.phase, "Skill cancelled");
        }
        self.generation += 1;
        self.phase = SkillPhase::Ready;
    }

    fn spawn_timer(
        &self,
        duration: Duration,
        kind: SignalKind,
        token: CancellationToken,
        signals: mpsc::UnboundedSender<SkillSignal>,
    ) {
        let signal = SkillSignal {
            unit: self.source,
            slot: self.slot,
            generation: self.generation,
            kind,
        };
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    // The receiver is gone only during shutdown.
                    let _ = signals.send(signal);
                }
            }
        });
    }
}

/// All skill managers, keyed by unit.
#[derive(Debug)]
pub struct SkillSystem {
    managers: BTreeMap<UnitId, Vec<SkillManager>>,
    tx: mpsc::UnboundedSender<SkillSignal>,
    rx: mpsc::UnboundedReceiver<SkillSignal>,
}

impl Default for SkillSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillSystem {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            managers: BTreeMap::new(),
            tx,
            rx,
        }
    }

    /// Attaches managers to new units that carry skills and drops those of
    /// units that no longer exist.
    pub fn sync_units(&mut self, game: &GameState) {
        self.managers.retain(|id, managers| {
            let alive = game.unit(*id).is_some();
            if !alive {
                managers.iter_mut().for_each(SkillManager::cancel);
            }
            alive
        });

        for unit in game.units() {
            if unit.skills.is_empty() || self.managers.contains_key(&unit.id) {
                continue;
            }
            let managers: Vec<SkillManager> = unit
                .skills
                .iter()
                .filter_map(|code| game.catalog.skill(code))
                .enumerate()
                .map(|(slot, skill)| SkillManager::new(skill.clone(), unit.id, slot))
                .collect();
            if !managers.is_empty() {
                debug!(unit = %unit.id, count = managers.len(), "Skills attached");
                self.managers.insert(unit.id, managers);
            }
        }
    }

    /// Skill managers of a unit, by slot.
    pub fn managers(&self, unit: UnitId) -> &[SkillManager] {
        self.managers.get(&unit).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn manager(&self, unit: UnitId, slot: usize) -> Option<&SkillManager> {
        self.managers(unit).get(slot)
    }

    fn manager_mut(&mut self, unit: UnitId, slot: usize) -> Result<&mut SkillManager, SkillError> {
        self.managers
            .get_mut(&unit)
            .ok_or(SkillError::UnknownUnit(unit))?
            .get_mut(slot)
            .ok_or(SkillError::NoSuchSlot { unit, slot })
    }

    /// Triggers a unit's skill.
    pub fn trigger(
        &mut self,
        unit: UnitId,
        slot: usize,
        events: &mut EventBus,
    ) -> Result<(), SkillError> {
        let tx = self.tx.clone();
        self.manager_mut(unit, slot)?.trigger(events, &tx)
    }

    /// Cancels a unit's skill.
    pub fn cancel(&mut self, unit: UnitId, slot: usize) -> Result<(), SkillError> {
        self.manager_mut(unit, slot)?.cancel();
        Ok(())
    }

    /// Cancels every running skill.
    pub fn cancel_all(&mut self) {
        self.managers
            .values_mut()
            .flatten()
            .for_each(SkillManager::cancel);
    }

    /// Routes a timer signal to its manager.
    pub fn handle_signal(
        &mut self,
        signal: SkillSignal,
        game: &mut GameState,
        events: &mut EventBus,
    ) -> bool {
        let tx = self.tx.clone();
        match self.manager_mut(signal.unit, signal.slot) {
            Ok(manager) => manager.handle_signal(signal, game, events, &tx),
            Err(_) => false,
        }
    }

    /// Applies every signal already received. Returns how many were applied.
    pub fn process_pending(&mut self, game: &mut GameState, events: &mut EventBus) -> usize {
        let mut applied = 0;
        while let Ok(signal) = self.rx.try_recv() {
            if self.handle_signal(signal, game, events) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next timer signal.
    pub async fn next_signal(&mut self) -> Option<SkillSignal> {
        self.rx.recv().await
    }
}
