//! The world-state collaborator the targeting core reads from and shoots into.

use std::collections::BTreeMap;

use rampart_core::commands::{ShotCommand, ShotKind};
use rampart_core::config::TargetingConfig;
use rampart_core::types::{Defender, Hostile, HostileId};

/// Snapshot access plus the two shot actuators.
///
/// The roster is ordered by id so every selection pass is deterministic.
/// The core holds `&mut` for the whole tick, so reads and shot side effects
/// within one tick always see a consistent snapshot.
pub trait WorldState {
    fn hostiles(&self) -> &BTreeMap<HostileId, Hostile>;

    fn defender(&self) -> &Defender;

    /// False while the game is paused or over.
    fn is_playing(&self) -> bool;

    /// Low-cost shot.
    fn issue_shot(&mut self, angle: f64, power: f64);

    /// High-cost shot. Expected to spend energy and reset the cooldown.
    fn issue_special_shot(&mut self, angle: f64, power: f64);
}

/// In-memory world container.
///
/// Issued shots are queued as [`ShotCommand`]s for the host to actuate.
/// Every shot resets the cooldown; a special shot also spends energy.
#[derive(Debug, Clone)]
pub struct DefenseState {
    config: TargetingConfig,
    hostiles: BTreeMap<HostileId, Hostile>,
    defender: Defender,
    playing: bool,
    shots: Vec<ShotCommand>,
}

impl DefenseState {
    pub fn new(config: TargetingConfig, defender: Defender) -> Self {
        Self {
            config,
            hostiles: BTreeMap::new(),
            defender,
            playing: true,
            shots: Vec::new(),
        }
    }

    /// Add or replace a hostile. Returns the previous record with the same id.
    pub fn insert_hostile(&mut self, hostile: Hostile) -> Option<Hostile> {
        self.hostiles.insert(hostile.id, hostile)
    }

    pub fn remove_hostile(&mut self, id: HostileId) -> Option<Hostile> {
        self.hostiles.remove(&id)
    }

    pub fn hostile_mut(&mut self, id: HostileId) -> Option<&mut Hostile> {
        self.hostiles.get_mut(&id)
    }

    pub fn defender_mut(&mut self) -> &mut Defender {
        &mut self.defender
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn config(&self) -> &TargetingConfig {
        &self.config
    }

    /// Count the shoot cooldown down by `elapsed` seconds, stopping at zero.
    pub fn advance(&mut self, elapsed: f64) {
        self.defender.shoot_cooldown = (self.defender.shoot_cooldown - elapsed).max(0.0);
    }

    /// Shots issued since the last [`take_shots`](Self::take_shots).
    pub fn shots(&self) -> &[ShotCommand] {
        &self.shots
    }

    /// Drain the shot queue.
    pub fn take_shots(&mut self) -> Vec<ShotCommand> {
        std::mem::take(&mut self.shots)
    }

    fn record(&mut self, kind: ShotKind, angle: f64, power: f64) {
        self.shots.push(ShotCommand { kind, angle, power });
        self.defender.shoot_cooldown = self.config.shoot_cooldown;
    }
}

impl WorldState for DefenseState {
    fn hostiles(&self) -> &BTreeMap<HostileId, Hostile> {
        &self.hostiles
    }

    fn defender(&self) -> &Defender {
        &self.defender
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn issue_shot(&mut self, angle: f64, power: f64) {
        self.record(ShotKind::Normal, angle, power);
    }

    fn issue_special_shot(&mut self, angle: f64, power: f64) {
        self.defender.energy = (self.defender.energy - self.config.special_shot_cost).max(0.0);
        self.record(ShotKind::Special, angle, power);
    }
}
