//! Targeting coordinator: the per-tick driver of the strategy pipeline.
//!
//! Each call to [`TargetingCoordinator::tick`] first consumes whole fixed
//! steps from the elapsed time (counting down the flight timer), then, if
//! the world is playing and the cooldown is clear, offers the shot to each
//! strategy in priority order. At most one strategy fires per tick.

use serde::{Deserialize, Serialize};

use rampart_core::config::TargetingConfig;
use rampart_core::error::ConfigError;
use rampart_core::types::HostileId;

use crate::flight_timer::FlightTimer;
use crate::strategy::{ClusterStrategy, FiredShot, PrimaryStrategy, Strategy, TargetingStrategy};
use crate::world::WorldState;

/// Whether the last tick evaluated strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorState {
    /// Paused or cooling down, nothing evaluated.
    #[default]
    Idle,
    /// Cooldown clear, strategies were offered the shot.
    Evaluating,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub state: CoordinatorState,
    /// Fixed steps consumed from the accumulated time.
    pub steps: u32,
    pub shot: Option<FiredShot>,
}

pub struct TargetingCoordinator {
    /// Highest priority first.
    strategies: Vec<Strategy>,
    time_step: f64,
    accumulated: f64,
    flight_timer: FlightTimer,
    last_target: Option<HostileId>,
    state: CoordinatorState,
}

impl TargetingCoordinator {
    /// Create a coordinator over `strategies`, tried in the given order.
    pub fn new(config: &TargetingConfig, strategies: Vec<Strategy>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            strategies,
            time_step: config.fixed_time_step,
            accumulated: 0.0,
            flight_timer: FlightTimer::default(),
            last_target: None,
            state: CoordinatorState::Idle,
        })
    }

    /// Cluster strategy first, then primary, both at the configured angle.
    pub fn with_default_strategies(config: &TargetingConfig) -> Result<Self, ConfigError> {
        let angle = config.fixed_angle_deg;
        Self::new(
            config,
            vec![
                ClusterStrategy::new(config, angle).into(),
                PrimaryStrategy::new(config, angle).into(),
            ],
        )
    }

    /// Advance by `elapsed` seconds of frame time and run one decision round.
    pub fn tick<W: WorldState>(&mut self, elapsed: f64, world: &mut W) -> TickReport {
        let steps = self.consume_steps(elapsed);

        if !world.is_playing() || world.defender().is_cooling_down() {
            tracing::trace!(
                playing = world.is_playing(),
                cooldown = world.defender().shoot_cooldown,
                "targeting idle"
            );
            self.state = CoordinatorState::Idle;
            return TickReport {
                state: self.state,
                steps,
                shot: None,
            };
        }

        self.state = CoordinatorState::Evaluating;
        let shot = self.evaluate(world);

        TickReport {
            state: self.state,
            steps,
            shot,
        }
    }

    /// Offer the shot to each strategy in order until one fires.
    fn evaluate<W: WorldState>(&mut self, world: &mut W) -> Option<FiredShot> {
        let flight_time = self.flight_timer.remaining();

        for strategy in &self.strategies {
            let target = strategy.find_target(
                world.hostiles(),
                world.defender(),
                self.last_target,
                flight_time,
            );
            let Some(target) = target else {
                tracing::trace!(strategy = %strategy.kind(), "no target");
                continue;
            };

            if let Some(shot) = strategy.try_shoot(&target, world) {
                tracing::debug!(
                    strategy = %shot.strategy,
                    target = %shot.target,
                    power = shot.power,
                    flight_time = shot.flight_time,
                    "shot fired"
                );
                self.last_target = Some(shot.target);
                self.flight_timer.arm(shot.flight_time);
                return Some(shot);
            }
        }

        None
    }

    /// Accumulate frame time and count the flight timer down once per whole step.
    ///
    /// A long stall is consumed in one go, so the cost of a tick does not grow
    /// with the backlog. The reported count saturates at `u32::MAX`.
    fn consume_steps(&mut self, elapsed: f64) -> u32 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulated = (self.accumulated + elapsed).min(f64::MAX);
        }

        let remainder = self.accumulated % self.time_step;
        let whole = ((self.accumulated - remainder) / self.time_step).round();
        self.accumulated = remainder;
        if whole < 1.0 {
            return 0;
        }

        self.flight_timer.step(whole * self.time_step);
        whole as u32
    }

    /// Remaining flight time of the last fired projectile.
    pub fn flight_time(&self) -> f64 {
        self.flight_timer.remaining()
    }

    pub fn last_target(&self) -> Option<HostileId> {
        self.last_target
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }
}
