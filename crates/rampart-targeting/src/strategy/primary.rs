//! Primary strategy: always-available shot at the nearest approaching hostile.

use std::collections::BTreeMap;

use rampart_core::config::TargetingConfig;
use rampart_core::types::{Defender, Hostile, HostileId};
use rampart_solver::BallisticSolver;

use super::{is_lethally_committed, FiredShot, StrategyKind, TargetingStrategy};
use crate::world::WorldState;

#[derive(Debug, Clone)]
pub struct PrimaryStrategy {
    solver: BallisticSolver,
    fixed_angle_deg: f64,
    bullet_damage: u32,
}

impl PrimaryStrategy {
    pub fn new(config: &TargetingConfig, fixed_angle_deg: f64) -> Self {
        Self {
            solver: BallisticSolver::from_config(config),
            fixed_angle_deg,
            bullet_damage: config.bullet_damage,
        }
    }

    pub fn fixed_angle(&self) -> f64 {
        self.fixed_angle_deg
    }
}

impl TargetingStrategy for PrimaryStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Primary
    }

    /// Nearest hostile still in front of the defender.
    fn find_target(
        &self,
        hostiles: &BTreeMap<HostileId, Hostile>,
        defender: &Defender,
        last_target: Option<HostileId>,
        flight_time: f64,
    ) -> Option<Hostile> {
        let mut nearest: Option<(f64, &Hostile)> = None;

        for hostile in hostiles.values() {
            if is_lethally_committed(hostile, last_target, flight_time, self.bullet_damage) {
                continue;
            }

            let offset = defender.horizontal_offset(&hostile.position);
            if offset <= 0.0 {
                continue;
            }
            if nearest.map_or(true, |(best, _)| offset < best) {
                nearest = Some((offset, hostile));
            }
        }

        nearest.map(|(_, hostile)| *hostile)
    }

    /// Fires even when the solver fails, at fallback power.
    fn try_shoot<W: WorldState>(&self, target: &Hostile, world: &mut W) -> Option<FiredShot> {
        let result = self.solver.inverse_from_start_fix_angle(
            world.defender().position,
            target.position,
            target.speed,
            self.fixed_angle_deg,
        );

        if !result.success {
            tracing::warn!(
                target = %target.id,
                power = result.power,
                "no launch speed reaches target, firing at fallback power"
            );
        }

        world.issue_shot(result.angle, result.power);

        Some(FiredShot {
            strategy: StrategyKind::Primary,
            target: target.id,
            angle: result.angle,
            power: result.power,
            flight_time: result.flight_time,
            solved: result.success,
        })
    }
}
