//! Cluster strategy: energy-gated special shot at a group of tough hostiles.
//!
//! Hostiles share a cluster when their horizontal offsets match exactly and
//! their heights differ by at most one unit. Each hostile is scored by the
//! total shots-to-kill of its cluster.

use std::collections::BTreeMap;

use rampart_core::config::TargetingConfig;
use rampart_core::constants::*;
use rampart_core::types::{Defender, Hostile, HostileId};
use rampart_solver::BallisticSolver;

use super::{is_lethally_committed, FiredShot, StrategyKind, TargetingStrategy};
use crate::world::WorldState;

#[derive(Debug, Clone)]
pub struct ClusterStrategy {
    solver: BallisticSolver,
    fixed_angle_deg: f64,
    bullet_damage: u32,
    energy_threshold: f64,
}

impl ClusterStrategy {
    pub fn new(config: &TargetingConfig, fixed_angle_deg: f64) -> Self {
        Self {
            solver: BallisticSolver::from_config(config),
            fixed_angle_deg,
            bullet_damage: config.bullet_damage,
            energy_threshold: config.energy_threshold,
        }
    }

    pub fn fixed_angle(&self) -> f64 {
        self.fixed_angle_deg
    }

    pub fn energy_threshold(&self) -> f64 {
        self.energy_threshold
    }
}

fn in_same_cluster(a: &Hostile, b: &Hostile) -> bool {
    let gap = a.position.offset_from(&b.position).abs();
    gap.x <= CLUSTER_HORIZONTAL_TOLERANCE && gap.y <= CLUSTER_VERTICAL_TOLERANCE
}

impl TargetingStrategy for ClusterStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Cluster
    }

    /// Representative hostile of the most valuable cluster.
    ///
    /// A candidate takes over from the current pick when it is nearer and its
    /// cluster needs at least three shots, or when its cluster needs strictly
    /// more shots than the current pick's.
    fn find_target(
        &self,
        hostiles: &BTreeMap<HostileId, Hostile>,
        defender: &Defender,
        last_target: Option<HostileId>,
        flight_time: f64,
    ) -> Option<Hostile> {
        // Summed in u64: a few near-u32::MAX healths must not overflow the totals.
        let candidates: Vec<(&Hostile, u64)> = hostiles
            .values()
            .filter(|h| !is_lethally_committed(h, last_target, flight_time, self.bullet_damage))
            .map(|h| (h, u64::from(h.shots_to_kill(self.bullet_damage))))
            .collect();

        let roster_shots: u64 = candidates.iter().map(|(_, shots)| shots).sum();
        if roster_shots <= u64::from(CLUSTER_ROSTER_MIN_SHOTS) {
            return None;
        }

        let mut best: Option<(&Hostile, u64)> = None;

        for &(hostile, shots) in &candidates {
            let cluster_shots = shots
                + candidates
                    .iter()
                    .filter(|(other, _)| other.id != hostile.id && in_same_cluster(hostile, other))
                    .map(|(_, s)| s)
                    .sum::<u64>();

            if cluster_shots < u64::from(CLUSTER_MIN_SHOTS) {
                continue;
            }

            let replace = match best {
                None => true,
                Some((current, largest)) => {
                    let nearer = defender.horizontal_offset(&hostile.position)
                        < defender.horizontal_offset(&current.position);
                    (nearer && cluster_shots >= u64::from(CLUSTER_PREFERRED_SHOTS)) || largest < cluster_shots
                }
            };
            if replace {
                best = Some((hostile, cluster_shots));
            }
        }

        best.map(|(hostile, _)| *hostile)
    }

    /// Shoots only with enough energy and a solved launch speed.
    fn try_shoot<W: WorldState>(&self, target: &Hostile, world: &mut W) -> Option<FiredShot> {
        let defender = world.defender();
        if defender.energy < self.energy_threshold {
            tracing::trace!(
                energy = defender.energy,
                threshold = self.energy_threshold,
                "special shot not charged"
            );
            return None;
        }

        let result = self.solver.inverse_from_start_fix_angle(
            defender.position,
            target.position,
            target.speed,
            self.fixed_angle_deg,
        );
        if !result.success {
            tracing::trace!(target = %target.id, "special shot has no valid launch speed");
            return None;
        }

        world.issue_special_shot(result.angle, result.power);

        Some(FiredShot {
            strategy: StrategyKind::Cluster,
            target: target.id,
            angle: result.angle,
            power: result.power,
            flight_time: result.flight_time,
            solved: true,
        })
    }
}
