//! Targeting strategies.
//!
//! Each strategy picks a target from the roster and then tries to shoot it.
//! [`Strategy`] is the closed set of variants the coordinator runs, in the
//! order it holds them.

pub mod cluster;
pub mod primary;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use rampart_core::types::{Defender, Hostile, HostileId};

use crate::world::WorldState;

pub use cluster::ClusterStrategy;
pub use primary::PrimaryStrategy;

/// Which strategy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// High-cost special shot at the best cluster.
    Cluster,
    /// Low-cost shot at the nearest hostile.
    Primary,
}

impl StrategyKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::Primary => "primary",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shot a strategy actually issued this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiredShot {
    pub strategy: StrategyKind,
    pub target: HostileId,
    /// Launch angle in degrees.
    pub angle: f64,
    pub power: f64,
    /// Predicted seconds until impact (zero for a fallback-power shot).
    pub flight_time: f64,
    /// False when the solver found no valid speed and fallback power was used.
    pub solved: bool,
}

/// Target selection plus shot attempt.
pub trait TargetingStrategy {
    fn kind(&self) -> StrategyKind;

    /// Choose a target, or `None` when nothing qualifies.
    ///
    /// `last_target` and `flight_time` describe the projectile still in the
    /// air, so hostiles it will already kill can be skipped.
    fn find_target(
        &self,
        hostiles: &BTreeMap<HostileId, Hostile>,
        defender: &Defender,
        last_target: Option<HostileId>,
        flight_time: f64,
    ) -> Option<Hostile>;

    /// Try to shoot `target`. Issuing the shot into `world` is the only side effect.
    fn try_shoot<W: WorldState>(&self, target: &Hostile, world: &mut W) -> Option<FiredShot>;
}

/// True if the projectile in flight toward `hostile` is going to kill it.
pub(crate) fn is_lethally_committed(
    hostile: &Hostile,
    last_target: Option<HostileId>,
    flight_time: f64,
    bullet_damage: u32,
) -> bool {
    last_target == Some(hostile.id) && flight_time > 0.0 && hostile.dies_in_one_hit(bullet_damage)
}

/// The fixed set of strategy variants.
#[derive(Debug, Clone)]
pub enum Strategy {
    Cluster(ClusterStrategy),
    Primary(PrimaryStrategy),
}

impl TargetingStrategy for Strategy {
    fn kind(&self) -> StrategyKind {
        match self {
            Self::Cluster(s) => s.kind(),
            Self::Primary(s) => s.kind(),
        }
    }

    fn find_target(
        &self,
        hostiles: &BTreeMap<HostileId, Hostile>,
        defender: &Defender,
        last_target: Option<HostileId>,
        flight_time: f64,
    ) -> Option<Hostile> {
        match self {
            Self::Cluster(s) => s.find_target(hostiles, defender, last_target, flight_time),
            Self::Primary(s) => s.find_target(hostiles, defender, last_target, flight_time),
        }
    }

    fn try_shoot<W: WorldState>(&self, target: &Hostile, world: &mut W) -> Option<FiredShot> {
        match self {
            Self::Cluster(s) => s.try_shoot(target, world),
            Self::Primary(s) => s.try_shoot(target, world),
        }
    }
}

impl From<ClusterStrategy> for Strategy {
    fn from(s: ClusterStrategy) -> Self {
        Self::Cluster(s)
    }
}

impl From<PrimaryStrategy> for Strategy {
    fn from(s: PrimaryStrategy) -> Self {
        Self::Primary(s)
    }
}
