//! Fundamental world records read by the targeting core.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in world space.
/// x grows away from the defender toward incoming hostiles, y is vertical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to this position.
    pub fn offset_from(&self, origin: &Position) -> DVec2 {
        DVec2::from(*self) - DVec2::from(*origin)
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Stable identity of a hostile, assigned by the world.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HostileId(pub u32);

impl fmt::Display for HostileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

/// An incoming hostile. Owned by the world; the core only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    pub id: HostileId,
    pub position: Position,
    /// Horizontal speed toward the defender (units/s, non-negative).
    pub speed: f64,
    /// Remaining health.
    pub health: u32,
}

impl Hostile {
    pub fn new(id: u32, position: Position, speed: f64, health: u32) -> Self {
        Self {
            id: HostileId(id),
            position,
            speed,
            health,
        }
    }

    /// Number of hits needed to bring health to zero.
    pub fn shots_to_kill(&self, bullet_damage: u32) -> u32 {
        self.health.div_ceil(bullet_damage.max(1))
    }

    /// True if a single hit kills this hostile.
    pub fn dies_in_one_hit(&self, bullet_damage: u32) -> bool {
        self.health <= bullet_damage
    }
}

/// The turret. Cooldown and energy decay/recharge are driven by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Defender {
    pub position: Position,
    /// Seconds remaining before the next shot is permitted.
    pub shoot_cooldown: f64,
    /// Charge available for the special shot.
    pub energy: f64,
}

impl Defender {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// True while the shoot cooldown is still pending.
    pub fn is_cooling_down(&self) -> bool {
        self.shoot_cooldown > 0.0
    }

    /// Horizontal offset of `target` from the defender (positive = still approaching).
    pub fn horizontal_offset(&self, target: &Position) -> f64 {
        target.x - self.position.x
    }
}
