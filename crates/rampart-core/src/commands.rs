//! Shot commands issued by the targeting core to the world.

use serde::{Deserialize, Serialize};

/// Which actuator a shot goes through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotKind {
    /// Low-cost shot, always available once the cooldown clears.
    #[default]
    Normal,
    /// High-cost shot, consumes energy.
    Special,
}

/// A shot handed to the world for actuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotCommand {
    pub kind: ShotKind,
    /// Launch angle in degrees.
    pub angle: f64,
    /// Launch power on the 0-100 scale.
    pub power: f64,
}
