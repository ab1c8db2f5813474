//! Configuration errors.
//!
//! The targeting core reports "no target" and "no valid shot" as data.
//! The only hard failure is a configuration that would make the solver
//! divide by zero or the strategies misbehave, caught once at startup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("fixed time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("gravity must be finite, got {0}")]
    InvalidGravity(f64),

    #[error("bullet damage must be at least 1")]
    ZeroBulletDamage,

    #[error("power boost span must be positive and finite, got {0}")]
    InvalidPowerSpan(f64),

    #[error("minimum power speed must be finite, got {0}")]
    InvalidPowerMin(f64),

    #[error("fixed angle must lie strictly between 0 and 90 degrees, got {0}")]
    InvalidFixedAngle(f64),

    #[error("shoot cooldown must be non-negative and finite, got {0}")]
    InvalidCooldown(f64),

    #[error("{field} must be non-negative and finite, got {value}")]
    InvalidEnergy { field: &'static str, value: f64 },

    #[error("failed to parse targeting config: {0}")]
    Parse(#[from] serde_json::Error),
}
