//! Runtime targeting configuration.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// All tunable values the targeting core reads. Read-only once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    pub gravity: f64,
    pub fixed_time_step: f64,
    pub bullet_damage: u32,
    pub fixed_angle_deg: f64,
    pub power_min: f64,
    pub power_boost_max: f64,
    pub fallback_power: f64,
    pub energy_threshold: f64,
    pub special_shot_cost: f64,
    pub shoot_cooldown: f64,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            fixed_time_step: FIXED_TIME_STEP,
            bullet_damage: BULLET_DAMAGE,
            fixed_angle_deg: DEFAULT_FIXED_ANGLE_DEG,
            power_min: POWER_MIN,
            power_boost_max: POWER_BOOST_MAX,
            fallback_power: FALLBACK_POWER,
            energy_threshold: ENERGY_SHOT_MAX_CHARGE,
            special_shot_cost: SPECIAL_SHOT_ENERGY_COST,
            shoot_cooldown: SHOOT_DELAY_TIME,
        }
    }
}

impl TargetingConfig {
    /// Parse a JSON config (missing fields take their defaults) and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break power conversion or the tick loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_time_step.is_finite() && self.fixed_time_step > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.fixed_time_step));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        if self.bullet_damage == 0 {
            return Err(ConfigError::ZeroBulletDamage);
        }
        if !(self.power_boost_max.is_finite() && self.power_boost_max > 0.0) {
            return Err(ConfigError::InvalidPowerSpan(self.power_boost_max));
        }
        if !self.power_min.is_finite() {
            return Err(ConfigError::InvalidPowerMin(self.power_min));
        }
        if !(self.fixed_angle_deg > 0.0 && self.fixed_angle_deg < 90.0) {
            return Err(ConfigError::InvalidFixedAngle(self.fixed_angle_deg));
        }
        if !(self.shoot_cooldown.is_finite() && self.shoot_cooldown >= 0.0) {
            return Err(ConfigError::InvalidCooldown(self.shoot_cooldown));
        }
        for (field, value) in [
            ("energy_threshold", self.energy_threshold),
            ("special_shot_cost", self.special_shot_cost),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidEnergy { field, value });
            }
        }
        Ok(())
    }
}
