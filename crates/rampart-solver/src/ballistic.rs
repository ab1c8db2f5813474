//! Fixed-angle inverse ballistics against a closing target.
//!
//! The projectile leaves the defender at angle θ under constant gravity; the
//! target closes horizontally at constant speed. Eliminating time between the
//! horizontal and vertical displacement equations leaves a quadratic in the
//! launch speed `u`, with a first-order correction for the fixed simulation
//! step during which the target keeps moving.

use serde::{Deserialize, Serialize};

use rampart_core::config::TargetingConfig;
use rampart_core::constants::POWER_SCALE_MAX;
use rampart_core::types::Position;

use crate::polynomial::solve_quadratic;
use crate::Complex64;

/// Linear mapping between launch speed and the 0-100 power scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerScale {
    /// Speed mapped to power 0.
    pub min_speed: f64,
    /// Speed span mapped onto the full scale. Must be positive.
    pub boost_span: f64,
}

impl PowerScale {
    pub fn new(min_speed: f64, boost_span: f64) -> Self {
        Self {
            min_speed,
            boost_span,
        }
    }

    /// Position of `velocity` on the scale as a fraction (0 = min, 1 = max).
    fn fraction(&self, velocity: f64) -> f64 {
        (velocity - self.min_speed) / self.boost_span
    }

    pub fn velocity_to_power(&self, velocity: f64) -> f64 {
        self.fraction(velocity) * POWER_SCALE_MAX
    }

    /// True when `velocity` falls inside the scale (inclusive at both ends).
    pub fn is_convertible(&self, velocity: f64) -> bool {
        (0.0..=1.0).contains(&self.fraction(velocity))
    }
}

/// Outcome of one inverse solve. Consumed immediately, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub success: bool,
    /// Fixed angle in degrees, echoed back.
    pub angle: f64,
    /// Power on the 0-100 scale. The fallback power when `success` is false.
    pub power: f64,
    /// Predicted seconds until impact. Zero when `success` is false.
    pub flight_time: f64,
}

/// Inverse solver parameterised by the world's physical constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticSolver {
    pub gravity: f64,
    pub time_step: f64,
    pub power: PowerScale,
    pub fallback_power: f64,
}

impl BallisticSolver {
    pub fn from_config(config: &TargetingConfig) -> Self {
        Self {
            gravity: config.gravity,
            time_step: config.fixed_time_step,
            power: PowerScale::new(config.power_min, config.power_boost_max),
            fallback_power: config.fallback_power,
        }
    }

    /// Coefficients `[a, b, c]` of the launch-speed quadratic `a·u² + b·u + c = 0`.
    pub fn speed_coefficients(
        &self,
        from: Position,
        to: Position,
        enemy_speed: f64,
        fixed_angle_deg: f64,
    ) -> [f64; 3] {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let g = self.gravity;
        let dt = self.time_step;
        let v = enemy_speed;
        let (sin, cos) = fixed_angle_deg.to_radians().sin_cos();

        let a = sin * cos * dx - dy * cos * cos - 0.5 * g * dx * dt * cos;
        let b = dx * v * sin - 2.0 * dy * v * cos - 0.5 * g * dx * dx - 0.5 * g * dx * dt * v;
        let c = -dy * v * v;
        [a, b, c]
    }

    /// Launch power and flight time for a shot at `fixed_angle_deg` from `from`
    /// onto a target at `to` closing at `enemy_speed`.
    ///
    /// The second quadratic root is preferred, then the first. A root qualifies
    /// when it is real, maps onto the power scale, and yields a finite,
    /// non-negative flight time. If neither qualifies the result carries
    /// `success = false`, the fallback power and zero flight time.
    ///
    /// A target behind the defender (`to.x < from.x`) closing at non-negative
    /// speed always fails: any positive launch speed gives it a negative flight
    /// time.
    pub fn inverse_from_start_fix_angle(
        &self,
        from: Position,
        to: Position,
        enemy_speed: f64,
        fixed_angle_deg: f64,
    ) -> ShotResult {
        let [a, b, c] = self.speed_coefficients(from, to, enemy_speed, fixed_angle_deg);
        let [first, second] = solve_quadratic(a, b, c);

        let dx = to.x - from.x;
        let cos = fixed_angle_deg.to_radians().cos();

        [second, first]
            .into_iter()
            .find_map(|root| self.qualify(root, dx, cos, enemy_speed))
            .map(|(velocity, flight_time)| ShotResult {
                success: true,
                angle: fixed_angle_deg,
                power: self.power.velocity_to_power(velocity),
                flight_time,
            })
            .unwrap_or(ShotResult {
                success: false,
                angle: fixed_angle_deg,
                power: self.fallback_power,
                flight_time: 0.0,
            })
    }

    /// `(velocity, flight_time)` if `root` is a usable launch speed.
    fn qualify(&self, root: Complex64, dx: f64, cos: f64, enemy_speed: f64) -> Option<(f64, f64)> {
        let velocity = root.re;
        if root.im != 0.0 || !velocity.is_finite() || !self.power.is_convertible(velocity) {
            return None;
        }

        let flight_time = dx / (velocity * cos + enemy_speed);
        (flight_time.is_finite() && flight_time >= 0.0).then_some((velocity, flight_time))
    }
}

impl Default for BallisticSolver {
    fn default() -> Self {
        Self::from_config(&TargetingConfig::default())
    }
}
