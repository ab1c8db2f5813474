//! Targeting constants and tuning parameters.
//!
//! These are the defaults behind [`TargetingConfig`](crate::config::TargetingConfig).
//! Hosts may override any of them through configuration.

/// Fixed simulation step (seconds). 50 Hz.
pub const FIXED_TIME_STEP: f64 = 0.02;

/// Gravitational acceleration (units/s²), acting along -y.
pub const GRAVITY: f64 = 9.81;

// --- Projectile ---

/// Health removed by one projectile hit.
pub const BULLET_DAMAGE: u32 = 10;

/// Launch angle the turret is mechanically fixed to (degrees above horizontal).
pub const DEFAULT_FIXED_ANGLE_DEG: f64 = 45.0;

// --- Power conversion ---

/// Lowest launch speed that maps onto the power scale (power 0).
pub const POWER_MIN: f64 = 100.0;

/// Speed span above `POWER_MIN` covered by the power scale (power 100 at the top).
pub const POWER_BOOST_MAX: f64 = 2000.0;

/// Upper end of the power scale.
pub const POWER_SCALE_MAX: f64 = 100.0;

/// Power reported when no launch speed reaches the target.
pub const FALLBACK_POWER: f64 = 100.0;

// --- Special shot ---

/// Energy required before the special (cluster) shot may be used.
pub const ENERGY_SHOT_MAX_CHARGE: f64 = 100.0;

/// Energy consumed by one special shot.
pub const SPECIAL_SHOT_ENERGY_COST: f64 = ENERGY_SHOT_MAX_CHARGE;

// --- Cooldown ---

/// Base cooldown applied after any shot (seconds).
pub const SHOOT_DELAY_TIME: f64 = 0.5;

// --- Cluster detection ---

/// Maximum horizontal gap between two hostiles in the same cluster.
pub const CLUSTER_HORIZONTAL_TOLERANCE: f64 = 0.0;

/// Maximum vertical gap between two hostiles in the same cluster.
pub const CLUSTER_VERTICAL_TOLERANCE: f64 = 1.0;

/// A roster needing this many shots or fewer is not worth a special shot.
pub const CLUSTER_ROSTER_MIN_SHOTS: u32 = 2;

/// Clusters needing fewer shots than this are ignored.
pub const CLUSTER_MIN_SHOTS: u32 = 2;

/// Cluster total at which the nearest cluster wins over the largest one.
pub const CLUSTER_PREFERRED_SHOTS: u32 = 3;
