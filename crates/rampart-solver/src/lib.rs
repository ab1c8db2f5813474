//! Closed-form solvers for RAMPART.
//!
//! `polynomial` extracts complex roots of quadratics, cubics and quartics.
//! `ballistic` inverts fixed-angle projectile motion against a target
//! closing at constant speed, producing launch power and flight time.
//! Everything here is pure and reentrant.

pub mod ballistic;
pub mod polynomial;

pub use ballistic::{BallisticSolver, PowerScale, ShotResult};
pub use num_complex::Complex64;
