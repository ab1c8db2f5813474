//! Target selection and shot issuing for RAMPART.
//!
//! A [`TargetingCoordinator`] runs a fixed, priority-ordered list of
//! [`Strategy`] variants once per fixed step against a [`WorldState`].
//! The first strategy that fires ends the round.

pub mod coordinator;
pub mod flight_timer;
pub mod strategy;
pub mod world;

pub use coordinator::{CoordinatorState, TargetingCoordinator, TickReport};
pub use flight_timer::FlightTimer;
pub use strategy::{FiredShot, Strategy, StrategyKind, TargetingStrategy};
pub use world::{DefenseState, WorldState};

#[cfg(test)]
mod tests;
