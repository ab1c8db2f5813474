//! Core types and definitions for the RAMPART targeting subsystem.
//!
//! This crate defines the vocabulary shared across all other crates:
//! world records, shot commands, configuration, and constants.
//! It contains no solver or strategy logic.

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod types;
