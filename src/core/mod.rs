//! Core engine types: deterministic RNG and configuration.

pub mod config;
pub mod rng;

pub use config::{Difficulty, Settings};
pub use rng::{GameRng, GameRngState};
