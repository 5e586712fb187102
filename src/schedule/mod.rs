//! Round/turn scheduling.
//!
//! The clock only counts. End-of-turn passives and game-over checks are
//! driven by the engine.

pub mod clock;

pub use clock::{ClockTick, RoundClock};
