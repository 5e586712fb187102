//! Adventure locations.
//!
//! - `modifier`: Encounter rules (`NodeModifier`, elite mechanics)
//! - `encounter`: Encounters and branch forks
//! - `location`: `AdventureLocation` progression over an append-only arena
//! - `catalog`: The built-in map

pub mod catalog;
pub mod encounter;
pub mod location;
pub mod modifier;

pub use catalog::default_locations;
pub use encounter::{Branch, Encounter};
pub use location::{AdventureLocation, CompletionReward, LocationId, Progress};
pub use modifier::{EliteMechanic, EliteSpecial, NodeModifier};
