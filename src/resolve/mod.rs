//! Turn resolution.
//!
//! - `action`: Closed set of action kinds
//! - `resolver`: The pure resolution function and its records
//! - `rewind`: Fate rewind re-resolution

pub mod action;
pub mod resolver;
pub mod rewind;

pub use action::ActionKind;
pub use resolver::{
    opponent_value, raw_card_total, resolve, Resolution, ResolveInput, Rewards, TurnRecord,
    CRIT_MARGIN, SUIT_MATCH_BONUS,
};
pub use rewind::reresolve;
