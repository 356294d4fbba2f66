//! Game-event state behind the pages drawn over the ocean.
//!
//! Pure state machines, no rendering: the card picker and treasure hunt of
//! the map page, and the team roster edited from the admin page.

mod admin;
mod cards;
mod treasure;

pub use admin::{CardKind, Team, TeamRoster, ALL_ACTION_CARDS, ALL_ALGO_CARDS};
pub use cards::{ActionCard, Card, CardPicker, ACTION_CARDS, AVAILABLE_CARDS, HAND_SIZE};
pub use treasure::{Decoration, DigOutcome, TreasureHunt, DECORATIONS, DIG_RADIUS_PX};

use thiserror::Error;

/// Rejected event actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("choose exactly {required} cards (have {selected})")]
    IncompleteHand { selected: usize, required: usize },

    #[error("unknown team id {0}")]
    UnknownTeam(u32),

    #[error("invalid points value {0:?}")]
    InvalidPoints(String),

    #[error("maximum of {limit} {kind} cards allowed")]
    CardLimit { kind: CardKind, limit: usize },
}
