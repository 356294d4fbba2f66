//! Character and action cards, and the three-card hand picker.

use log::info;

use super::EventError;

/// Cards in a full hand
pub const HAND_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub id: u32,
    pub name: &'static str,
    /// CSS hex colour
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCard {
    pub id: u32,
    pub name: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

#[rustfmt::skip]
pub const AVAILABLE_CARDS: [Card; 6] = [
    Card { id: 1, name: "The Navigator", color: "#3498db" },
    Card { id: 2, name: "The Explorer", color: "#e67e22" },
    Card { id: 3, name: "The Merchant", color: "#2ecc71" },
    Card { id: 4, name: "The Pirate", color: "#e74c3c" },
    Card { id: 5, name: "The Scholar", color: "#9b59b6" },
    Card { id: 6, name: "The Guard", color: "#f1c40f" },
];

#[rustfmt::skip]
pub const ACTION_CARDS: [ActionCard; 4] = [
    ActionCard { id: 101, name: "Storm", color: "#4b6584", description: "Create a coastal storm" },
    ActionCard { id: 102, name: "Bounty", color: "#f7b731", description: "Double gold for 1 turn" },
    ActionCard { id: 103, name: "Kraken", color: "#eb3b5a", description: "Summon a sea monster" },
    ActionCard { id: 104, name: "Mist", color: "#a5b1c2", description: "Hide ship movements" },
];

/// Hand selection with its popup state
#[derive(Debug, Clone, Default)]
pub struct CardPicker {
    hand: Vec<Card>,
    popup_open: bool,
    actions_open: bool,
    chosen: bool,
}

impl CardPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Hand laid out over the fixed slots; empty slots are `None`
    pub fn slots(&self) -> [Option<&Card>; HAND_SIZE] {
        std::array::from_fn(|i| self.hand.get(i))
    }

    pub fn is_selected(&self, card: &Card) -> bool {
        self.hand.iter().any(|c| c.id == card.id)
    }

    pub fn is_open(&self) -> bool {
        self.popup_open
    }

    pub fn is_chosen(&self) -> bool {
        self.chosen
    }

    /// Open the picker; a confirmed hand is final
    pub fn open(&mut self) {
        if !self.chosen {
            self.popup_open = true;
        }
    }

    /// Close without confirming; the current selection is kept
    pub fn cancel(&mut self) {
        self.popup_open = false;
    }

    /// Select a card if there is room, or deselect it if already held
    ///
    /// Returns whether the card is in the hand afterwards.
    pub fn toggle(&mut self, card: &Card) -> bool {
        if self.chosen {
            return self.is_selected(card);
        }
        if self.is_selected(card) {
            self.hand.retain(|c| c.id != card.id);
            false
        } else if self.hand.len() < HAND_SIZE {
            self.hand.push(*card);
            true
        } else {
            false
        }
    }

    /// Lock in a full hand and close the picker
    pub fn confirm(&mut self) -> Result<(), EventError> {
        if self.hand.len() != HAND_SIZE {
            return Err(EventError::IncompleteHand {
                selected: self.hand.len(),
                required: HAND_SIZE,
            });
        }
        self.chosen = true;
        self.popup_open = false;
        info!(
            "Hand chosen: {}",
            self.hand.iter().map(|c| c.name).collect::<Vec<_>>().join(", ")
        );
        Ok(())
    }

    pub fn actions_open(&self) -> bool {
        self.actions_open
    }

    pub fn open_actions(&mut self) {
        self.actions_open = true;
    }

    pub fn close_actions(&mut self) {
        self.actions_open = false;
    }
}
