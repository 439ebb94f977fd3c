use super::party::{Party, Policy};
use serde::Serialize;

pub const MAX_LIBERAL_CARDS: usize = 5;
pub const MAX_FASCIST_CARDS: usize = 6;

/// Enacted policy counts on the two tracks. Counts only ever go up.
#[derive(Clone, Copy, Serialize, Default, Debug, PartialEq, Eq)]
pub struct Board {
    pub liberal_cards: usize,
    pub fascist_cards: usize,
}

impl Board {
    /// Creates a new board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays a card onto the matching track.
    pub fn play_card(&mut self, card: Policy) {
        match card {
            Party::Liberal => self.liberal_cards += 1,
            Party::Fascist => self.fascist_cards += 1,
        }
    }

    /// Checks whether either party has completed their policy track.
    pub fn check_tracks(&self) -> Option<Party> {
        if self.liberal_cards >= MAX_LIBERAL_CARDS {
            return Some(Party::Liberal);
        }
        if self.fascist_cards >= MAX_FASCIST_CARDS {
            return Some(Party::Fascist);
        }
        None
    }

    /// Hitler wins by being elected chancellor from this point on.
    pub fn hitler_zone(&self) -> bool {
        self.fascist_cards >= 3
    }

    /// Checks whether veto power is unlocked.
    pub fn veto_unlocked(&self) -> bool {
        self.fascist_cards >= 5
    }
}
