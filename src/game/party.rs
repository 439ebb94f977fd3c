use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two political parties of the game.
///
/// Policy cards carry a party too, so the same type doubles as the card tag.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
pub enum Party {
    Liberal,
    Fascist,
}

/// A policy card; its tag is the party whose track it advances.
pub type Policy = Party;

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Liberal => f.write_str("Liberal"),
            Party::Fascist => f.write_str("Fascist"),
        }
    }
}

/// Parses the card-choice tokens players type, e.g. `l`, `f`, `liberal`, `Fascist`.
impl FromStr for Party {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "liberal" => Ok(Party::Liberal),
            "f" | "fascist" => Ok(Party::Fascist),
            _ => Err(GameError::InvalidCard),
        }
    }
}
