use super::executive_power::PowerSchedule;
use super::player::RoleDistribution;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// House rules for a single game.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct GameOptions {
    /// Which fascist policies unlock which presidential powers.
    pub powers: PowerSchedule,
    /// Whether Hitler is told who the fascists are. Off by default, even at 5-6 players.
    pub hitler_knows_fascists: bool,
}

impl GameOptions {
    /// Gets the role distribution for the given number of players.
    /// Returns a `GameError` if the player count is not supported.
    pub fn role_distribution(&self, num_players: usize) -> Result<RoleDistribution, GameError> {
        RoleDistribution::new(num_players)
    }
}
