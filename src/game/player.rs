use super::party::Party;
use crate::error::GameError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a player on the hosting platform.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A seated player.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub role: Role,
    pub alive: bool,
    /// Publicly proven not to be Hitler.
    pub not_hitler: bool,
    /// The president who investigated this player's loyalty, if any.
    pub investigated_by: Option<PlayerId>,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Role {
    Liberal,
    Fascist,
    Hitler,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Liberal => f.write_str("Liberal"),
            Role::Fascist => f.write_str("Fascist"),
            Role::Hitler => f.write_str("Hitler"),
        }
    }
}

impl Role {
    pub fn party(self) -> Party {
        match self {
            Role::Liberal => Party::Liberal,
            Role::Fascist | Role::Hitler => Party::Fascist,
        }
    }
}

impl Player {
    pub fn new(id: PlayerId, role: Role) -> Self {
        Self {
            id,
            role,
            alive: true,
            not_hitler: false,
            investigated_by: None,
        }
    }

    pub fn party(&self) -> Party {
        self.role.party()
    }
}

/// How many of each role are dealt for a given table size.
#[derive(Clone, Copy, Serialize, PartialEq, Eq, Debug)]
pub struct RoleDistribution {
    pub liberals: usize,
    /// Ordinary fascists, not counting Hitler.
    pub fascists: usize,
}

impl RoleDistribution {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        if !(super::MIN_PLAYERS..=super::MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::InvalidPlayerCount);
        }
        // The fascist party, Hitler included, is always the minority
        let fascist_party = (num_players - 1) / 2;
        Ok(Self {
            liberals: num_players - fascist_party,
            fascists: fascist_party - 1,
        })
    }
}

/// Shuffles the seating order and deals a role to every seat.
pub fn assign_roles(ids: &[PlayerId], rng: &mut impl Rng) -> Result<Vec<Player>, GameError> {
    let dist = RoleDistribution::new(ids.len())?;

    let mut seats = ids.to_vec();
    seats.shuffle(rng);

    let mut roles = Vec::with_capacity(ids.len());
    roles.push(Role::Hitler);
    roles.extend(std::iter::repeat(Role::Fascist).take(dist.fascists));
    roles.extend(std::iter::repeat(Role::Liberal).take(dist.liberals));
    roles.shuffle(rng);

    Ok(seats.into_iter().zip(roles).map(|(id, role)| Player::new(id, role)).collect())
}
