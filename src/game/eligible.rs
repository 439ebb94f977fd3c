use super::player::PlayerId;
use super::{Game, MAX_PLAYERS};

/// A set of seats allowed to be chosen for some action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EligiblePlayers {
    eligible: [bool; MAX_PLAYERS],
}

impl EligiblePlayers {
    pub fn includes(&self, seat: usize) -> bool {
        self.eligible.get(seat).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        !self.eligible.iter().any(|e| *e)
    }

    pub fn ids(&self, game: &Game) -> Vec<PlayerId> {
        game.players
            .iter()
            .enumerate()
            .filter(|(i, _)| self.includes(*i))
            .map(|(_, p)| p.id)
            .collect()
    }
}

#[derive(Clone)]
pub struct EligiblePlayersBuilder<'a> {
    game: &'a Game,
    eligible: [bool; MAX_PLAYERS],
}

impl Game {
    /// Starts building a set of eligible players, beginning with every living player.
    pub(crate) fn eligible_players(&self) -> EligiblePlayersBuilder<'_> {
        EligiblePlayersBuilder {
            game: self,
            eligible: core::array::from_fn(|i| self.players.get(i).map(|p| p.alive).unwrap_or(false)),
        }
    }

    /// Determines which players the given president may nominate.
    ///
    /// The last elected government is term-limited. The last president is let back in
    /// only when excluding them would leave nobody to nominate.
    pub(crate) fn eligible_chancellors(&self, president: usize) -> EligiblePlayers {
        let result = self.eligible_players().exclude(president);
        let Some(government) = self.last_government else {
            return result.make();
        };
        let result = result.exclude(government.chancellor);
        let strict = result.clone().exclude(government.president).make();
        if strict.is_empty() {
            log::debug!("term limit relaxed for seat {}", government.president);
            result.make()
        } else {
            strict
        }
    }
}

impl<'a> EligiblePlayersBuilder<'a> {
    pub fn exclude(mut self, seat: usize) -> Self {
        if let Some(e) = self.eligible.get_mut(seat) {
            *e = false;
        }
        self
    }

    pub fn not_investigated(mut self) -> Self {
        for (idx, player) in self.game.players.iter().enumerate() {
            self.eligible[idx] &= player.investigated_by.is_none();
        }
        self
    }

    pub fn make(self) -> EligiblePlayers {
        EligiblePlayers { eligible: self.eligible }
    }
}
