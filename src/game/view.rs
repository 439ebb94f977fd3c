use super::outcome::KnownRole;
use super::party::Party;
use super::player::{PlayerId, Role};
use super::Game;
use crate::error::GameError;
use serde::Serialize;

/// What everybody at the table can see about a player.
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub struct PublicPlayer {
    pub id: PlayerId,
    pub seat: usize,
    pub alive: bool,
    pub not_hitler: bool,
}

/// What one player knows about another.
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub struct KnownPlayer {
    pub id: PlayerId,
    pub role: Option<Role>,
    pub party: Option<Party>,
}

/// A single player's view of the game.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub role: Role,
    pub alive: bool,
    pub others: Vec<KnownPlayer>,
}

impl Game {
    /// The seating order, with public information only.
    pub fn roster(&self) -> Vec<PublicPlayer> {
        self.players
            .iter()
            .enumerate()
            .map(|(seat, p)| PublicPlayer {
                id: p.id,
                seat,
                alive: p.alive,
                not_hitler: p.not_hitler,
            })
            .collect()
    }

    /// Living players, in seating order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().filter(|p| p.alive).map(|p| p.id)
    }

    /// Executed players, in seating order.
    pub fn dead(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().filter(|p| !p.alive).map(|p| p.id)
    }

    /// Gets the role of `target` as far as `viewer` is allowed to know it.
    ///
    /// Everyone knows their own role. Fascists know the whole table, Hitler only when the
    /// game is configured that way, and liberals nobody else. Once the game is over every
    /// role is public.
    pub fn visible_role(&self, viewer: PlayerId, target: PlayerId) -> Result<Option<Role>, GameError> {
        let viewer = self.seat_of(viewer).ok_or(GameError::PlayerNotFound)?;
        let target = self.seat_of(target).ok_or(GameError::PlayerNotFound)?;
        Ok(self.knows_role(viewer, target).then(|| self.players[target].role))
    }

    /// Gets the party of `target` as far as `viewer` is allowed to know it. On top of
    /// [Game::visible_role], a president learns the party of anyone they investigated.
    pub fn visible_party(&self, viewer: PlayerId, target: PlayerId) -> Result<Option<Party>, GameError> {
        let viewer_seat = self.seat_of(viewer).ok_or(GameError::PlayerNotFound)?;
        let target_seat = self.seat_of(target).ok_or(GameError::PlayerNotFound)?;
        let player = &self.players[target_seat];
        let known = self.knows_role(viewer_seat, target_seat) || player.investigated_by == Some(viewer);
        Ok(known.then(|| player.party()))
    }

    /// Everything a player is allowed to know.
    pub fn player_view(&self, viewer: PlayerId) -> Result<PlayerView, GameError> {
        let seat = self.seat_of(viewer).ok_or(GameError::PlayerNotFound)?;
        let me = &self.players[seat];
        let others = self
            .players
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != seat)
            .map(|(i, p)| KnownPlayer {
                id: p.id,
                role: self.knows_role(seat, i).then_some(p.role),
                party: (self.knows_role(seat, i) || p.investigated_by == Some(viewer)).then_some(p.party()),
            })
            .collect();
        Ok(PlayerView {
            id: me.id,
            role: me.role,
            alive: me.alive,
            others,
        })
    }

    /// The roles revealed to a player when the game starts.
    pub(crate) fn allies_of(&self, seat: usize) -> Vec<KnownRole> {
        self.players
            .iter()
            .enumerate()
            .filter(|(i, p)| *i != seat && p.party() == Party::Fascist && self.knows_role(seat, *i))
            .map(|(_, p)| KnownRole { player: p.id, role: p.role })
            .collect()
    }

    fn knows_role(&self, viewer: usize, target: usize) -> bool {
        if viewer == target || self.game_over() {
            return true;
        }
        match self.players[viewer].role {
            Role::Liberal => false,
            Role::Fascist => true,
            Role::Hitler => self.opts.hitler_knows_fascists,
        }
    }
}
