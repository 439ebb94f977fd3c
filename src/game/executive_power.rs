use super::board::MAX_FASCIST_CARDS;
use super::eligible::EligiblePlayers;
use super::outcome::{Event, Outcome};
use super::party::Policy;
use super::player::{PlayerId, Role};
use super::{Game, GameState};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum ExecutivePower {
    /// The president must investigate a player's loyalty.
    InvestigateLoyalty,
    /// The president must choose the next president.
    SpecialElection,
    /// The president must peek at the top three cards on the deck.
    PolicyPeek,
    /// The president must execute a player.
    Execution,
}

/// Which fascist policy unlocks which power.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum PowerSchedule {
    /// One board for every table size: investigate (more than 6 players only), special
    /// election, policy peek, nothing, then execution.
    #[default]
    Standard,
    /// The published board, which varies with the table size.
    Headcount,
}

impl PowerSchedule {
    /// Gets the power unlocked by the given fascist policy, if there is any.
    pub fn power(self, num_players: usize, fascist_cards: usize) -> Option<ExecutivePower> {
        use ExecutivePower::*;
        match self {
            PowerSchedule::Standard => match (num_players, fascist_cards) {
                (7.., 1) => Some(InvestigateLoyalty),
                (_, 2) => Some(SpecialElection),
                (_, 3) => Some(PolicyPeek),
                (_, 5) => Some(Execution),
                _ => None,
            },
            PowerSchedule::Headcount => match (num_players, fascist_cards) {
                (9..=10, 1) => Some(InvestigateLoyalty),
                (7..=10, 2) => Some(InvestigateLoyalty),
                (5..=6, 3) => Some(PolicyPeek),
                (7..=10, 3) => Some(SpecialElection),
                (_, 4) => Some(Execution),
                (_, 5) => Some(Execution),
                _ => None,
            },
        }
    }
}

impl FromStr for PowerSchedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(PowerSchedule::Standard),
            "headcount" => Ok(PowerSchedule::Headcount),
            other => Err(format!("unknown power schedule: {other}")),
        }
    }
}

/// Hands out each power once, the first time the fascist track reaches its slot.
#[derive(Clone, Debug)]
pub struct PowerResolver {
    schedule: PowerSchedule,
    num_players: usize,
    triggered: [bool; MAX_FASCIST_CARDS + 1],
}

impl PowerResolver {
    pub fn new(schedule: PowerSchedule, num_players: usize) -> Self {
        Self {
            schedule,
            num_players,
            triggered: [false; MAX_FASCIST_CARDS + 1],
        }
    }

    /// Returns the power for this slot, unless it has already been used this game.
    pub fn resolve(&mut self, fascist_cards: usize) -> Option<ExecutivePower> {
        let slot = self.triggered.get_mut(fascist_cards)?;
        if *slot {
            return None;
        }
        *slot = true;
        self.schedule.power(self.num_players, fascist_cards)
    }

    #[cfg(test)]
    pub fn has_triggered(&self, fascist_cards: usize) -> bool {
        self.triggered.get(fascist_cards).copied().unwrap_or(false)
    }
}

impl Game {
    pub(crate) fn start_executive_action(&mut self, president: usize, power: ExecutivePower) {
        // A power with nobody to target is skipped
        let needs_target = !matches!(power, ExecutivePower::PolicyPeek);
        if needs_target && self.power_targets(president, power).is_empty() {
            log::debug!("game {}: no targets for {:?}, skipping", self.id, power);
            self.start_round();
            return;
        }

        log::debug!("game {}: seat {} gains {:?}", self.id, president, power);
        self.state = GameState::ExecutiveAction { president, power };
        self.notify(Event::PowerUnlocked {
            president: self.players[president].id,
            power,
        });
    }

    /// Determines which players the president may choose for a power.
    pub(crate) fn power_targets(&self, president: usize, power: ExecutivePower) -> EligiblePlayers {
        let result = self.eligible_players().exclude(president);
        match power {
            ExecutivePower::InvestigateLoyalty => result.not_investigated().make(),
            _ => result.make(),
        }
    }

    /// Checks that `player` is the president holding `power`, and resolves the target's seat.
    fn use_power(
        &self,
        player: PlayerId,
        power: ExecutivePower,
        target: Option<PlayerId>,
    ) -> Result<(usize, Option<usize>), GameError> {
        let GameState::ExecutiveAction { president, power: current } = self.state else {
            return Err(GameError::InvalidState);
        };
        if current != power {
            return Err(GameError::InvalidState);
        }
        if self.actor(player)? != president {
            return Err(GameError::InvalidActor);
        }
        let Some(target) = target else {
            return Ok((president, None));
        };
        let target = self
            .seat_of(target)
            .filter(|seat| self.power_targets(president, power).includes(*seat))
            .ok_or(GameError::InvalidTarget)?;
        Ok((president, Some(target)))
    }

    /// The president learns the party membership of another player.
    pub fn investigate(&mut self, player: PlayerId, target: PlayerId) -> Result<Outcome, GameError> {
        let (president, Some(seat)) = self.use_power(player, ExecutivePower::InvestigateLoyalty, Some(target))?
        else {
            return Err(GameError::InvalidTarget);
        };
        let party = self.players[seat].party();
        self.players[seat].investigated_by = Some(player);
        self.notify(Event::Investigated { president: player, target });
        self.tell(president, Event::InvestigationResult { target, party });
        self.start_round();
        Ok(self.flush())
    }

    /// The president picks the next president. Afterwards the rotation carries on from
    /// the seat after this president.
    pub fn choose_special_election_president(
        &mut self,
        player: PlayerId,
        target: PlayerId,
    ) -> Result<Outcome, GameError> {
        let (_, Some(seat)) = self.use_power(player, ExecutivePower::SpecialElection, Some(target))? else {
            return Err(GameError::InvalidTarget);
        };
        self.next_president = Some(seat);
        self.notify(Event::SpecialElectionCalled {
            president: player,
            chosen: target,
        });
        self.start_round();
        Ok(self.flush())
    }

    /// The president privately looks at the top three policies; the deck is not changed.
    pub fn peek_policies(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        let (president, _) = self.use_power(player, ExecutivePower::PolicyPeek, None)?;
        let cards: [Policy; 3] = self.deck.peek_three()?;
        self.notify(Event::PoliciesPeeked { president: player });
        self.tell(president, Event::PeekResult { cards: cards.to_vec() });
        self.start_round();
        Ok(self.flush())
    }

    /// The president executes a player. Executing Hitler ends the game.
    pub fn execute_player(&mut self, player: PlayerId, target: PlayerId) -> Result<Outcome, GameError> {
        let (_, Some(seat)) = self.use_power(player, ExecutivePower::Execution, Some(target))? else {
            return Err(GameError::InvalidTarget);
        };
        let victim = &mut self.players[seat];
        victim.alive = false;
        victim.not_hitler = victim.role != Role::Hitler;
        let was_hitler = victim.role == Role::Hitler;
        log::debug!("game {}: {} executed", self.id, target);
        self.notify(Event::PlayerExecuted { player: target, was_hitler });

        if !self.check_game_over(None) {
            self.start_round();
        }
        Ok(self.flush())
    }
}
