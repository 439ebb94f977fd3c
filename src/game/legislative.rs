use super::outcome::{Event, Outcome};
use super::party::Policy;
use super::player::PlayerId;
use super::{Game, GameState, LegislativeSessionTurn, VetoStatus};
use crate::error::GameError;

/// Removes one card matching `choice` from the hand, returning the rest.
fn without<const N: usize, const M: usize>(cards: [Policy; N], choice: Policy) -> Result<[Policy; M], GameError> {
    let idx = cards.iter().position(|c| *c == choice).ok_or(GameError::InvalidCard)?;
    let rest: Vec<Policy> = cards
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, c)| *c)
        .collect();
    rest.try_into().map_err(|_| GameError::InvalidCard)
}

impl Game {
    /// Called when a legislator discards a policy from their hand. The president discards
    /// one of three; the chancellor discards one of two and the other is enacted.
    pub fn discard_policy(&mut self, player: PlayerId, choice: Policy) -> Result<Outcome, GameError> {
        use LegislativeSessionTurn::*;

        let GameState::LegislativeSession { president, chancellor, turn } = self.state else {
            return Err(GameError::InvalidState);
        };
        let seat = self.actor(player)?;

        match turn {
            President { cards } => {
                if seat != president {
                    return Err(GameError::InvalidActor);
                }
                let cards: [Policy; 2] = without(cards, choice)?;
                let veto = if self.board.veto_unlocked() {
                    VetoStatus::CanVeto
                } else {
                    VetoStatus::CannotVeto
                };
                self.deck.discard(&[choice]);
                self.state = GameState::LegislativeSession {
                    president,
                    chancellor,
                    turn: Chancellor { cards, veto },
                };
                self.notify(Event::PolicyDiscarded { player });
                self.tell(chancellor, Event::PolicyHand { cards: cards.to_vec() });
            }
            Chancellor { cards, .. } => {
                if seat != chancellor {
                    return Err(GameError::InvalidActor);
                }
                let [card]: [Policy; 1] = without(cards, choice)?;
                self.deck.discard(&[choice]);
                self.notify(Event::PolicyDiscarded { player });
                self.enact(card, false, president);
            }
            VetoRequested { .. } => return Err(GameError::InvalidState),
        }

        Ok(self.flush())
    }

    /// Called when the chancellor asks to veto the agenda.
    pub fn request_veto(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        let GameState::LegislativeSession { president, chancellor, turn } = self.state else {
            return Err(GameError::InvalidState);
        };
        let LegislativeSessionTurn::Chancellor { cards, veto } = turn else {
            return Err(GameError::InvalidState);
        };
        if self.actor(player)? != chancellor {
            return Err(GameError::InvalidActor);
        }
        match veto {
            VetoStatus::CanVeto => {}
            VetoStatus::CannotVeto => return Err(GameError::InvalidState),
            VetoStatus::VetoDenied => return Err(GameError::AlreadyActed),
        }

        self.state = GameState::LegislativeSession {
            president,
            chancellor,
            turn: LegislativeSessionTurn::VetoRequested { cards },
        };
        self.notify(Event::VetoRequested { chancellor: player });
        Ok(self.flush())
    }

    /// Called when the president agrees to a veto; both policies are discarded.
    pub fn accept_veto(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        let cards = self.veto_decision(player)?;
        self.deck.discard(&cards);
        self.deck.check_shuffle(&mut self.rng);
        self.notify(Event::VetoAccepted { president: player });
        self.notify_board();
        self.start_round();
        Ok(self.flush())
    }

    /// Called when the president rejects a veto; the chancellor must enact a policy.
    pub fn decline_veto(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        let cards = self.veto_decision(player)?;
        let GameState::LegislativeSession { turn, .. } = &mut self.state else {
            return Err(GameError::InvalidState);
        };
        *turn = LegislativeSessionTurn::Chancellor {
            cards,
            veto: VetoStatus::VetoDenied,
        };
        self.notify(Event::VetoDeclined { president: player });
        Ok(self.flush())
    }

    /// Checks that the president may answer a pending veto request.
    fn veto_decision(&self, player: PlayerId) -> Result<[Policy; 2], GameError> {
        let GameState::LegislativeSession { president, turn, .. } = self.state else {
            return Err(GameError::InvalidState);
        };
        let LegislativeSessionTurn::VetoRequested { cards } = turn else {
            return Err(GameError::InvalidState);
        };
        if self.actor(player)? != president {
            return Err(GameError::InvalidActor);
        }
        Ok(cards)
    }
}
