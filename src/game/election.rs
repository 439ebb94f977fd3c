use super::government::Government;
use super::outcome::{Ballot, Event, Outcome};
use super::player::{PlayerId, Role};
use super::votes::Votes;
use super::{Game, GameState, LegislativeSessionTurn};
use crate::error::GameError;

impl Game {
    /// Called when the president nominates a chancellor.
    pub fn nominate(&mut self, player: PlayerId, nominee: PlayerId) -> Result<Outcome, GameError> {
        let GameState::Nomination { president } = self.state else {
            return Err(GameError::InvalidState);
        };
        if self.actor(player)? != president {
            return Err(GameError::InvalidActor);
        }
        let nominee = self.seat_of(nominee).ok_or(GameError::InvalidTarget)?;
        if !self.eligible_chancellors(president).includes(nominee) {
            return Err(GameError::InvalidTarget);
        }

        self.round += 1;
        self.state = GameState::Election {
            president,
            nominee,
            votes: Votes::new(self.num_players_alive()),
        };
        let next_president = self.next_president().unwrap_or(player);
        self.notify(Event::Nominated {
            president: player,
            nominee: self.players[nominee].id,
            next_president,
        });
        Ok(self.flush())
    }

    /// Called when a player casts their vote. Once every living player has voted, the
    /// election is tallied.
    pub fn vote(&mut self, player: PlayerId, vote: bool) -> Result<Outcome, GameError> {
        let GameState::Election { .. } = self.state else {
            return Err(GameError::InvalidState);
        };
        let seat = self.actor(player)?;
        let GameState::Election { votes, .. } = &mut self.state else {
            return Err(GameError::InvalidState);
        };
        if votes.has_cast(seat) {
            return Err(GameError::AlreadyActed);
        }
        votes.vote(seat, vote);
        let outcome = votes.outcome();
        self.notify(Event::VoteCast { player });

        if let Some(passed) = outcome {
            if let Err(err) = self.end_election(passed) {
                // Leave the election as it was before this vote
                if let GameState::Election { votes, .. } = &mut self.state {
                    votes.unvote(seat);
                }
                self.pending.clear();
                return Err(err);
            }
        }
        Ok(self.flush())
    }

    /// Withdraws a player's vote so they can vote again. Does nothing if they haven't voted.
    pub fn unvote(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        let GameState::Election { votes, .. } = &self.state else {
            return Err(GameError::InvalidState);
        };
        let seat = self.actor(player)?;
        if votes.has_cast(seat) {
            if let GameState::Election { votes, .. } = &mut self.state {
                votes.unvote(seat);
            }
            self.notify(Event::VoteWithdrawn { player });
        }
        Ok(self.flush())
    }

    /// Called when the voting deadline for the given round passes. Players who haven't
    /// voted are counted as voting no.
    pub fn close_election(&mut self, round: u64) -> Result<Outcome, GameError> {
        let GameState::Election { votes, .. } = &self.state else {
            return Err(GameError::InvalidState);
        };
        if round != self.round {
            return Err(GameError::InvalidState);
        }
        let passed = votes.tally();
        log::debug!("game {}: voting closed for round {}", self.id, round);
        self.end_election(passed)?;
        Ok(self.flush())
    }

    fn end_election(&mut self, passed: bool) -> Result<(), GameError> {
        let GameState::Election { president, nominee, votes } = self.state else {
            return Err(GameError::InvalidState);
        };
        let ballots = self.ballots(&votes);

        if !passed {
            return self.fail_election(president, ballots);
        }

        // Draw first so that a broken deck leaves the election unresolved
        let cards = self.deck.draw_three(&mut self.rng)?;
        self.election_tracker = 0;
        self.notify(Event::ElectionPassed {
            president: self.players[president].id,
            chancellor: self.players[nominee].id,
            ballots,
        });
        self.last_government = Some(Government {
            president,
            chancellor: nominee,
        });
        self.state = GameState::LegislativeSession {
            president,
            chancellor: nominee,
            turn: LegislativeSessionTurn::President { cards },
        };

        if self.check_game_over(Some(nominee)) {
            return Ok(());
        }
        if self.board.hitler_zone() && self.players[nominee].role != Role::Hitler {
            self.players[nominee].not_hitler = true;
        }
        self.tell(president, Event::PolicyHand { cards: cards.to_vec() });
        Ok(())
    }

    fn fail_election(&mut self, president: usize, ballots: Vec<Ballot>) -> Result<(), GameError> {
        // A third failure forces the top policy; draw it first so that a broken deck
        // leaves the election unresolved
        let chaos = if self.election_tracker + 1 >= 3 {
            Some(self.deck.draw_one(&mut self.rng)?)
        } else {
            None
        };

        self.election_tracker += 1;
        self.notify(Event::ElectionFailed {
            failed_votes: self.election_tracker,
            ballots,
        });
        let Some(card) = chaos else {
            self.start_round();
            return Ok(());
        };

        log::debug!("game {}: election tracker full, forcing the top policy", self.id);
        self.last_government = None;
        self.enact(card, true, president);
        Ok(())
    }

    fn ballots(&self, votes: &Votes) -> Vec<Ballot> {
        self.players
            .iter()
            .zip(votes.votes(self.num_players()))
            .filter(|(p, _)| p.alive)
            .map(|(p, vote)| Ballot { player: p.id, vote: *vote })
            .collect()
    }
}
