use super::MAX_PLAYERS;
use serde::Serialize;

/// Tracks the vote of each seat for the current election.
#[derive(Clone, Copy, Serialize, Debug)]
pub struct Votes {
    /// Number of living players, all of whom must vote
    num_voters: usize,
    votes: [Option<bool>; MAX_PLAYERS],
}

impl Votes {
    /// Creates a new `Votes`.
    pub fn new(num_voters: usize) -> Self {
        Self {
            num_voters,
            votes: [None; MAX_PLAYERS],
        }
    }

    /// Returns whether the given seat has cast their vote.
    pub fn has_cast(&self, seat: usize) -> bool {
        self.votes[seat].is_some()
    }

    /// Records the vote of a seat.
    pub fn vote(&mut self, seat: usize, vote: bool) {
        self.votes[seat] = Some(vote);
    }

    /// Withdraws a vote; does nothing if the seat has not voted.
    pub fn unvote(&mut self, seat: usize) {
        self.votes[seat] = None;
    }

    /// Number of votes recorded so far.
    pub fn count(&self) -> usize {
        self.votes.iter().filter(|v| v.is_some()).count()
    }

    /// If all votes are counted, returns the outcome, otherwise returns `None`.
    pub fn outcome(&self) -> Option<bool> {
        (self.count() >= self.num_voters).then(|| self.tally())
    }

    /// Counts the votes cast so far; missing votes are treated as no.
    pub fn tally(&self) -> bool {
        let yes = self.votes.iter().filter(|v| **v == Some(true)).count();
        let no = self.num_voters - yes;
        yes > no
    }

    /// Gets the vote of each seat.
    pub fn votes(&self, num_players: usize) -> &[Option<bool>] {
        &self.votes[..num_players]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_every_voter() {
        let mut votes = Votes::new(3);
        votes.vote(0, true);
        votes.vote(1, true);
        assert_eq!(votes.outcome(), None);
        votes.vote(2, false);
        assert_eq!(votes.outcome(), Some(true));
    }

    #[test]
    fn tie_fails() {
        let mut votes = Votes::new(4);
        votes.vote(0, true);
        votes.vote(1, true);
        votes.vote(2, false);
        votes.vote(3, false);
        assert_eq!(votes.outcome(), Some(false));
    }

    #[test]
    fn unvote_is_idempotent() {
        let mut votes = Votes::new(5);
        votes.unvote(2);
        votes.vote(2, true);
        votes.unvote(2);
        votes.unvote(2);
        assert_eq!(votes.count(), 0);
        assert!(!votes.has_cast(2));
    }

    #[test]
    fn abstentions_count_against() {
        let mut votes = Votes::new(5);
        votes.vote(0, true);
        votes.vote(1, true);
        votes.vote(2, false);
        assert!(!votes.tally());
        votes.vote(3, true);
        assert!(votes.tally());
    }
}
