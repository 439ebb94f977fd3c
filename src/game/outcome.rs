use super::party::{Party, Policy};
use super::player::{PlayerId, Role};
use super::WinCondition;
use serde::Serialize;

/// What happened as a result of one command, and who must act next.
///
/// The adapter turns notices into platform messages and the prompt into a request for input.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub notices: Vec<Notice>,
    pub prompt: Prompt,
}

impl Outcome {
    /// Appends a later outcome, keeping its prompt.
    pub fn merge(mut self, later: Outcome) -> Outcome {
        self.notices.extend(later.notices);
        Outcome {
            notices: self.notices,
            prompt: later.prompt,
        }
    }

    /// Iterates over the events a given player is allowed to see.
    pub fn visible_to(&self, player: PlayerId) -> impl Iterator<Item = &Event> {
        self.notices
            .iter()
            .filter(move |n| n.audience.includes(player))
            .map(|n| &n.event)
    }

    /// Iterates over the public events.
    pub fn public(&self) -> impl Iterator<Item = &Event> {
        self.notices
            .iter()
            .filter(|n| n.audience == Audience::Public)
            .map(|n| &n.event)
    }
}

/// Who may see a notice.
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "to", content = "player")]
pub enum Audience {
    Public,
    Player(PlayerId),
}

impl Audience {
    pub fn includes(&self, player: PlayerId) -> bool {
        match self {
            Audience::Public => true,
            Audience::Player(p) => *p == player,
        }
    }
}

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct Notice {
    pub audience: Audience,
    pub event: Event,
}

/// A player's ballot, revealed once the election is over.
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub struct Ballot {
    pub player: PlayerId,
    pub vote: Option<bool>,
}

/// A player whose role the recipient of a notice is allowed to know.
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub struct KnownRole {
    pub player: PlayerId,
    pub role: Role,
}

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Event {
    PlayerJoined {
        player: PlayerId,
        joined: usize,
        max_players: usize,
    },
    PlayerLeft {
        player: PlayerId,
    },
    GameStarted {
        seating: Vec<PlayerId>,
    },
    /// Sent privately to every player at the start of the game.
    RoleAssigned {
        role: Role,
        allies: Vec<KnownRole>,
    },
    BoardUpdated {
        liberal_cards: usize,
        fascist_cards: usize,
        election_tracker: usize,
        draw_pile: usize,
    },
    NominationStarted {
        president: PlayerId,
    },
    Nominated {
        president: PlayerId,
        nominee: PlayerId,
        next_president: PlayerId,
    },
    VoteCast {
        player: PlayerId,
    },
    VoteWithdrawn {
        player: PlayerId,
    },
    ElectionPassed {
        president: PlayerId,
        chancellor: PlayerId,
        ballots: Vec<Ballot>,
    },
    ElectionFailed {
        failed_votes: usize,
        ballots: Vec<Ballot>,
    },
    /// Sent privately to the legislator who must discard.
    PolicyHand {
        cards: Vec<Policy>,
    },
    PolicyDiscarded {
        player: PlayerId,
    },
    PolicyEnacted {
        policy: Policy,
        forced: bool,
    },
    VetoUnlocked,
    VetoRequested {
        chancellor: PlayerId,
    },
    VetoAccepted {
        president: PlayerId,
    },
    VetoDeclined {
        president: PlayerId,
    },
    PowerUnlocked {
        president: PlayerId,
        power: super::executive_power::ExecutivePower,
    },
    Investigated {
        president: PlayerId,
        target: PlayerId,
    },
    /// Sent privately to the investigating president.
    InvestigationResult {
        target: PlayerId,
        party: Party,
    },
    SpecialElectionCalled {
        president: PlayerId,
        chosen: PlayerId,
    },
    PoliciesPeeked {
        president: PlayerId,
    },
    /// Sent privately to the peeking president; topmost card first.
    PeekResult {
        cards: Vec<Policy>,
    },
    PlayerExecuted {
        player: PlayerId,
        was_hitler: bool,
    },
    GameOver {
        winner: Party,
        condition: WinCondition,
        roles: Vec<KnownRole>,
    },
}

/// The input the game is waiting for.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Prompt {
    WaitingForPlayers {
        joined: usize,
        max_players: usize,
    },
    Nominate {
        president: PlayerId,
        eligible: Vec<PlayerId>,
    },
    Vote {
        president: PlayerId,
        nominee: PlayerId,
        round: u64,
        pending: Vec<PlayerId>,
    },
    PresidentDiscard {
        president: PlayerId,
    },
    ChancellorDiscard {
        chancellor: PlayerId,
        can_veto: bool,
    },
    VetoDecision {
        president: PlayerId,
    },
    Investigate {
        president: PlayerId,
        eligible: Vec<PlayerId>,
    },
    ChooseNextPresident {
        president: PlayerId,
        eligible: Vec<PlayerId>,
    },
    PolicyPeek {
        president: PlayerId,
    },
    Execute {
        president: PlayerId,
        eligible: Vec<PlayerId>,
    },
    Restart {
        winner: Party,
    },
}
