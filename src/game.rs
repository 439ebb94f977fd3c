use self::board::Board;
use self::deck::Deck;
use self::executive_power::PowerResolver;
use self::government::Government;
use self::player::{assign_roles, Player};
use self::votes::Votes;
use crate::error::GameError;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use self::executive_power::{ExecutivePower, PowerSchedule};
pub use self::options::GameOptions;
pub use self::outcome::{Audience, Ballot, Event, KnownRole, Notice, Outcome, Prompt};
pub use self::party::{Party, Policy};
pub use self::player::{PlayerId, Role, RoleDistribution};
pub use self::view::{KnownPlayer, PlayerView, PublicPlayer};

mod board;
mod deck;
mod election;
mod eligible;
mod executive_power;
mod government;
mod legislative;
mod options;
mod outcome;
mod party;
mod player;
mod test;
mod view;
mod votes;

pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 10;

/// Identifies a game within a [GameRegistry](crate::registry::GameRegistry).
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(transparent)]
pub struct GameId(pub u64);

/// The platform channel a game is played in.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A game of Secret Hitler.
#[derive(Clone, Debug)]
pub struct Game {
    id: GameId,
    session: SessionId,
    creator: PlayerId,
    max_players: usize,
    opts: GameOptions,
    /// Everyone who joined, in join order
    members: Vec<PlayerId>,
    /// Seated players, in seating order; empty until the game starts
    players: Vec<Player>,
    board: Board,
    deck: Deck,
    powers: PowerResolver,
    state: GameState,
    /// Seat of the last president chosen by normal rotation
    presidential_turn: usize,
    /// Seat chosen by a special election, which overrides the rotation once
    next_president: Option<usize>,
    election_tracker: usize,
    /// Incremented whenever an election opens; lets late deadline events be told apart
    round: u64,
    last_government: Option<Government>,
    /// Notices produced by the command currently being applied
    pending: Vec<Notice>,
    rng: rand_chacha::ChaCha8Rng,
}

/// Represents the current phase in the game loop.
#[derive(Clone, Debug)]
enum GameState {
    Waiting,
    Nomination {
        president: usize,
    },
    Election {
        president: usize,
        nominee: usize,
        votes: Votes,
    },
    LegislativeSession {
        president: usize,
        chancellor: usize,
        turn: LegislativeSessionTurn,
    },
    ExecutiveAction {
        president: usize,
        power: ExecutivePower,
    },
    GameOver(WinCondition),
}

#[derive(Clone, Copy, Debug)]
enum LegislativeSessionTurn {
    /// President must discard a card.
    President { cards: [Policy; 3] },
    /// Chancellor must discard a card.
    Chancellor { cards: [Policy; 2], veto: VetoStatus },
    /// Chancellor has called for a veto.
    VetoRequested { cards: [Policy; 2] },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum VetoStatus {
    CannotVeto,
    CanVeto,
    VetoDenied,
}

/// The externally visible phase of a game.
#[derive(Clone, Copy, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Waiting,
    Nomination,
    Election,
    LegislativePresident,
    LegislativeChancellor,
    Veto,
    Investigation,
    SpecialElection,
    PolicyPeek,
    Execution,
    GameOver,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum WinCondition {
    /// The liberals completed their policy track.
    LiberalPolicyTrack,
    /// The fascists completed their policy track.
    FascistPolicyTrack,
    /// Hitler was elected chancellor
    HitlerChancellor,
    /// Hitler was executed
    HitlerExecuted,
    /// No liberal is left alive
    LiberalsEliminated,
    /// No fascist is left alive
    FascistsEliminated,
}

impl WinCondition {
    pub fn winner(self) -> Party {
        match self {
            WinCondition::LiberalPolicyTrack
            | WinCondition::HitlerExecuted
            | WinCondition::FascistsEliminated => Party::Liberal,
            WinCondition::FascistPolicyTrack
            | WinCondition::HitlerChancellor
            | WinCondition::LiberalsEliminated => Party::Fascist,
        }
    }
}

impl Game {
    /// Creates a new game in the lobby, with the creator as its first member.
    pub fn new(
        id: GameId,
        session: SessionId,
        max_players: usize,
        creator: PlayerId,
        opts: GameOptions,
        seed: u64,
    ) -> Result<Self, GameError> {
        opts.role_distribution(max_players)?;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        let deck = Deck::new(&mut rng);

        Ok(Game {
            id,
            session,
            creator,
            max_players,
            opts,
            members: vec![creator],
            players: vec![],
            board: Board::new(),
            deck,
            powers: PowerResolver::new(opts.powers, max_players),
            state: GameState::Waiting,
            presidential_turn: 0,
            next_president: None,
            election_tracker: 0,
            round: 0,
            last_government: None,
            pending: vec![],
            rng,
        })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn creator(&self) -> PlayerId {
        self.creator
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn options(&self) -> &GameOptions {
        &self.opts
    }

    /// Everyone who has joined this game, dead or alive.
    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    pub fn has_player(&self, player: PlayerId) -> bool {
        self.members.contains(&player)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() == self.max_players
    }

    /// Adds a player to the lobby.
    pub fn join(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        let GameState::Waiting = self.state else {
            return Err(GameError::InvalidState);
        };
        if self.has_player(player) {
            return Err(GameError::AlreadyInGame);
        }
        if self.is_full() {
            return Err(GameError::GameFull);
        }
        self.members.push(player);
        self.notify(Event::PlayerJoined {
            player,
            joined: self.members.len(),
            max_players: self.max_players,
        });
        Ok(self.flush())
    }

    /// Removes a player from the lobby. The creator cannot leave.
    pub fn leave(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        let GameState::Waiting = self.state else {
            return Err(GameError::InvalidState);
        };
        if player == self.creator {
            return Err(GameError::InvalidActor);
        }
        let Some(idx) = self.members.iter().position(|p| *p == player) else {
            return Err(GameError::PlayerNotFound);
        };
        self.members.remove(idx);
        self.notify(Event::PlayerLeft { player });
        Ok(self.flush())
    }

    /// Deals roles and starts the first round. Only succeeds once every seat is taken.
    pub fn start_game(&mut self) -> Result<Outcome, GameError> {
        let GameState::Waiting = self.state else {
            return Err(GameError::InvalidState);
        };
        if !self.is_full() {
            return Err(GameError::NotEnoughPlayers);
        }
        self.deal()?;
        log::info!("game {} started with {} players", self.id, self.max_players);
        Ok(self.flush())
    }

    /// Starts over with the same members, re-dealing roles and seats.
    pub fn restart(&mut self, player: PlayerId) -> Result<Outcome, GameError> {
        let GameState::GameOver(_) = self.state else {
            return Err(GameError::InvalidState);
        };
        if !self.has_player(player) {
            return Err(GameError::InvalidActor);
        }
        self.deal()?;
        log::info!("game {} restarted by {}", self.id, player);
        Ok(self.flush())
    }

    fn deal(&mut self) -> Result<(), GameError> {
        let players = assign_roles(&self.members, &mut self.rng)?;
        let num_players = players.len();

        self.players = players;
        self.board = Board::new();
        self.deck = Deck::new(&mut self.rng);
        self.powers = PowerResolver::new(self.opts.powers, num_players);
        self.presidential_turn = num_players - 1;
        self.next_president = None;
        self.election_tracker = 0;
        self.last_government = None;

        self.notify(Event::GameStarted {
            seating: self.players.iter().map(|p| p.id).collect(),
        });
        for seat in 0..num_players {
            let event = Event::RoleAssigned {
                role: self.players[seat].role,
                allies: self.allies_of(seat),
            };
            self.tell(seat, event);
        }
        self.notify_board();
        self.start_round();
        Ok(())
    }

    /// Gets the current phase.
    pub fn phase(&self) -> Phase {
        use LegislativeSessionTurn::*;
        match &self.state {
            GameState::Waiting => Phase::Waiting,
            GameState::Nomination { .. } => Phase::Nomination,
            GameState::Election { .. } => Phase::Election,
            GameState::LegislativeSession { turn, .. } => match turn {
                President { .. } => Phase::LegislativePresident,
                Chancellor { .. } => Phase::LegislativeChancellor,
                VetoRequested { .. } => Phase::Veto,
            },
            GameState::ExecutiveAction { power, .. } => match power {
                ExecutivePower::InvestigateLoyalty => Phase::Investigation,
                ExecutivePower::SpecialElection => Phase::SpecialElection,
                ExecutivePower::PolicyPeek => Phase::PolicyPeek,
                ExecutivePower::Execution => Phase::Execution,
            },
            GameState::GameOver(_) => Phase::GameOver,
        }
    }

    /// The current president, if the game is in progress.
    pub fn president(&self) -> Option<PlayerId> {
        match self.state {
            GameState::Nomination { president }
            | GameState::Election { president, .. }
            | GameState::LegislativeSession { president, .. }
            | GameState::ExecutiveAction { president, .. } => Some(self.players[president].id),
            GameState::Waiting | GameState::GameOver(_) => None,
        }
    }

    /// The chancellor of the government currently in session.
    pub fn chancellor(&self) -> Option<PlayerId> {
        match self.state {
            GameState::LegislativeSession { chancellor, .. } => Some(self.players[chancellor].id),
            _ => None,
        }
    }

    /// The player nominated in the election under way.
    pub fn nominee(&self) -> Option<PlayerId> {
        match self.state {
            GameState::Election { nominee, .. } => Some(self.players[nominee].id),
            _ => None,
        }
    }

    /// The last elected government, as `(president, chancellor)`.
    pub fn last_government(&self) -> Option<(PlayerId, PlayerId)> {
        self.last_government
            .map(|g| (self.players[g.president].id, self.players[g.chancellor].id))
    }

    /// The player who will be president in the next round, barring a special election.
    pub fn next_president(&self) -> Option<PlayerId> {
        if self.players.is_empty() {
            return None;
        }
        let seat = self
            .next_president
            .unwrap_or_else(|| self.next_player(self.presidential_turn));
        Some(self.players[seat].id)
    }

    pub fn liberal_cards(&self) -> usize {
        self.board.liberal_cards
    }

    pub fn fascist_cards(&self) -> usize {
        self.board.fascist_cards
    }

    pub fn veto_unlocked(&self) -> bool {
        self.board.veto_unlocked()
    }

    /// Consecutive failed elections. Reset when an election passes and when any policy is enacted.
    pub fn election_tracker(&self) -> usize {
        self.election_tracker
    }

    pub fn draw_pile(&self) -> usize {
        self.deck.count()
    }

    pub fn discard_pile(&self) -> usize {
        self.deck.discarded()
    }

    /// The number of elections opened so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Returns true if the game is over.
    pub fn game_over(&self) -> bool {
        matches!(self.state, GameState::GameOver(_))
    }

    pub fn outcome(&self) -> Option<WinCondition> {
        match self.state {
            GameState::GameOver(condition) => Some(condition),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<Party> {
        self.outcome().map(WinCondition::winner)
    }

    /// Gets the number of seated players.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Gets the number of players in the game that are alive.
    pub fn num_players_alive(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Describes what the game is waiting for.
    pub fn prompt(&self) -> Prompt {
        use LegislativeSessionTurn::*;
        match &self.state {
            GameState::Waiting => Prompt::WaitingForPlayers {
                joined: self.members.len(),
                max_players: self.max_players,
            },
            GameState::Nomination { president } => Prompt::Nominate {
                president: self.players[*president].id,
                eligible: self.eligible_chancellors(*president).ids(self),
            },
            GameState::Election { president, nominee, votes } => Prompt::Vote {
                president: self.players[*president].id,
                nominee: self.players[*nominee].id,
                round: self.round,
                pending: self
                    .players
                    .iter()
                    .enumerate()
                    .filter(|(i, p)| p.alive && !votes.has_cast(*i))
                    .map(|(_, p)| p.id)
                    .collect(),
            },
            GameState::LegislativeSession { president, chancellor, turn } => match turn {
                President { .. } => Prompt::PresidentDiscard {
                    president: self.players[*president].id,
                },
                Chancellor { veto, .. } => Prompt::ChancellorDiscard {
                    chancellor: self.players[*chancellor].id,
                    can_veto: *veto == VetoStatus::CanVeto,
                },
                VetoRequested { .. } => Prompt::VetoDecision {
                    president: self.players[*president].id,
                },
            },
            GameState::ExecutiveAction { president, power } => {
                let president_id = self.players[*president].id;
                match power {
                    ExecutivePower::InvestigateLoyalty => Prompt::Investigate {
                        president: president_id,
                        eligible: self.power_targets(*president, *power).ids(self),
                    },
                    ExecutivePower::SpecialElection => Prompt::ChooseNextPresident {
                        president: president_id,
                        eligible: self.power_targets(*president, *power).ids(self),
                    },
                    ExecutivePower::PolicyPeek => Prompt::PolicyPeek { president: president_id },
                    ExecutivePower::Execution => Prompt::Execute {
                        president: president_id,
                        eligible: self.power_targets(*president, *power).ids(self),
                    },
                }
            }
            GameState::GameOver(condition) => Prompt::Restart {
                winner: condition.winner(),
            },
        }
    }

    /// Opens the nomination for the next president.
    fn start_round(&mut self) {
        let president = match self.next_president.take() {
            Some(seat) => seat,
            None => {
                self.presidential_turn = self.next_player(self.presidential_turn);
                self.presidential_turn
            }
        };
        log::debug!("game {}: seat {} is president", self.id, president);
        self.state = GameState::Nomination { president };
        self.notify(Event::NominationStarted {
            president: self.players[president].id,
        });
    }

    /// Places a policy on the board and moves on to whatever it unlocks.
    fn enact(&mut self, card: Policy, forced: bool, president: usize) {
        self.board.play_card(card);
        self.election_tracker = 0;
        self.deck.check_shuffle(&mut self.rng);
        log::debug!("game {}: {} policy enacted (forced: {})", self.id, card, forced);

        self.notify(Event::PolicyEnacted { policy: card, forced });
        self.notify_board();
        if card == Party::Fascist && self.board.fascist_cards == 5 {
            self.notify(Event::VetoUnlocked);
        }

        if self.check_game_over(None) {
            return;
        }

        let power = match card {
            Party::Fascist => self.powers.resolve(self.board.fascist_cards),
            Party::Liberal => None,
        };
        match power {
            Some(power) => self.start_executive_action(president, power),
            None => self.start_round(),
        }
    }

    /// Ends the game if any win condition holds, checking them in priority order.
    /// `chancellor` is the seat just elected chancellor, if any.
    fn check_game_over(&mut self, chancellor: Option<usize>) -> bool {
        let hitler_dead = self.players.iter().any(|p| p.role == Role::Hitler && !p.alive);
        let hitler_elected = chancellor
            .is_some_and(|seat| self.board.hitler_zone() && self.players[seat].role == Role::Hitler);

        let condition = if hitler_dead {
            WinCondition::HitlerExecuted
        } else if let Some(Party::Liberal) = self.board.check_tracks() {
            WinCondition::LiberalPolicyTrack
        } else if hitler_elected {
            WinCondition::HitlerChancellor
        } else if let Some(Party::Fascist) = self.board.check_tracks() {
            WinCondition::FascistPolicyTrack
        } else if !self.party_alive(Party::Liberal) {
            WinCondition::LiberalsEliminated
        } else if !self.party_alive(Party::Fascist) {
            WinCondition::FascistsEliminated
        } else {
            return false;
        };

        log::info!("game {} over: {:?}", self.id, condition);
        self.state = GameState::GameOver(condition);
        self.notify(Event::GameOver {
            winner: condition.winner(),
            condition,
            roles: self
                .players
                .iter()
                .map(|p| KnownRole { player: p.id, role: p.role })
                .collect(),
        });
        true
    }

    fn party_alive(&self, party: Party) -> bool {
        self.players.iter().any(|p| p.alive && p.party() == party)
    }

    /// Finds the next alive player.
    fn next_player(&self, seat: usize) -> usize {
        (seat + 1..self.num_players())
            .chain(0..=seat)
            .find(|idx| self.players[*idx].alive)
            .unwrap_or(seat)
    }

    /// Finds the seat of a player.
    fn seat_of(&self, player: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == player)
    }

    /// Resolves the seat of a living player who is trying to act.
    fn actor(&self, player: PlayerId) -> Result<usize, GameError> {
        self.seat_of(player)
            .filter(|seat| self.players[*seat].alive)
            .ok_or(GameError::InvalidActor)
    }

    fn notify(&mut self, event: Event) {
        self.pending.push(Notice { audience: Audience::Public, event });
    }

    fn tell(&mut self, seat: usize, event: Event) {
        let audience = Audience::Player(self.players[seat].id);
        self.pending.push(Notice { audience, event });
    }

    fn notify_board(&mut self) {
        self.notify(Event::BoardUpdated {
            liberal_cards: self.board.liberal_cards,
            fascist_cards: self.board.fascist_cards,
            election_tracker: self.election_tracker,
            draw_pile: self.deck.count(),
        });
    }

    /// Collects the notices produced so far together with the next prompt.
    fn flush(&mut self) -> Outcome {
        Outcome {
            notices: std::mem::take(&mut self.pending),
            prompt: self.prompt(),
        }
    }
}
