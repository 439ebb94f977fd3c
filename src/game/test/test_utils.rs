//! Test utilities and helper functions for game testing

use crate::game::deck::Deck;
use crate::game::player::{Player, PlayerId, Role};
use crate::game::{Game, GameId, GameOptions, GameState, Outcome, Party, Policy, SessionId};
use std::iter::repeat;

use Role::*;

/// The player sitting in the given seat of a rigged game.
pub fn pid(seat: usize) -> PlayerId {
    PlayerId(seat as u64 + 1)
}

/// Creates a started game where player `n` joined `n`th.
pub fn create_test_game(num_players: usize, opts: GameOptions, seed: u64) -> Game {
    let mut game = Game::new(GameId(1), SessionId(99), num_players, PlayerId(1), opts, seed).unwrap();
    for i in 2..=num_players as u64 {
        game.join(PlayerId(i)).unwrap();
    }
    game.start_game().unwrap();
    game
}

/// Creates a started game with the given roles in seat order. Seat `i` is `pid(i)`, and
/// seat 0 is about to nominate.
pub fn rigged_game(roles: &[Role], opts: GameOptions) -> Game {
    let mut game = create_test_game(roles.len(), opts, 42);
    game.players = roles
        .iter()
        .enumerate()
        .map(|(seat, role)| Player::new(pid(seat), *role))
        .collect();
    game.presidential_turn = 0;
    game.state = GameState::Nomination { president: 0 };
    game.pending.clear();
    game
}

/// The 5 player table: three liberals, a fascist in seat 3 and Hitler in seat 4.
pub fn five_player_game() -> Game {
    rigged_game(&[Liberal, Liberal, Liberal, Fascist, Hitler], GameOptions::default())
}

pub fn seven_player_game() -> Game {
    rigged_game(
        &[Liberal, Liberal, Liberal, Liberal, Fascist, Fascist, Hitler],
        GameOptions::default(),
    )
}

/// Puts the given cards on top of the draw pile, with a plain remainder underneath.
pub fn stack_deck(game: &mut Game, top: &[Policy]) {
    let cards: Vec<Policy> = top
        .iter()
        .copied()
        .chain(repeat(Party::Liberal).take(3))
        .chain(repeat(Party::Fascist).take(5))
        .collect();
    game.deck = Deck::stacked(&cards, &[]);
}

/// The seat of the current president.
pub fn president_seat(game: &Game) -> usize {
    let president = game.president().unwrap();
    game.seat_of(president).unwrap()
}

/// Someone the current president may nominate.
pub fn any_nominee(game: &Game) -> PlayerId {
    let president = president_seat(game);
    game.eligible_chancellors(president).ids(game)[0]
}

/// Every living player votes the same way; returns the outcome of the last vote.
pub fn everyone_votes(game: &mut Game, vote: bool) -> Outcome {
    let voters: Vec<PlayerId> = game.players().collect();
    let mut last = None;
    for voter in voters {
        last = Some(game.vote(voter, vote).unwrap());
    }
    last.unwrap()
}

/// Nominates the given player and has everyone vote yes.
pub fn elect(game: &mut Game, chancellor: PlayerId) -> Outcome {
    let president = game.president().unwrap();
    game.nominate(president, chancellor).unwrap();
    everyone_votes(game, true)
}

/// Nominates someone and has everyone vote no.
pub fn fail_election(game: &mut Game) -> Outcome {
    let president = game.president().unwrap();
    let nominee = any_nominee(game);
    game.nominate(president, nominee).unwrap();
    everyone_votes(game, false)
}

/// Elects a government and has it enact a policy of the given party.
pub fn pass_policy(game: &mut Game, policy: Policy) -> Outcome {
    stack_deck(game, &[policy, policy, policy]);
    let chancellor = any_nominee(game);
    let president = game.president().unwrap();
    elect(game, chancellor);
    game.discard_policy(president, policy).unwrap();
    game.discard_policy(chancellor, policy).unwrap()
}

/// Sets the board without going through the legislative session.
pub fn set_board(game: &mut Game, liberal: usize, fascist: usize) {
    game.board.liberal_cards = liberal;
    game.board.fascist_cards = fascist;
    for count in 1..=fascist {
        game.powers.resolve(count);
    }
}
