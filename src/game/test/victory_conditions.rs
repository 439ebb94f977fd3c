//! Tests for the ways a game can end

use super::test_utils::*;
use crate::error::GameError;
use crate::game::outcome::Event;
use crate::game::player::Role;
use crate::game::Party::{Fascist, Liberal};
use crate::game::{GameOptions, Phase, Prompt, WinCondition};

#[test]
fn fifth_liberal_policy_wins() {
    let mut game = five_player_game();
    set_board(&mut game, 4, 2);
    let outcome = pass_policy(&mut game, Liberal);
    assert_eq!(game.outcome(), Some(WinCondition::LiberalPolicyTrack));
    assert_eq!(outcome.prompt, Prompt::Restart { winner: Liberal });

    let roles = outcome
        .public()
        .find_map(|e| match e {
            Event::GameOver { winner, roles, .. } => Some((*winner, roles.clone())),
            _ => None,
        })
        .unwrap();
    assert_eq!(roles.0, Liberal);
    assert_eq!(roles.1.len(), 5);
    assert_eq!(roles.1[4].role, Role::Hitler);
}

#[test]
fn sixth_fascist_policy_wins() {
    let mut game = seven_player_game();
    set_board(&mut game, 2, 5);
    pass_policy(&mut game, Fascist);
    assert_eq!(game.outcome(), Some(WinCondition::FascistPolicyTrack));
    assert_eq!(game.winner(), Some(Fascist));
    assert_eq!(game.fascist_cards(), 6);
}

#[test]
fn forced_policy_can_end_the_game() {
    let mut game = five_player_game();
    set_board(&mut game, 4, 0);
    stack_deck(&mut game, &[Liberal]);
    fail_election(&mut game);
    fail_election(&mut game);
    fail_election(&mut game);
    assert_eq!(game.outcome(), Some(WinCondition::LiberalPolicyTrack));
}

#[test]
fn no_liberals_left_is_a_fascist_win() {
    let mut game = rigged_game(&[Role::Fascist, Role::Liberal, Role::Liberal, Role::Liberal, Role::Hitler], GameOptions::default());
    game.players[1].alive = false;
    game.players[2].alive = false;
    set_board(&mut game, 0, 4);
    pass_policy(&mut game, Fascist);
    assert_eq!(game.phase(), Phase::Execution);

    game.execute_player(pid(0), pid(3)).unwrap();
    assert_eq!(game.outcome(), Some(WinCondition::LiberalsEliminated));
    assert_eq!(game.winner(), Some(Fascist));
}

#[test]
fn everything_is_refused_once_over() {
    let mut game = five_player_game();
    set_board(&mut game, 0, 3);
    elect(&mut game, pid(4));
    assert!(game.game_over());
    assert_eq!(game.president(), None);
    assert_eq!(game.nominate(pid(0), pid(1)).unwrap_err(), GameError::InvalidState);
    assert_eq!(game.vote(pid(1), true).unwrap_err(), GameError::InvalidState);
    assert_eq!(game.discard_policy(pid(0), Liberal).unwrap_err(), GameError::InvalidState);
    assert_eq!(game.peek_policies(pid(0)).unwrap_err(), GameError::InvalidState);
    assert_eq!(game.close_election(game.round()).unwrap_err(), GameError::InvalidState);
}

#[test]
fn roles_are_revealed_at_the_end() {
    let mut game = five_player_game();
    assert_eq!(game.visible_role(pid(0), pid(4)), Ok(None));
    set_board(&mut game, 0, 3);
    elect(&mut game, pid(4));
    assert_eq!(game.visible_role(pid(0), pid(4)), Ok(Some(Role::Hitler)));
    assert_eq!(game.visible_role(pid(2), pid(3)), Ok(Some(Role::Fascist)));
}
