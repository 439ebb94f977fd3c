//! Randomised play-throughs checking that the rules hold whatever the players choose

use super::test_utils::*;
use crate::game::deck::{FASCIST_POLICIES, LIBERAL_POLICIES};
use crate::game::{Game, GameOptions, GameState, LegislativeSessionTurn, Phase, Prompt, RoleDistribution};
use proptest::prelude::*;

/// Makes one legal move chosen by `choice`. Returns false once the game is over.
fn step(game: &mut Game, choice: u8) -> bool {
    let pick = choice as usize;
    match game.prompt() {
        Prompt::Nominate { president, eligible } => {
            let nominee = eligible[pick % eligible.len()];
            game.nominate(president, nominee).unwrap();
        }
        Prompt::Vote { pending, .. } => {
            for (i, voter) in pending.into_iter().enumerate() {
                game.vote(voter, (choice >> (i % 8)) & 1 == 1).unwrap();
            }
        }
        Prompt::PresidentDiscard { president } => {
            let GameState::LegislativeSession {
                turn: LegislativeSessionTurn::President { cards },
                ..
            } = game.state
            else {
                panic!("expected the president's turn");
            };
            game.discard_policy(president, cards[pick % 3]).unwrap();
        }
        Prompt::ChancellorDiscard { chancellor, can_veto } => {
            if can_veto && pick % 4 == 0 {
                game.request_veto(chancellor).unwrap();
                return true;
            }
            let GameState::LegislativeSession {
                turn: LegislativeSessionTurn::Chancellor { cards, .. },
                ..
            } = game.state
            else {
                panic!("expected the chancellor's turn");
            };
            game.discard_policy(chancellor, cards[pick % 2]).unwrap();
        }
        Prompt::VetoDecision { president } => {
            if pick % 2 == 0 {
                game.accept_veto(president).unwrap();
            } else {
                game.decline_veto(president).unwrap();
            }
        }
        Prompt::Investigate { president, eligible } => {
            game.investigate(president, eligible[pick % eligible.len()]).unwrap();
        }
        Prompt::ChooseNextPresident { president, eligible } => {
            game.choose_special_election_president(president, eligible[pick % eligible.len()])
                .unwrap();
        }
        Prompt::PolicyPeek { president } => {
            game.peek_policies(president).unwrap();
        }
        Prompt::Execute { president, eligible } => {
            game.execute_player(president, eligible[pick % eligible.len()]).unwrap();
        }
        Prompt::Restart { .. } => return false,
        Prompt::WaitingForPlayers { .. } => panic!("game never started"),
    }
    true
}

fn check_invariants(game: &Game) {
    assert!(game.liberal_cards() <= 5);
    assert!(game.fascist_cards() <= 6);
    assert!(game.election_tracker() < 3);
    assert!(game.num_players_alive() >= 3);

    if game.phase() == Phase::Nomination {
        let on_board = game.liberal_cards() + game.fascist_cards();
        let total = game.draw_pile() + game.discard_pile() + on_board;
        assert_eq!(total, LIBERAL_POLICIES + FASCIST_POLICIES);
        assert!(game.draw_pile() >= 3);
    }

    if let Prompt::Nominate { president, eligible } = game.prompt() {
        assert!(!eligible.is_empty());
        assert!(!eligible.contains(&president));
        if let Some((last_president, chancellor)) = game.last_government() {
            assert!(!eligible.contains(&chancellor));
            // The last president is only let back in when nobody else could be nominated
            if eligible.contains(&last_president) {
                assert_eq!(eligible, vec![last_president]);
            }
        }
        let alive: Vec<_> = game.players().collect();
        assert!(eligible.iter().all(|p| alive.contains(p)));
    }
}

proptest! {
    #[test]
    fn random_games_keep_the_rules(
        seed in any::<u64>(),
        num_players in 5usize..=10,
        choices in prop::collection::vec(any::<u8>(), 400),
    ) {
        let mut game = create_test_game(num_players, GameOptions::default(), seed);
        for choice in choices {
            check_invariants(&game);
            let before = (game.liberal_cards(), game.fascist_cards());
            if !step(&mut game, choice) {
                break;
            }
            prop_assert!(game.liberal_cards() >= before.0);
            prop_assert!(game.fascist_cards() >= before.1);
            prop_assert!(game.liberal_cards() + game.fascist_cards() <= before.0 + before.1 + 1);
        }
    }

    #[test]
    fn dealt_roles_match_the_table(seed in any::<u64>(), num_players in 5usize..=10) {
        let game = create_test_game(num_players, GameOptions::default(), seed);
        let dist = RoleDistribution::new(num_players).unwrap();
        let roles: Vec<_> = game
            .players()
            .map(|p| game.player_view(p).unwrap().role)
            .collect();
        prop_assert_eq!(roles.len(), num_players);
        prop_assert_eq!(roles.iter().filter(|r| **r == crate::game::Role::Liberal).count(), dist.liberals);
        prop_assert_eq!(roles.iter().filter(|r| **r == crate::game::Role::Fascist).count(), dist.fascists);
        prop_assert_eq!(roles.iter().filter(|r| **r == crate::game::Role::Hitler).count(), 1);
    }
}
