//! A line-based stand-in for a chat platform. Each input line is `<player> <command> [arg]`;
//! every resulting notice and prompt is printed as one JSON object per line.

use anyhow::{anyhow, bail, Context};
use hitler_engine::error::GameError;
use hitler_engine::game::{Event, Game, GameId, Outcome, PlayerId, Policy, Prompt, SessionId};
use hitler_engine::registry::GameRegistry;
use serde_json::{json, Value};
use std::time::Duration;

pub struct Console {
    registry: &'static GameRegistry,
    vote_timeout: Option<Duration>,
}

/// A command typed by a player.
#[derive(Debug, PartialEq, Eq)]
enum Request {
    Create { session: SessionId, max_players: usize },
    Join { game_id: GameId },
    Leave,
    Stop { game_id: GameId },
    Games,
    WhoAmI,
    Nominate { target: PlayerId },
    Vote { vote: bool },
    Unvote,
    Discard { card: Policy },
    Veto,
    AcceptVeto,
    DeclineVeto,
    Investigate { target: PlayerId },
    President { target: PlayerId },
    Peek,
    Execute { target: PlayerId },
    Restart,
}

fn parse_request(line: &str) -> anyhow::Result<(PlayerId, Request)> {
    let mut words = line.split_whitespace();
    let player = words.next().ok_or_else(|| anyhow!("empty line"))?;
    let player = PlayerId(player.parse().context("player id must be a number")?);
    let command = words.next().ok_or_else(|| anyhow!("missing command"))?;
    let mut arg = || words.next().ok_or_else(|| anyhow!("{command} needs an argument"));

    let request = match command {
        "create" => Request::Create {
            session: SessionId(arg()?.parse()?),
            max_players: arg()?.parse()?,
        },
        "join" => Request::Join { game_id: GameId(arg()?.parse()?) },
        "leave" => Request::Leave,
        "stop" => Request::Stop { game_id: GameId(arg()?.parse()?) },
        "games" => Request::Games,
        "whoami" => Request::WhoAmI,
        "nominate" => Request::Nominate { target: PlayerId(arg()?.parse()?) },
        "ja" | "yes" => Request::Vote { vote: true },
        "nein" | "no" => Request::Vote { vote: false },
        "unvote" => Request::Unvote,
        "discard" => Request::Discard { card: arg()?.parse()? },
        "veto" => Request::Veto,
        "accept" => Request::AcceptVeto,
        "decline" => Request::DeclineVeto,
        "investigate" => Request::Investigate { target: PlayerId(arg()?.parse()?) },
        "president" => Request::President { target: PlayerId(arg()?.parse()?) },
        "peek" => Request::Peek,
        "execute" => Request::Execute { target: PlayerId(arg()?.parse()?) },
        "restart" => Request::Restart,
        other => bail!("unknown command: {other}"),
    };
    Ok((player, request))
}

impl Console {
    pub fn new(registry: &'static GameRegistry, vote_timeout: Option<Duration>) -> Self {
        Self { registry, vote_timeout }
    }

    /// Handles one line of input, printing the replies.
    pub fn handle_line(&self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let (player, request) = match parse_request(line) {
            Ok(request) => request,
            Err(err) => {
                log::warn!("Invalid command received: {}", line);
                print_error(&err.to_string());
                return;
            }
        };
        match self.process_request(player, request) {
            Ok(replies) => replies.iter().for_each(|reply| println!("{reply}")),
            Err(err) => print_error(&err.to_string()),
        }
    }

    fn process_request(&self, player: PlayerId, request: Request) -> Result<Vec<Value>, GameError> {
        let registry = self.registry;
        match request {
            Request::Create { session, max_players } => {
                let game_id = registry.create(session, max_players, player)?;
                Ok(vec![json!({ "type": "created", "game": game_id })])
            }
            Request::Join { game_id } => {
                let outcome = registry.join(game_id, player)?;
                Ok(self.publish(game_id, outcome))
            }
            Request::Leave => {
                let game_id = registry.with_game(player, |game| Ok(game.id()))?;
                let outcome = registry.leave(player)?;
                Ok(self.publish(game_id, outcome))
            }
            Request::Stop { game_id } => {
                let creator = registry.get(game_id)?.lock().map(|game| game.creator()).ok();
                if creator != Some(player) {
                    return Err(GameError::InvalidActor);
                }
                registry.stop(game_id)?;
                Ok(vec![json!({ "type": "stopped", "game": game_id })])
            }
            Request::Games => Ok(vec![json!({ "type": "games", "games": registry.games() })]),
            Request::WhoAmI => {
                let view = registry.with_game(player, |game| game.player_view(player))?;
                Ok(vec![json!({ "type": "view", "view": view })])
            }
            Request::Nominate { target } => self.act(player, |game| game.nominate(player, target)),
            Request::Vote { vote } => self.act(player, |game| game.vote(player, vote)),
            Request::Unvote => self.act(player, |game| game.unvote(player)),
            Request::Discard { card } => self.act(player, |game| game.discard_policy(player, card)),
            Request::Veto => self.act(player, |game| game.request_veto(player)),
            Request::AcceptVeto => self.act(player, |game| game.accept_veto(player)),
            Request::DeclineVeto => self.act(player, |game| game.decline_veto(player)),
            Request::Investigate { target } => self.act(player, |game| game.investigate(player, target)),
            Request::President { target } => {
                self.act(player, |game| game.choose_special_election_president(player, target))
            }
            Request::Peek => self.act(player, |game| game.peek_policies(player)),
            Request::Execute { target } => self.act(player, |game| game.execute_player(player, target)),
            Request::Restart => self.act(player, |game| game.restart(player)),
        }
    }

    /// Applies an action to the player's game and publishes what happened.
    fn act<F>(&self, player: PlayerId, action: F) -> Result<Vec<Value>, GameError>
    where
        F: FnOnce(&mut Game) -> Result<Outcome, GameError>,
    {
        let (game_id, outcome) = self
            .registry
            .with_game(player, |game| Ok((game.id(), action(game)?)))?;
        Ok(self.publish(game_id, outcome))
    }

    fn publish(&self, game_id: GameId, outcome: Outcome) -> Vec<Value> {
        self.schedule_deadline(game_id, &outcome);
        format_outcome(game_id, &outcome)
    }

    /// Closes the vote after the timeout if a new election has just opened.
    fn schedule_deadline(&self, game_id: GameId, outcome: &Outcome) {
        let Some(timeout) = self.vote_timeout else {
            return;
        };
        let Prompt::Vote { round, .. } = outcome.prompt else {
            return;
        };
        if !outcome.public().any(|e| matches!(e, Event::Nominated { .. })) {
            return;
        }

        let registry = self.registry;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let Ok(handle) = registry.get(game_id) else {
                return;
            };
            let result = handle.lock().map(|mut game| game.close_election(round));
            match result {
                Ok(Ok(outcome)) => {
                    log::info!("Voting deadline reached in game {}", game_id);
                    for reply in format_outcome(game_id, &outcome) {
                        println!("{reply}");
                    }
                }
                // The election was already decided
                Ok(Err(_)) => {}
                Err(_) => log::error!("Found poisoned game: {}", game_id),
            }
        });
    }
}

fn format_outcome(game_id: GameId, outcome: &Outcome) -> Vec<Value> {
    outcome
        .notices
        .iter()
        .map(|notice| {
            json!({
                "type": "notice",
                "game": game_id,
                "audience": notice.audience,
                "event": notice.event,
            })
        })
        .chain(std::iter::once(json!({
            "type": "prompt",
            "game": game_id,
            "prompt": outcome.prompt,
        })))
        .collect()
}

fn print_error(error: &str) {
    println!("{}", json!({ "type": "error", "error": error }));
}
