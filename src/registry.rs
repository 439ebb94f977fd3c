use crate::error::GameError;
use crate::game::{Game, GameId, GameOptions, Outcome, Phase, PlayerId, SessionId};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::RngCore;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to a single game; the mutex serialises the events applied to it.
pub type GameHandle = Arc<Mutex<Game>>;

/// Tracks every running game, and which game each player belongs to.
pub struct GameRegistry {
    games: DashMap<GameId, Entry>,
    /// Every player who is a member of a game
    players: DashMap<PlayerId, GameId>,
    /// Held while games are created, joined, left or stopped
    lifecycle: Mutex<()>,
    opts: GameOptions,
    seed: Option<u64>,
}

#[derive(Clone)]
struct Entry {
    handle: GameHandle,
    created: DateTime<Utc>,
}

/// A summary of a running game.
#[derive(Clone, Serialize, Debug)]
pub struct GameSummary {
    pub id: GameId,
    pub session: SessionId,
    pub creator: PlayerId,
    pub players: usize,
    pub max_players: usize,
    pub phase: Phase,
    pub created: DateTime<Utc>,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new(GameOptions::default(), None)
    }
}

impl GameRegistry {
    /// Creates an empty registry. Every game it creates uses `opts`; with a `seed`, game
    /// `n` is seeded with `seed + n` so runs are reproducible.
    pub fn new(opts: GameOptions, seed: Option<u64>) -> Self {
        Self {
            games: DashMap::new(),
            players: DashMap::new(),
            lifecycle: Mutex::new(()),
            opts,
            seed,
        }
    }

    /// Creates a new game waiting for players, with the creator already seated.
    pub fn create(&self, session: SessionId, max_players: usize, creator: PlayerId) -> Result<GameId, GameError> {
        let _guard = self.lock_lifecycle();

        if self.players.contains_key(&creator) {
            return Err(GameError::AlreadyInGame);
        }

        let id = GameId(self.games.iter().map(|e| e.key().0).max().unwrap_or(0) + 1);
        let seed = match self.seed {
            Some(seed) => seed.wrapping_add(id.0),
            None => rand::thread_rng().next_u64(),
        };
        let game = Game::new(id, session, max_players, creator, self.opts, seed)?;

        self.games.insert(
            id,
            Entry {
                handle: Arc::new(Mutex::new(game)),
                created: Utc::now(),
            },
        );
        self.players.insert(creator, id);
        log::info!("created game {} for {} players", id, max_players);
        Ok(id)
    }

    /// Adds a player to a game, starting it once every seat is taken.
    pub fn join(&self, game_id: GameId, player: PlayerId) -> Result<Outcome, GameError> {
        let _guard = self.lock_lifecycle();

        if self.players.contains_key(&player) {
            return Err(GameError::AlreadyInGame);
        }
        let handle = self.get(game_id)?;
        let mut game = Self::lock(&handle)?;

        let mut outcome = game.join(player)?;
        self.players.insert(player, game_id);
        if game.is_full() {
            outcome = outcome.merge(game.start_game()?);
        }
        Ok(outcome)
    }

    /// Removes a player from a game that has not started yet.
    pub fn leave(&self, player: PlayerId) -> Result<Outcome, GameError> {
        let _guard = self.lock_lifecycle();

        let handle = self.find_by_player(player).ok_or(GameError::GameNotFound)?;
        let outcome = Self::lock(&handle)?.leave(player)?;
        self.players.remove(&player);
        Ok(outcome)
    }

    /// Deletes a game, freeing its members to join other games.
    pub fn stop(&self, game_id: GameId) -> Result<(), GameError> {
        let _guard = self.lock_lifecycle();

        if self.games.remove(&game_id).is_none() {
            return Err(GameError::GameNotFound);
        }
        self.players.retain(|_, id| *id != game_id);
        log::info!("stopped game {}", game_id);
        Ok(())
    }

    pub fn get(&self, game_id: GameId) -> Result<GameHandle, GameError> {
        self.games
            .get(&game_id)
            .map(|entry| entry.handle.clone())
            .ok_or(GameError::GameNotFound)
    }

    /// Finds the game a player belongs to.
    pub fn find_by_player(&self, player: PlayerId) -> Option<GameHandle> {
        let game_id = *self.players.get(&player)?;
        self.get(game_id).ok()
    }

    /// Applies an action to the game the player belongs to.
    pub fn with_game<F, T>(&self, player: PlayerId, action: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Game) -> Result<T, GameError>,
    {
        let handle = self.find_by_player(player).ok_or(GameError::GameNotFound)?;
        let mut game = Self::lock(&handle)?;
        let result = action(&mut game);
        if let Err(err) = &result {
            if err.is_fatal() {
                log::error!("game {} hit an internal error: {}", game.id(), err);
            }
        }
        result
    }

    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    /// Lists the running games, oldest first.
    pub fn games(&self) -> Vec<GameSummary> {
        let mut games: Vec<_> = self
            .games
            .iter()
            .filter_map(|entry| {
                let game = Self::lock(&entry.handle).ok()?;
                Some(GameSummary {
                    id: game.id(),
                    session: game.session(),
                    creator: game.creator(),
                    players: game.members().len(),
                    max_players: game.max_players(),
                    phase: game.phase(),
                    created: entry.created,
                })
            })
            .collect();
        games.sort_by_key(|g| g.id);
        games
    }

    fn lock(handle: &GameHandle) -> Result<MutexGuard<'_, Game>, GameError> {
        handle.lock().map_err(|_| {
            log::error!("found poisoned game");
            GameError::GameNotFound
        })
    }

    fn lock_lifecycle(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so a poisoned lock is still usable
        self.lifecycle.lock().unwrap_or_else(|e| e.into_inner())
    }
}
