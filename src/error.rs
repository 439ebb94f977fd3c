use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game](crate::game::Game)
/// or the [GameRegistry](crate::registry::GameRegistry).
///
/// Every variant except [GameError::DeckUnderflow] is a user error: the game is left untouched
/// and the adapter only needs to report the failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("this player cannot perform this action")]
    InvalidActor,
    #[error("this action cannot be performed during this phase of the game")]
    InvalidState,
    #[error("this player cannot be chosen for this action")]
    InvalidTarget,
    #[error("this player has already acted")]
    AlreadyActed,
    #[error("an invalid card was chosen")]
    InvalidCard,
    #[error("the policy deck ran out of cards")]
    DeckUnderflow,
    #[error("game does not exist")]
    GameNotFound,
    #[error("no such player in this game")]
    PlayerNotFound,
    #[error("the game is already full")]
    GameFull,
    #[error("not enough players have joined the game")]
    NotEnoughPlayers,
    #[error("player is already in a game")]
    AlreadyInGame,
    #[error("a game needs between 5 and 10 players")]
    InvalidPlayerCount,
}

impl GameError {
    /// Returns true if the error indicates a broken card-count invariant rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::DeckUnderflow)
    }
}
