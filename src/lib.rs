//! Game-state engine for Secret Hitler.
//!
//! [game::Game] enforces the rules of a single game and reports what happened as an
//! [game::Outcome]; [registry::GameRegistry] tracks the running games. Delivering the
//! outcomes to players is left to the caller.

pub mod config;
pub mod error;
pub mod game;
pub mod registry;
