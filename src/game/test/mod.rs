//! Tests for the game engine, organised by subsystem.

#![cfg(test)]
#![allow(clippy::bool_assert_comparison)]

pub mod properties;
pub mod test_utils;
pub mod victory_conditions;
