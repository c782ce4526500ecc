//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`crate::types::PlayerKey`] and arbitrates
//! them through the turn controller: camera keys stay local, movement and quit
//! keys end a pending turn with exactly one command for the server.

pub mod map;
pub mod source;
pub mod turn;

pub use orogue_types as types;

pub use map::map_key;
pub use source::{KeySource, ScriptedKeys, TerminalKeys};
pub use turn::{TurnController, TurnEffect, TurnState};
