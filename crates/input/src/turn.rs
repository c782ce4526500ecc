//! Turn controller: decides what each key does depending on the turn state.
//!
//! ```text
//!            action?             move key
//!   Idle ───────────────► AwaitingAction ───────► Idle
//!                               │
//!                               │ quit key
//!                               ▼
//!                          Terminated
//! ```
//!
//! Camera keys work in `Idle` and `AwaitingAction` and never end a turn.
//! Leaving `AwaitingAction` is the only way to produce a [`ClientCommand`], so
//! at most one command is sent per prompt.

use crate::types::{CameraCommand, ClientCommand, PlayerKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    /// Waiting for world events.
    #[default]
    Idle,
    /// The server asked for an action.
    AwaitingAction,
    /// The player quit.
    Terminated,
}

/// What the session has to do with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEffect {
    /// Local camera change; the turn goes on.
    Camera(CameraCommand),
    /// Send this command; the turn is over.
    Send(ClientCommand),
    /// Nothing happens.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct TurnController {
    state: TurnState,
}

impl TurnController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == TurnState::AwaitingAction
    }

    pub fn is_terminated(&self) -> bool {
        self.state == TurnState::Terminated
    }

    /// Enter `AwaitingAction` for a fresh prompt.
    ///
    /// Returns `false` (and changes nothing) unless the controller is idle.
    pub fn begin(&mut self) -> bool {
        if self.state != TurnState::Idle {
            return false;
        }
        self.state = TurnState::AwaitingAction;
        true
    }

    /// Route one polled key.
    pub fn handle(&mut self, key: Option<PlayerKey>) -> TurnEffect {
        match (self.state, key) {
            (TurnState::Terminated, _) | (_, None) => TurnEffect::Ignored,
            (_, Some(PlayerKey::Camera(command))) => TurnEffect::Camera(command),
            (TurnState::AwaitingAction, Some(PlayerKey::Move(direction))) => {
                self.state = TurnState::Idle;
                TurnEffect::Send(ClientCommand::Move(direction))
            }
            (TurnState::AwaitingAction, Some(PlayerKey::Quit)) => {
                self.state = TurnState::Terminated;
                TurnEffect::Send(ClientCommand::End)
            }
            // Moving or quitting only means something when a turn is pending.
            (TurnState::Idle, Some(PlayerKey::Move(_) | PlayerKey::Quit)) => TurnEffect::Ignored,
        }
    }
}
