//! Protocol interpreter: applies decoded server messages to the view.
//!
//! Redraw policy:
//! - `print` redraws its cell only if the stored value changed and the cell is
//!   inside the camera.
//! - `hide` redraws its cell whenever it is inside the camera, since the
//!   visibility flip is worth showing even for an unchanged symbol.

use thiserror::Error;

use crate::core::{TileError, TileTable, ViewState};
use crate::message::{ActionPrompt, ProtocolError, ServerMessage};
use crate::transport::{LineTransport, TransportError};
use crate::types::{Cell, Redraw, MAX_WORLD_CELLS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    UnknownSymbol(#[from] TileError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandshakeError {
    #[error("connection closed before the handshake")]
    Closed,

    #[error("handshake read failed: {0}")]
    Read(String),

    #[error("malformed handshake: {0}")]
    Malformed(#[from] ProtocolError),

    #[error("expected parameters, received {0}")]
    Unexpected(&'static str),

    #[error("world size {width}x{height} is empty")]
    EmptyWorld { width: u32, height: u32 },

    #[error("world size {width}x{height} is too large")]
    WorldTooLarge { width: u32, height: u32 },
}

/// World dimensions agreed in the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldSize {
    pub width: u32,
    pub height: u32,
}

/// What the caller must do after a message was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep reading messages after performing the redraw.
    Continue(Redraw),
    /// Hand control to the turn controller.
    Prompt(ActionPrompt),
    /// The server ended the game.
    End,
}

/// Read the `parameters` line that opens every session.
///
/// This is the only blocking read: nothing can be drawn before the world
/// bounds are known.
pub fn handshake<T: LineTransport + ?Sized>(transport: &mut T) -> Result<WorldSize, HandshakeError> {
    let line = transport.recv_line().map_err(|err| match err {
        TransportError::Closed => HandshakeError::Closed,
        TransportError::Io(err) => {
            tracing::warn!(%err, "handshake read failed");
            HandshakeError::Read(err.to_string())
        }
    })?;
    tracing::debug!(line = %line.trim_end(), "recv");

    match ServerMessage::parse(&line)? {
        ServerMessage::Parameters { width, height } if width == 0 || height == 0 => {
            Err(HandshakeError::EmptyWorld { width, height })
        }
        ServerMessage::Parameters { width, height }
            if u64::from(width) * u64::from(height) > MAX_WORLD_CELLS =>
        {
            Err(HandshakeError::WorldTooLarge { width, height })
        }
        ServerMessage::Parameters { width, height } => Ok(WorldSize { width, height }),
        other => Err(HandshakeError::Unexpected(other.name())),
    }
}

/// Decode and apply one line.
pub fn interpret(view: &mut ViewState, tiles: &TileTable, line: &str) -> Result<Step, ApplyError> {
    let msg = ServerMessage::parse(line)?;
    apply(view, tiles, msg)
}

/// Apply one decoded message to the view.
///
/// On error the world is left untouched.
pub fn apply(view: &mut ViewState, tiles: &TileTable, msg: ServerMessage) -> Result<Step, ApplyError> {
    match msg {
        ServerMessage::Print { x, y, entity } => {
            check_bounds(view, x, y)?;
            let symbol = entity.symbol();
            if !tiles.knows(symbol) {
                return Err(TileError::UnknownSymbol {
                    visible: true,
                    symbol,
                }
                .into());
            }
            let changed = view.world.set(x, y, Cell::seen(symbol)).unwrap_or(false);
            Ok(Step::Continue(cell_redraw(view, x, y, changed)))
        }
        ServerMessage::Hide { x, y } => {
            check_bounds(view, x, y)?;
            view.world.hide(x, y);
            Ok(Step::Continue(cell_redraw(view, x, y, true)))
        }
        ServerMessage::Action(prompt) => {
            view.camera.set_last_action(prompt.x, prompt.y);
            Ok(Step::Prompt(prompt))
        }
        ServerMessage::End => Ok(Step::End),
        ServerMessage::Parameters { .. } => Err(ProtocolError::RepeatedHandshake.into()),
    }
}

fn check_bounds(view: &ViewState, x: u32, y: u32) -> Result<(), ProtocolError> {
    if view.world.contains(x, y) {
        return Ok(());
    }
    Err(ProtocolError::OutOfBounds {
        x,
        y,
        width: view.world.width(),
        height: view.world.height(),
    })
}

fn cell_redraw(view: &ViewState, x: u32, y: u32, changed: bool) -> Redraw {
    if changed && view.camera.contains(x, y) {
        Redraw::Cell { x, y }
    } else {
        Redraw::Nothing
    }
}
