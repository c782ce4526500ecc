//! Session-level error type.
//!
//! Every variant is fatal: the session ends, the terminal is restored and the
//! process exits. Nothing is retried.

use std::io;

use thiserror::Error;

use crate::core::TileError;
use crate::protocol::{ApplyError, HandshakeError, ProtocolError, TransportError};
use crate::term::RenderError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The opening `parameters` exchange failed.
    #[error("handshake failed: {0}")]
    Handshake(#[from] HandshakeError),

    /// Malformed or unexpected message, including a closed connection.
    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    /// The server used a symbol this client cannot draw.
    #[error("{0}")]
    UnknownSymbol(#[from] TileError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<ApplyError> for ClientError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::Protocol(err) => ClientError::Protocol(err),
            ApplyError::UnknownSymbol(err) => ClientError::UnknownSymbol(err),
        }
    }
}

impl From<RenderError> for ClientError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Io(err) => ClientError::Io(err),
            RenderError::UnknownSymbol(err) => ClientError::UnknownSymbol(err),
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Closed => ClientError::Protocol(ProtocolError::Closed),
            TransportError::Io(err) => ClientError::Io(err),
        }
    }
}
