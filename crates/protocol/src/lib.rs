//! Protocol module - the game server's line protocol
//!
//! The server speaks newline-terminated text. Each line is a command name
//! followed by space-separated tokens, `key=value` for parameters.
//!
//! # Message Types
//!
//! ## Server → Client
//!
//! | Message | Fields |
//! |---------|--------|
//! | `parameters` | `width=int height=int` (handshake, exactly once) |
//! | `print` | `x=int y=int terrain type=sym` |
//! | `print` | `x=int y=int food hit_point=int symbol=sym` |
//! | `print` | `x=int y=int {ally,ennemy} character_index=int hit_point=int symbol=sym` |
//! | `hide` | `x=int y=int` |
//! | `action?` | `x=int y=int character_index=int hit_point=int symbol=char` |
//! | `end` | none |
//!
//! ## Client → Server
//!
//! - `north`, `south`, `east`, `west`: end the turn with a move
//! - `end`: quit
//!
//! # Example Protocol Flow
//!
//! ```text
//! Server -> Client: parameters width=10 height=10
//! Server -> Client: print x=3 y=3 terrain type=0
//! Server -> Client: hide x=3 y=3
//! Server -> Client: action? x=3 y=3 character_index=1 hit_point=10 symbol=h
//! Client -> Server: south
//! Server -> Client: end
//! ```
//!
//! # Implementation
//!
//! - [`message`] decodes a line into a typed [`ServerMessage`]
//! - [`interpreter`] applies messages to the view and decides what to redraw
//! - [`transport`] moves lines over TCP using **tokio** tasks, or from memory
//!
//! # Testing
//!
//! Any line-oriented server works for manual testing:
//!
//! ```bash
//! nc -l 1029
//! parameters width=80 height=40
//! ```

pub mod interpreter;
pub mod message;
pub mod transport;

pub use orogue_core as core;
pub use orogue_types as types;

pub use interpreter::{apply, handshake, interpret, ApplyError, HandshakeError, Step, WorldSize};
pub use message::{ActionPrompt, Entity, ProtocolError, ServerMessage, MAX_TOKENS};
pub use transport::{LineTransport, MemoryTransport, SocketTransport, TransportError};
