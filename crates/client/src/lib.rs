//! Client session module - wires the view engine together
//!
//! Data flows in two directions:
//!
//! ```text
//! server ─► LineTransport ─► interpreter ─► ViewState ─► TerminalRenderer
//! keyboard ─► KeySource ─► TurnController ─┬─► Camera (local)
//!                                          └─► LineTransport (turn command)
//! ```
//!
//! Everything runs on one thread. The session owns the view context and
//! lends it to the interpreter, the turn controller and the renderer in turn.

pub mod config;
pub mod error;
pub mod session;

pub use orogue_core as core;
pub use orogue_input as input;
pub use orogue_protocol as protocol;
pub use orogue_term as term;
pub use orogue_types as types;

pub use config::{valid_camera_side, ClientConfig};
pub use error::ClientError;
pub use session::{EndReason, Session};
