//! Terminal rendering module.
//!
//! Draws the camera window of the world straight to the terminal with ANSI
//! cursor positioning and 24-bit colors, one cell at a time. There is no
//! framebuffer: the protocol interpreter already knows which cells changed,
//! so the renderer only writes what it is told to.

pub mod guard;
pub mod renderer;

pub use orogue_core as core;
pub use orogue_types as types;

pub use guard::RawModeGuard;
pub use renderer::{encode_camera_into, encode_cell_into, RenderError, TerminalRenderer};
