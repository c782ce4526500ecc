//! Core view module - the client's model of a partially observed world
//!
//! This module holds everything the client knows about the remote game and
//! how it is framed on screen. It has **no dependencies** on terminal I/O or
//! networking, so every invariant can be unit tested:
//!
//! - **World cells** are only ever set to symbols the tile table knows
//! - **Camera origin** stays within `0..=world - camera - 1` on both axes
//! - **Redraws** are requested only when something on screen changed
//!
//! # Module Structure
//!
//! - [`tiles`]: `(visible, symbol)` to glyph and colors, validated at registration
//! - [`world`]: fixed-size grid of last-known cells, sized by the handshake
//! - [`camera`]: viewport origin, panning, recentering on the last action
//! - [`view`]: the mutable context bundling world and camera
//!
//! # Example
//!
//! ```
//! use orogue_core::{TileTable, ViewState};
//! use orogue_types::{CameraCommand, Cell, Pan, Redraw};
//!
//! let tiles = TileTable::builtin();
//! let mut view = ViewState::new(100, 60, 64, 32).unwrap();
//!
//! assert!(tiles.knows('0'));
//! view.world.set(3, 3, Cell::seen('0'));
//! assert_eq!(view.cell(3, 3), Some(Cell::seen('0')));
//!
//! assert_eq!(view.apply_camera(CameraCommand::Pan(Pan::Right)), Redraw::Camera);
//! ```

pub mod camera;
pub mod tiles;
pub mod view;
pub mod world;

pub use orogue_types as types;

pub use camera::Camera;
pub use tiles::{Tile, TileError, TileStyle, TileTable};
pub use view::ViewState;
pub use world::{World, WorldError};
