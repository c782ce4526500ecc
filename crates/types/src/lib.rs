//! Shared types module - vocabulary used by every layer of the client
//!
//! This module defines the small data structures and constants that flow
//! between the world model, the protocol interpreter, the turn controller and
//! the renderer. Everything here is plain data with no external dependencies.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CAMERA_WIDTH` | 64 | Viewport width in cells |
//! | `CAMERA_HEIGHT` | 32 | Viewport height in cells |
//! | `DEFAULT_HOST` | `localhost` | Game server host |
//! | `DEFAULT_PORT` | 1029 | Game server port |
//! | `POLL_INTERVAL_MS` | 1 | Readiness wait per loop iteration |
//! | `UNEXPLORED_SYMBOL` | `N` | Symbol every cell starts with |
//!
//! # Examples
//!
//! ```
//! use orogue_types::{ClientCommand, Direction, Pan};
//!
//! assert_eq!(Direction::from_str("south"), Some(Direction::South));
//! assert_eq!(ClientCommand::Move(Direction::South).as_str(), "south");
//! assert_eq!(ClientCommand::End.as_str(), "end");
//! assert_eq!(Pan::Left.delta(), (-1, 0));
//! ```

/// Viewport width in cells.
pub const CAMERA_WIDTH: u32 = 64;

/// Viewport height in cells.
pub const CAMERA_HEIGHT: u32 = 32;

/// Largest viewport side accepted from configuration. Screen positions are
/// `u16` on the wire.
pub const MAX_CAMERA_SIDE: u32 = 4096;

/// Largest world (`width * height`) the client agrees to hold.
pub const MAX_WORLD_CELLS: u64 = 1 << 24;

/// Default game server host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default game server port.
pub const DEFAULT_PORT: u16 = 1029;

/// Readiness wait per loop iteration, in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 1;

/// Symbol stored in every cell before the server describes it.
pub const UNEXPLORED_SYMBOL: char = 'N';

/// Last-known state of one grid position.
///
/// `visible == false` means the cell was seen before but is currently out of
/// sight, so `symbol` may be stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub visible: bool,
    pub symbol: char,
}

impl Cell {
    pub const fn new(visible: bool, symbol: char) -> Self {
        Self { visible, symbol }
    }

    /// A cell currently observed with the given symbol.
    pub const fn seen(symbol: char) -> Self {
        Self::new(true, symbol)
    }

    /// Same symbol, flagged as out of sight.
    pub const fn hidden(self) -> Self {
        Self::new(false, self.symbol)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::seen(UNEXPLORED_SYMBOL)
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Movement direction sent to the server at the end of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Parse direction from its wire name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            "west" => Some(Direction::West),
            _ => None,
        }
    }

    /// Wire name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

/// One-cell camera nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pan {
    Up,
    Down,
    Left,
    Right,
}

impl Pan {
    /// Offset applied to the camera origin, as `(dx, dy)`.
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Pan::Up => (0, -1),
            Pan::Down => (0, 1),
            Pan::Left => (-1, 0),
            Pan::Right => (1, 0),
        }
    }
}

/// Local, non-turn-consuming camera operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraCommand {
    Pan(Pan),
    /// Center the camera on the last action prompt position.
    Recenter,
}

/// Meaning of a keystroke, independent of the turn state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKey {
    /// Turn-ending movement.
    Move(Direction),
    /// Turn-ending (and session-ending) quit.
    Quit,
    /// Camera-only key.
    Camera(CameraCommand),
}

/// Command line sent from the client to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientCommand {
    Move(Direction),
    End,
}

impl ClientCommand {
    /// Wire text, without the trailing newline.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientCommand::Move(direction) => direction.as_str(),
            ClientCommand::End => "end",
        }
    }
}

/// Screen update requested after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Redraw {
    #[default]
    Nothing,
    /// Redraw a single world cell.
    Cell { x: u32, y: u32 },
    /// Redraw the whole camera rectangle.
    Camera,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        assert_eq!(CAMERA_WIDTH, 64);
        assert_eq!(CAMERA_HEIGHT, 32);
        assert_eq!(DEFAULT_PORT, 1029);
        assert!(u64::from(MAX_CAMERA_SIDE) + 2 <= u64::from(u16::MAX));
        assert_eq!(Cell::default(), Cell::new(true, 'N'));
    }

    #[test]
    fn direction_names_round_trip() {
        for d in [Direction::North, Direction::South, Direction::East, Direction::West] {
            assert_eq!(Direction::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Direction::from_str("up"), None);
    }

    #[test]
    fn hiding_keeps_symbol() {
        let cell = Cell::seen('0').hidden();
        assert!(!cell.visible);
        assert_eq!(cell.symbol, '0');
    }
}
