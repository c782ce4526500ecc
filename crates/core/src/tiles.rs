//! Tile table: `(visible, symbol)` to rendering descriptor.
//!
//! Symbols are always registered with both a visible and a hidden variant, so
//! any symbol the table knows can be drawn whether or not it is in sight.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{Cell, Rgb};

/// Foreground for out-of-sight terrain.
const STALE: Rgb = Rgb::new(50, 50, 50);

/// Colors applied before the glyph. `None` keeps the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TileStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

impl TileStyle {
    pub const PLAIN: Self = Self { fg: None, bg: None };

    pub const fn fg(rgb: Rgb) -> Self {
        Self {
            fg: Some(rgb),
            bg: None,
        }
    }

    pub const fn bg(rgb: Rgb) -> Self {
        Self {
            fg: None,
            bg: Some(rgb),
        }
    }
}

/// What gets written to the terminal for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub style: TileStyle,
    pub glyph: &'static str,
}

impl Tile {
    pub const fn new(style: TileStyle, glyph: &'static str) -> Self {
        Self { style, glyph }
    }

    pub const fn blank() -> Self {
        Self::new(TileStyle::PLAIN, " ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("unknown tile symbol {symbol:?} (visible: {visible})")]
    UnknownSymbol { visible: bool, symbol: char },

    #[error("tile symbol {0:?} is already registered")]
    Duplicate(char),
}

const BUILTIN: [(char, Tile, Tile); 13] = [
    ('N', Tile::blank(), Tile::blank()),
    ('X', Tile::blank(), Tile::blank()),
    (
        '0',
        Tile::new(TileStyle::fg(Rgb::new(0, 0, 150)), "~"),
        Tile::new(TileStyle::fg(STALE), "~"),
    ),
    (
        '1',
        Tile::new(TileStyle::fg(Rgb::new(0, 150, 0)), "♣"),
        Tile::new(TileStyle::fg(STALE), "♣"),
    ),
    (
        '2',
        Tile::new(TileStyle::PLAIN, "."),
        Tile::new(TileStyle::fg(STALE), "."),
    ),
    (
        '3',
        Tile::new(TileStyle::PLAIN, "^"),
        Tile::new(TileStyle::fg(STALE), "^"),
    ),
    (
        '4',
        Tile::new(TileStyle::bg(Rgb::new(75, 75, 75)), "%"),
        Tile::new(TileStyle::fg(STALE), "%"),
    ),
    (
        '5',
        Tile::new(TileStyle::PLAIN, "."),
        Tile::new(TileStyle::fg(STALE), "."),
    ),
    (
        '6',
        Tile::new(TileStyle::bg(Rgb::new(75, 0, 0)), "#"),
        Tile::new(TileStyle::fg(STALE), "#"),
    ),
    (
        '7',
        Tile::new(TileStyle::fg(Rgb::new(75, 0, 0)), "+"),
        Tile::new(TileStyle::fg(STALE), "+"),
    ),
    (
        '@',
        Tile::new(TileStyle::fg(Rgb::new(0, 0, 200)), "@"),
        Tile::new(TileStyle::fg(STALE), "@"),
    ),
    // Characters and food vanish from view once out of sight.
    (
        'h',
        Tile::new(TileStyle::fg(Rgb::new(200, 200, 0)), "😈"),
        Tile::blank(),
    ),
    (
        'f',
        Tile::new(TileStyle::fg(Rgb::new(200, 200, 0)), "🍕"),
        Tile::blank(),
    ),
];

/// Registry of every symbol the client knows how to draw.
#[derive(Debug, Clone, Default)]
pub struct TileTable {
    tiles: HashMap<(bool, char), Tile>,
}

impl TileTable {
    /// An empty table. Most callers want [`TileTable::builtin`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile set spoken by the game server.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (symbol, visible, hidden) in BUILTIN {
            table.insert(symbol, visible, hidden);
        }
        table
    }

    /// Register both visibility variants of `symbol`.
    pub fn register(&mut self, symbol: char, visible: Tile, hidden: Tile) -> Result<(), TileError> {
        if self.knows(symbol) {
            return Err(TileError::Duplicate(symbol));
        }
        self.insert(symbol, visible, hidden);
        Ok(())
    }

    fn insert(&mut self, symbol: char, visible: Tile, hidden: Tile) {
        self.tiles.insert((true, symbol), visible);
        self.tiles.insert((false, symbol), hidden);
    }

    /// Whether `symbol` may be stored in the world model.
    pub fn knows(&self, symbol: char) -> bool {
        self.tiles.contains_key(&(true, symbol))
    }

    pub fn lookup(&self, visible: bool, symbol: char) -> Result<&Tile, TileError> {
        self.tiles
            .get(&(visible, symbol))
            .ok_or(TileError::UnknownSymbol { visible, symbol })
    }

    pub fn tile_for(&self, cell: Cell) -> Result<&Tile, TileError> {
        self.lookup(cell.visible, cell.symbol)
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
