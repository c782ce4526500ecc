//! Client-side world model.
//!
//! A fixed `width x height` grid of [`Cell`]s sized once by the handshake.
//! Only the protocol interpreter mutates it.

use thiserror::Error;

use crate::types::{Cell, MAX_WORLD_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("world size {width}x{height} is too large")]
    TooLarge { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl World {
    /// Create a world where every cell is unexplored.
    ///
    /// Fails instead of allocating when the cell count exceeds
    /// [`MAX_WORLD_CELLS`] or the allocator refuses the grid.
    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        let too_large = WorldError::TooLarge { width, height };
        let len = u64::from(width)
            .checked_mul(u64::from(height))
            .filter(|&n| n <= MAX_WORLD_CELLS)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(too_large)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large)?;
        cells.resize(len, Cell::default());

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn idx(&self, x: u32, y: u32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Store `cell`, returning whether the stored value changed.
    ///
    /// Returns `None` when `(x, y)` is outside the world.
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) -> Option<bool> {
        let i = self.idx(x, y)?;
        let changed = self.cells[i] != cell;
        self.cells[i] = cell;
        Some(changed)
    }

    /// Mark a cell as out of sight, keeping its symbol.
    ///
    /// Returns `None` when `(x, y)` is outside the world.
    pub fn hide(&mut self, x: u32, y: u32) -> Option<Cell> {
        let i = self.idx(x, y)?;
        self.cells[i] = self.cells[i].hidden();
        Some(self.cells[i])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_is_unexplored() {
        let world = World::new(4, 3).unwrap();
        assert_eq!(world.cells().len(), 12);
        assert!(world.cells().iter().all(|c| *c == Cell::default()));
    }

    #[test]
    fn oversized_world_is_refused() {
        assert_eq!(
            World::new(u32::MAX, u32::MAX),
            Err(WorldError::TooLarge {
                width: u32::MAX,
                height: u32::MAX
            })
        );
        assert!(World::new(100_000, 100_000).is_err());
        assert!(World::new(4097, 4096).is_err());
        assert!(World::new(1024, 512).is_ok());
    }

    #[test]
    fn set_reports_change_only_once() {
        let mut world = World::new(4, 3).unwrap();
        assert_eq!(world.set(3, 2, Cell::seen('0')), Some(true));
        assert_eq!(world.set(3, 2, Cell::seen('0')), Some(false));
        assert_eq!(world.get(3, 2), Some(Cell::seen('0')));
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut world = World::new(4, 3).unwrap();
        assert_eq!(world.get(4, 0), None);
        assert_eq!(world.set(0, 3, Cell::seen('0')), None);
        assert_eq!(world.hide(9, 9), None);
    }

    #[test]
    fn hide_keeps_symbol() {
        let mut world = World::new(4, 3).unwrap();
        world.set(1, 1, Cell::seen('6'));
        assert_eq!(world.hide(1, 1), Some(Cell::new(false, '6')));
        // Hiding twice is stable.
        assert_eq!(world.hide(1, 1), Some(Cell::new(false, '6')));
    }
}
