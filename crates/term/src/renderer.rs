//! TerminalRenderer: draws world cells through the camera.
//!
//! Every draw call encodes crossterm commands into a reusable buffer and then
//! writes it to the sink in one go. The renderer keeps no screen state of its
//! own beyond that buffer: what to draw is decided by the view.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};
use thiserror::Error;

use crate::core::{Tile, TileError, TileTable, ViewState};
use crate::types::{Redraw, Rgb};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    UnknownSymbol(#[from] TileError),
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Clear the screen and hide the cursor.
    pub fn enter(&mut self) -> Result<(), RenderError> {
        self.buf.clear();
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.buf.queue(cursor::MoveTo(0, 0))?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore colors and cursor, leaving it below the camera.
    pub fn exit(&mut self, view: &ViewState) -> Result<(), RenderError> {
        self.buf.clear();
        self.buf.queue(SetForegroundColor(Color::Reset))?;
        self.buf.queue(SetBackgroundColor(Color::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(cursor::MoveTo(0, status_row(view).saturating_add(1)))?;
        self.flush_buf()
    }

    pub fn draw(&mut self, redraw: Redraw, view: &ViewState, tiles: &TileTable) -> Result<(), RenderError> {
        match redraw {
            Redraw::Nothing => Ok(()),
            Redraw::Cell { x, y } => self.draw_cell(view, tiles, x, y),
            Redraw::Camera => self.draw_camera(view, tiles),
        }
    }

    /// Draw world cell `(x, y)` if the camera shows it.
    pub fn draw_cell(&mut self, view: &ViewState, tiles: &TileTable, x: u32, y: u32) -> Result<(), RenderError> {
        self.buf.clear();
        encode_cell_into(view, tiles, x, y, &mut self.buf)?;
        self.flush_buf()
    }

    /// Draw every cell of the camera rectangle.
    pub fn draw_camera(&mut self, view: &ViewState, tiles: &TileTable) -> Result<(), RenderError> {
        self.buf.clear();
        encode_camera_into(view, tiles, &mut self.buf)?;
        self.flush_buf()
    }

    /// Write a status line just below the camera.
    pub fn draw_status(&mut self, view: &ViewState, text: &str) -> Result<(), RenderError> {
        self.buf.clear();
        self.buf.queue(cursor::MoveTo(0, status_row(view)))?;
        self.buf.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        self.buf.queue(Print(text))?;
        self.flush_buf()
    }

    pub fn clear_status(&mut self, view: &ViewState) -> Result<(), RenderError> {
        self.buf.clear();
        self.buf.queue(cursor::MoveTo(0, status_row(view)))?;
        self.buf.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<(), RenderError> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode one cell redraw into `out`.
///
/// Cells outside the camera produce nothing. Camera positions past the world
/// edge are drawn blank.
pub fn encode_cell_into(
    view: &ViewState,
    tiles: &TileTable,
    x: u32,
    y: u32,
    out: &mut Vec<u8>,
) -> Result<(), RenderError> {
    let Some((sx, sy)) = view.camera.to_screen(x, y) else {
        return Ok(());
    };
    let blank = Tile::blank();
    let tile = match view.cell(x, y) {
        Some(cell) => tiles.tile_for(cell)?,
        None => &blank,
    };

    out.queue(cursor::MoveTo(to_u16(sx), to_u16(sy)))?;
    if let Some(fg) = tile.style.fg {
        out.queue(SetForegroundColor(rgb_to_color(fg)))?;
    }
    if let Some(bg) = tile.style.bg {
        out.queue(SetBackgroundColor(rgb_to_color(bg)))?;
    }
    out.queue(Print(tile.glyph))?;
    out.queue(SetForegroundColor(Color::Reset))?;
    out.queue(SetBackgroundColor(Color::Reset))?;
    Ok(())
}

/// Encode a full camera redraw into `out`, row by row.
pub fn encode_camera_into(view: &ViewState, tiles: &TileTable, out: &mut Vec<u8>) -> Result<(), RenderError> {
    let cam = &view.camera;
    for dy in 0..cam.height() {
        for dx in 0..cam.width() {
            encode_cell_into(view, tiles, cam.x() + dx, cam.y() + dy, out)?;
        }
    }
    Ok(())
}

fn status_row(view: &ViewState) -> u16 {
    to_u16(view.camera.height().saturating_add(1))
}

fn to_u16(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Pan};

    fn view() -> ViewState {
        ViewState::new(10, 10, 4, 3).unwrap()
    }

    fn rendered(r: &TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8_lossy(r.get_ref()).into_owned()
    }

    #[test]
    fn draws_cell_at_camera_relative_position() {
        let mut view = view();
        view.world.set(3, 2, Cell::seen('0'));
        let tiles = TileTable::builtin();

        let mut r = TerminalRenderer::new(Vec::new());
        r.draw_cell(&view, &tiles, 3, 2).unwrap();
        let out = rendered(&r);

        // MoveTo is 1-based on the wire: column 4, row 3.
        assert!(out.starts_with("\x1b[3;4H"));
        assert!(out.contains("38;2;0;0;150m~"));
        assert!(out.ends_with("\x1b[39m\x1b[49m"));
    }

    #[test]
    fn off_camera_cell_writes_nothing() {
        let view = view();
        let tiles = TileTable::builtin();
        let mut r = TerminalRenderer::new(Vec::new());
        r.draw_cell(&view, &tiles, 8, 8).unwrap();
        assert!(r.get_ref().is_empty());
    }

    #[test]
    fn unknown_symbol_fails() {
        let mut view = view();
        view.world.set(0, 0, Cell::seen('?'));
        let tiles = TileTable::builtin();
        let mut r = TerminalRenderer::new(Vec::new());
        assert!(matches!(
            r.draw_cell(&view, &tiles, 0, 0),
            Err(RenderError::UnknownSymbol(TileError::UnknownSymbol { symbol: '?', .. }))
        ));
    }

    #[test]
    fn camera_redraw_touches_every_camera_cell() {
        let mut view = view();
        view.camera.pan(Pan::Right);
        let tiles = TileTable::builtin();

        let mut out = Vec::new();
        encode_camera_into(&view, &tiles, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches('H').count(), 4 * 3);
        assert!(text.starts_with("\x1b[1;1H"));
    }

    #[test]
    fn camera_past_world_edge_draws_blank() {
        let view = ViewState::new(2, 2, 4, 3).unwrap();
        let tiles = TileTable::builtin();
        let mut out = Vec::new();
        encode_cell_into(&view, &tiles, 3, 2, &mut out).unwrap();
        assert_eq!(String::from_utf8_lossy(&out), "\x1b[3;4H \x1b[39m\x1b[49m");
    }

    #[test]
    fn status_line_sits_below_camera() {
        let view = view();
        let mut r = TerminalRenderer::new(Vec::new());
        r.draw_status(&view, "> action?").unwrap();
        let out = rendered(&r);
        // Camera height 3 => status row index 4 => wire row 5.
        assert!(out.starts_with("\x1b[5;1H"));
        assert!(out.ends_with("> action?"));
    }
}
