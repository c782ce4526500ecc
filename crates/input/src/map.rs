//! Key mapping from terminal events to player keys.

use crate::types::{CameraCommand, Direction, Pan, PlayerKey};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a keystroke to its meaning.
///
/// Lowercase `w/a/s/d` move, `q` quits, uppercase `W/A/S/D` pan the camera and
/// `c` recenters it. Everything else, including chords with Ctrl or Alt, is
/// ignored.
pub fn map_key(key: KeyEvent) -> Option<PlayerKey> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Char('w') => Some(PlayerKey::Move(Direction::North)),
        KeyCode::Char('s') => Some(PlayerKey::Move(Direction::South)),
        KeyCode::Char('a') => Some(PlayerKey::Move(Direction::West)),
        KeyCode::Char('d') => Some(PlayerKey::Move(Direction::East)),

        KeyCode::Char('q') => Some(PlayerKey::Quit),

        // Camera
        KeyCode::Char('W') => Some(PlayerKey::Camera(CameraCommand::Pan(Pan::Up))),
        KeyCode::Char('S') => Some(PlayerKey::Camera(CameraCommand::Pan(Pan::Down))),
        KeyCode::Char('A') => Some(PlayerKey::Camera(CameraCommand::Pan(Pan::Left))),
        KeyCode::Char('D') => Some(PlayerKey::Camera(CameraCommand::Pan(Pan::Right))),
        KeyCode::Char('c') => Some(PlayerKey::Camera(CameraCommand::Recenter)),

        _ => None,
    }
}
