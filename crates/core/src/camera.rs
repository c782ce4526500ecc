//! Camera: the sub-rectangle of the world drawn to the terminal.
//!
//! The origin is clamped to `0..=world - camera - 1` on each axis. The extra
//! row and column of margin match the game's reference client. When the world
//! is smaller than the camera the bound floors at zero and the camera stays at
//! the origin.

use crate::types::{CameraCommand, Pan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    world_width: u32,
    world_height: u32,
    last_action_x: u32,
    last_action_y: u32,
}

impl Camera {
    /// Camera at the world origin, remembering the world center as the last
    /// action position.
    pub fn new(world_width: u32, world_height: u32, width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            world_width,
            world_height,
            last_action_x: world_width / 2,
            last_action_y: world_height / 2,
        }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn last_action(&self) -> (u32, u32) {
        (self.last_action_x, self.last_action_y)
    }

    pub fn set_last_action(&mut self, x: u32, y: u32) {
        self.last_action_x = x;
        self.last_action_y = y;
    }

    /// Largest legal origin, as `(max_x, max_y)`.
    pub fn max_origin(&self) -> (u32, u32) {
        (
            self.world_width.saturating_sub(self.width.saturating_add(1)),
            self.world_height.saturating_sub(self.height.saturating_add(1)),
        )
    }

    /// Whether world cell `(x, y)` is inside the camera rectangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.width
            && (y - self.y) < self.height
    }

    /// Screen-relative position of world cell `(x, y)`, if it is on screen.
    pub fn to_screen(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        self.contains(x, y).then(|| (x - self.x, y - self.y))
    }

    /// Apply a camera key. Returns `true` if the origin moved.
    pub fn apply(&mut self, command: CameraCommand) -> bool {
        match command {
            CameraCommand::Pan(pan) => self.pan(pan),
            CameraCommand::Recenter => self.recenter(),
        }
    }

    /// Nudge the camera one cell. Returns `true` if the origin moved.
    pub fn pan(&mut self, pan: Pan) -> bool {
        let (dx, dy) = pan.delta();
        let (max_x, max_y) = self.max_origin();
        let x = clamp_axis(i64::from(self.x) + dx, max_x);
        let y = clamp_axis(i64::from(self.y) + dy, max_y);
        self.move_origin(x, y)
    }

    /// Center the camera on the last action position. Returns `true` if the
    /// origin moved.
    pub fn recenter(&mut self) -> bool {
        let (max_x, max_y) = self.max_origin();
        let x = clamp_axis(
            i64::from(self.last_action_x) - i64::from(self.width / 2),
            max_x,
        );
        let y = clamp_axis(
            i64::from(self.last_action_y) - i64::from(self.height / 2),
            max_y,
        );
        self.move_origin(x, y)
    }

    fn move_origin(&mut self, x: u32, y: u32) -> bool {
        if (x, y) == (self.x, self.y) {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }
}

fn clamp_axis(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big() -> Camera {
        // World 100x50, camera 64x32 => origin bounds 35x17.
        Camera::new(100, 50, 64, 32)
    }

    #[test]
    fn starts_at_origin_remembering_world_center() {
        let cam = big();
        assert_eq!((cam.x(), cam.y()), (0, 0));
        assert_eq!(cam.last_action(), (50, 25));
        assert_eq!(cam.max_origin(), (35, 17));
    }

    #[test]
    fn pan_at_bound_is_a_no_op() {
        let mut cam = big();
        assert!(!cam.pan(Pan::Up));
        assert!(!cam.pan(Pan::Left));
        assert_eq!((cam.x(), cam.y()), (0, 0));
    }

    #[test]
    fn pan_stops_one_short_of_the_world_edge() {
        let mut cam = big();
        let mut moves = 0;
        while cam.pan(Pan::Right) {
            moves += 1;
        }
        assert_eq!(moves, 35);
        assert_eq!(cam.x(), 100 - 64 - 1);
        assert!(!cam.pan(Pan::Right));
    }

    #[test]
    fn recenter_clamps_to_bounds() {
        let mut cam = big();
        cam.set_last_action(99, 49);
        assert!(cam.recenter());
        assert_eq!((cam.x(), cam.y()), (35, 17));

        cam.set_last_action(40, 20);
        assert!(cam.recenter());
        assert_eq!((cam.x(), cam.y()), (8, 4));

        // Same target again: nothing moves.
        assert!(!cam.recenter());
    }

    #[test]
    fn small_world_pins_camera_to_origin() {
        let mut cam = Camera::new(10, 10, 64, 32);
        assert_eq!(cam.max_origin(), (0, 0));
        assert!(!cam.pan(Pan::Down));
        assert!(!cam.pan(Pan::Right));
        assert!(!cam.recenter());
        assert!(cam.contains(9, 9));
    }

    #[test]
    fn contains_and_screen_position_follow_origin() {
        let mut cam = big();
        cam.pan(Pan::Right);
        cam.pan(Pan::Down);
        assert!(!cam.contains(0, 5));
        assert!(cam.contains(1, 1));
        assert!(cam.contains(64, 32));
        assert!(!cam.contains(65, 32));
        assert_eq!(cam.to_screen(10, 7), Some((9, 6)));
        assert_eq!(cam.to_screen(0, 0), None);
    }
}
