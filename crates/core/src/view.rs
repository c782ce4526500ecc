//! The client's mutable view context.
//!
//! Owns the world model and the camera for the whole session. Passed by
//! reference to the interpreter, the turn loop and the renderer.

use crate::camera::Camera;
use crate::types::{CameraCommand, Cell, Redraw};
use crate::world::{World, WorldError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub world: World,
    pub camera: Camera,
}

impl ViewState {
    pub fn new(
        world_width: u32,
        world_height: u32,
        camera_width: u32,
        camera_height: u32,
    ) -> Result<Self, WorldError> {
        Ok(Self {
            world: World::new(world_width, world_height)?,
            camera: Camera::new(world_width, world_height, camera_width, camera_height),
        })
    }

    /// Cell at world position `(x, y)`, if it exists.
    pub fn cell(&self, x: u32, y: u32) -> Option<Cell> {
        self.world.get(x, y)
    }

    /// Apply a camera key, asking for a full redraw when the camera moved.
    pub fn apply_camera(&mut self, command: CameraCommand) -> Redraw {
        if self.camera.apply(command) {
            Redraw::Camera
        } else {
            Redraw::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pan;

    #[test]
    fn camera_move_requests_full_redraw() {
        let mut view = ViewState::new(100, 100, 64, 32).unwrap();
        assert_eq!(view.apply_camera(CameraCommand::Pan(Pan::Up)), Redraw::Nothing);
        assert_eq!(view.apply_camera(CameraCommand::Pan(Pan::Down)), Redraw::Camera);
        assert_eq!(view.camera.y(), 1);
    }
}
