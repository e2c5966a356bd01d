use glam::{vec2, UVec2, Vec2};

use crate::Camera;

/// Where (if anywhere) the current pixel was on screen during the previous
/// frame; produced by an external reprojection pass.
#[derive(Clone, Copy, Default, Debug)]
pub struct Reprojection {
    pub prev_x: f32,
    pub prev_y: f32,
    pub confidence: f32,
}

impl Reprojection {
    pub fn is_some(&self) -> bool {
        self.confidence > 0.0
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    pub fn prev_pos(&self) -> Vec2 {
        vec2(self.prev_x, self.prev_y)
    }

    pub fn prev_pos_round(&self) -> UVec2 {
        self.prev_pos().round().as_uvec2()
    }
}

#[derive(Clone, Copy)]
pub struct ReprojectionMap<'a> {
    camera: Camera,
    entries: &'a [Reprojection],
}

impl<'a> ReprojectionMap<'a> {
    pub fn new(camera: Camera, entries: &'a [Reprojection]) -> Self {
        Self { camera, entries }
    }

    pub fn get(&self, screen_pos: UVec2) -> Reprojection {
        self.entries[self.camera.screen_to_idx(screen_pos)]
    }
}
