use glam::UVec2;

use crate::{Camera, Surface};

/// Per-frame, per-pixel primary-hit surfaces.
///
/// Filled by an external G-buffer pass; during resampling each pixel task
/// reads its own entry from the current frame and the reprojected entry from
/// the previous frame.
#[derive(Clone, Debug)]
pub struct GBuffer {
    camera: Camera,
    surfaces: Vec<Surface>,
}

impl GBuffer {
    pub fn new(camera: Camera) -> Self {
        let size = camera.viewport_size();

        Self {
            camera,
            surfaces: vec![Surface::default(); (size.x * size.y) as usize],
        }
    }

    pub fn get(&self, screen_pos: UVec2) -> Surface {
        self.surfaces[self.camera.screen_to_idx(screen_pos)]
    }

    pub fn set(&mut self, screen_pos: UVec2, surface: Surface) {
        let idx = self.camera.screen_to_idx(screen_pos);

        self.surfaces[idx] = surface;
    }
}
