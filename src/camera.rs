use bytemuck::{Pod, Zeroable};
use glam::{IVec2, UVec2};

/// Viewport-side slice of the camera: just enough to index screen-space
/// buffers; projection, reprojection and ray generation happen upstream.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Camera {
    viewport_size: UVec2,
}

impl Camera {
    pub fn new(viewport_size: UVec2) -> Self {
        Self { viewport_size }
    }

    pub fn viewport_size(&self) -> UVec2 {
        self.viewport_size
    }

    /// Given a point in screen-coordinates, returns a unique index for it;
    /// used to index screen-space structures.
    pub fn screen_to_idx(&self, pos: UVec2) -> usize {
        (pos.y * self.viewport_size.x + pos.x) as usize
    }

    /// Returns whether given point lays inside the viewport.
    pub fn contains(&self, pos: IVec2) -> bool {
        let viewport_size = self.viewport_size.as_ivec2();

        pos.x >= 0
            && pos.y >= 0
            && pos.x < viewport_size.x
            && pos.y < viewport_size.y
    }
}
