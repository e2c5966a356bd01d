use glam::Vec3;

#[derive(Clone, Copy, Default, Debug)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// How far to shorten a shadow ray to avoid self-intersecting the light
    /// source it points at.
    pub const NUDGE_OFFSET: f32 = 0.01;

    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
