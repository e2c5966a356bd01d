use glam::Vec3;

use crate::{LightId, Ray, Surface};

/// Result of evaluating a material's BSDF toward a light sample.
#[derive(Clone, Copy, Default, Debug)]
pub struct BsdfEval {
    pub color: Vec3,
    pub pdf: f32,
}

/// Collaborator interface towards the rest of the renderer.
///
/// The resampling engine never shades or intersects on its own - materials,
/// light storage and the acceleration structure all live behind this trait,
/// specified as pure function contracts so a pass stays data-parallel.
pub trait Scene {
    /// Evaluates the surface's BSDF for light arriving from `light_dir`,
    /// using the surface's own view direction and shading normal.
    fn evaluate_bsdf(&self, surface: &Surface, light_dir: Vec3) -> BsdfEval;

    /// Returns the emission of given emissive primitive.
    fn light_emission(&self, light_id: LightId) -> Vec3;

    /// Returns the normalized geometric normal of given emissive primitive.
    fn light_normal(&self, light_id: LightId) -> Vec3;

    /// Casts a shadow ray; returns whether anything occludes it within
    /// `max_distance`.
    fn is_occluded(&self, ray: Ray, max_distance: f32) -> bool;
}
