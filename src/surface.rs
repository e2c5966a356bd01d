use glam::Vec3;

use crate::Settings;

/// Snapshot of one pixel's primary shading context, captured once per frame
/// per pixel by the G-buffer pass; read-only to the resampling engine.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Surface {
    pub point: Vec3,
    pub normal: Vec3,
    pub view_direction: Vec3,
    pub roughness: f32,
}

impl Surface {
    pub fn is_some(&self) -> bool {
        self.normal != Vec3::ZERO
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }
}

/// Returns whether the two given points pass the plane distance check;
/// catches depth discontinuities the reprojection alone doesn't see.
pub fn plane_distance_heuristic(
    neighbor_point: Vec3,
    current_point: Vec3,
    current_normal: Vec3,
    threshold: f32,
) -> bool {
    let direction_between_points = neighbor_point - current_point;
    let distance_to_plane = direction_between_points.dot(current_normal).abs();

    distance_to_plane < threshold
}

pub fn normal_similarity_heuristic(
    current_normal: Vec3,
    neighbor_normal: Vec3,
    threshold: f32,
) -> bool {
    current_normal.dot(neighbor_normal) > threshold
}

pub fn roughness_similarity_heuristic(
    neighbor_roughness: f32,
    current_roughness: f32,
    threshold: f32,
) -> bool {
    (neighbor_roughness - current_roughness).abs() < threshold
}

/// Gates whether a previous-frame reservoir may be reused at the current
/// pixel at all; all three heuristics must pass.
///
/// Materials smoother than the configured cutoff never reuse: with camera-ray
/// jittering, samples resampled across sub-pixel locations stop aligning with
/// the glossy reflection direction and near-specular highlights darken.
pub fn check_similarity_heuristics(
    current: &Surface,
    neighbor: &Surface,
    settings: &Settings,
) -> bool {
    if current.is_none() || neighbor.is_none() {
        return false;
    }

    if current.roughness < settings.min_roughness_for_temporal_reuse
        || neighbor.roughness < settings.min_roughness_for_temporal_reuse
    {
        return false;
    }

    let plane_distance_passed = plane_distance_heuristic(
        neighbor.point,
        current.point,
        current.normal,
        settings.plane_distance_threshold,
    );

    let normal_similarity_passed = normal_similarity_heuristic(
        current.normal,
        neighbor.normal,
        settings.normal_similarity_angle_precomp,
    );

    let roughness_similarity_passed = roughness_similarity_heuristic(
        neighbor.roughness,
        current.roughness,
        settings.roughness_similarity_threshold,
    );

    plane_distance_passed && normal_similarity_passed && roughness_similarity_passed
}
