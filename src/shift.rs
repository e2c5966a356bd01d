use glam::Vec3;

use crate::F32Ext;

/// Jacobians outside `[1 / CLAMP, CLAMP]` mean the two shading points see the
/// light under geometries too dissimilar to reuse without excessive variance.
const JACOBIAN_CLAMP: f32 = 20.0;

/// Jacobian of the reconnection shift: rescales the probability density of a
/// sample picked at `neighbor_point` so that it is valid at `current_point`.
///
/// Both cosines are measured against the emissive primitive's normal, both
/// distances towards the sampled point. Returns `None` when the Jacobian is
/// ill-conditioned (clamped away or non-finite), in which case the neighbor
/// must be discarded entirely.
pub fn reconnection_shift_jacobian(
    light_normal: Vec3,
    light_point: Vec3,
    current_point: Vec3,
    neighbor_point: Vec3,
) -> Option<f32> {
    let to_light_at_current = light_point - current_point;
    let to_light_at_neighbor = light_point - neighbor_point;

    let distance_at_current = to_light_at_current.length();
    let distance_at_neighbor = to_light_at_neighbor.length();

    let cosine_at_current =
        (to_light_at_current / distance_at_current).dot(light_normal).abs();
    let cosine_at_neighbor = (to_light_at_neighbor / distance_at_neighbor)
        .dot(light_normal)
        .abs();

    let cosine_ratio = cosine_at_current / cosine_at_neighbor;
    let distance_squared_ratio =
        distance_at_neighbor.sqr() / distance_at_current.sqr();

    let jacobian = cosine_ratio * distance_squared_ratio;

    if !jacobian.is_finite()
        || jacobian > JACOBIAN_CLAMP
        || jacobian < 1.0 / JACOBIAN_CLAMP
    {
        None
    } else {
        Some(jacobian)
    }
}
