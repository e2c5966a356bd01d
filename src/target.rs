use crate::{LightSample, Ray, Scene, Settings, Surface, Vec3Ext};

/// Evaluates the resampling target function: how much `sample` matters at
/// `surface`, as an approximation of the rendering-equation integrand for one
/// light sample.
///
/// When `settings.use_visibility` is set, a shadow ray additionally zeroes
/// occluded samples - at the cost of one visibility query per evaluation; the
/// query is skipped whenever the unshadowed value is already zero.
pub fn eval_target_function<S>(
    scene: &S,
    sample: LightSample,
    surface: &Surface,
    settings: &Settings,
) -> f32
where
    S: Scene + ?Sized,
{
    if sample.is_none() || surface.is_none() {
        return 0.0;
    }

    let to_light = sample.light_point - surface.point;
    let distance_to_light = to_light.length();

    if distance_to_light <= 0.0 {
        return 0.0;
    }

    let sample_direction = to_light / distance_to_light;

    let bsdf = scene.evaluate_bsdf(surface, sample_direction);
    let cosine_term = surface.normal.dot(sample_direction).max(0.0);

    let geometry_term = if settings.geometry_term_in_target_function {
        let light_normal = scene.light_normal(sample.light_id);
        let cosine_at_light = sample_direction.dot(light_normal).abs();

        cosine_at_light / (distance_to_light * distance_to_light)
    } else {
        1.0
    };

    let emission = scene.light_emission(sample.light_id);

    let target_function =
        (bsdf.color * emission * cosine_term * geometry_term).luma();

    if target_function == 0.0 {
        // The visibility check below can't change anything anymore
        return 0.0;
    }

    if settings.use_visibility {
        let shadow_ray = Ray::new(surface.point, sample_direction);

        if scene.is_occluded(shadow_ray, distance_to_light - Ray::NUDGE_OFFSET)
        {
            return 0.0;
        }
    }

    target_function
}
