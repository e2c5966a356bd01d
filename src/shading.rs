use glam::Vec3;

use crate::{DiReservoir, Scene, Surface};

/// Turns a finalized reservoir into the pixel's direct-lighting estimate:
/// `bsdf × emission × cos θ × ucw`.
///
/// Degenerate reservoirs (no sample, zero contribution weight) shade to
/// black instead of propagating invalid values downstream.
pub fn eval_reservoir_contribution<S>(
    scene: &S,
    reservoir: &DiReservoir,
    surface: &Surface,
) -> Vec3
where
    S: Scene + ?Sized,
{
    if reservoir.sample.is_none() || reservoir.w <= 0.0 || surface.is_none() {
        return Vec3::ZERO;
    }

    let to_light = reservoir.sample.light_point - surface.point;
    let distance_to_light = to_light.length();

    if distance_to_light <= 0.0 {
        return Vec3::ZERO;
    }

    let light_dir = to_light / distance_to_light;

    let bsdf = scene.evaluate_bsdf(surface, light_dir);
    let cosine_term = surface.normal.dot(light_dir).max(0.0);
    let emission = scene.light_emission(reservoir.sample.light_id);

    bsdf.color * emission * cosine_term * reservoir.w
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;
    use crate::testing::TestScene;
    use crate::{LightId, LightSample, Reservoir};

    fn surface() -> Surface {
        Surface {
            point: Vec3::ZERO,
            normal: vec3(0.0, 1.0, 0.0),
            view_direction: vec3(0.0, 1.0, 0.0),
            roughness: 0.5,
        }
    }

    #[test]
    fn empty_reservoir_shades_to_black() {
        let scene = TestScene::single_light(
            vec3(0.0, -1.0, 0.0),
            vec3(1.0, 1.0, 1.0),
        );

        let contribution = eval_reservoir_contribution(
            &scene,
            &DiReservoir::default(),
            &surface(),
        );

        assert_eq!(Vec3::ZERO, contribution);
    }

    #[test]
    fn contribution_scales_with_ucw() {
        let scene = TestScene::single_light(
            vec3(0.0, -1.0, 0.0),
            vec3(2.0, 2.0, 2.0),
        );

        let reservoir = |w| DiReservoir {
            reservoir: Reservoir {
                sample: LightSample {
                    light_id: LightId::new(0),
                    light_point: vec3(0.0, 1.0, 0.0),
                },
                w_sum: 1.0,
                m: 1.0,
                w,
            },
        };

        let once =
            eval_reservoir_contribution(&scene, &reservoir(1.0), &surface());
        let thrice =
            eval_reservoir_contribution(&scene, &reservoir(3.0), &surface());

        assert_eq!(vec3(2.0, 2.0, 2.0), once);
        assert_eq!(once * 3.0, thrice);
    }
}
