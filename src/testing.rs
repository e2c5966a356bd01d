//! Test doubles for the collaborator seams.

use glam::{vec3, Vec3};

use crate::{BsdfEval, LightId, LightSample, Ray, Scene, Settings, Surface};

/// Minimal scene with unit-albedo materials and a list of emissive
/// primitives; shadow rays answer with a single blanket flag.
pub struct TestScene {
    pub lights: Vec<TestLight>,
    pub occluded: bool,
}

pub struct TestLight {
    pub normal: Vec3,
    pub emission: Vec3,
}

impl TestScene {
    pub fn single_light(normal: Vec3, emission: Vec3) -> Self {
        Self {
            lights: vec![TestLight { normal, emission }],
            occluded: false,
        }
    }
}

impl Scene for TestScene {
    fn evaluate_bsdf(&self, _surface: &Surface, _light_dir: Vec3) -> BsdfEval {
        BsdfEval {
            color: Vec3::ONE,
            pdf: 1.0,
        }
    }

    fn light_emission(&self, light_id: LightId) -> Vec3 {
        self.lights[light_id.get() as usize].emission
    }

    fn light_normal(&self, light_id: LightId) -> Vec3 {
        self.lights[light_id.get() as usize].normal
    }

    fn is_occluded(&self, _ray: Ray, _max_distance: f32) -> bool {
        self.occluded
    }
}

/// Scene whose target function evaluates to one constant at the center
/// surface and another at the temporal surface, with a unit reconnection
/// Jacobian between the two; used for the hand-computable MIS cases.
pub struct TwoValueScene {
    pub center_point: Vec3,
    pub tf_center: f32,
    pub tf_temporal: f32,
}

impl Scene for TwoValueScene {
    fn evaluate_bsdf(&self, surface: &Surface, _light_dir: Vec3) -> BsdfEval {
        let value = if surface.point == self.center_point {
            self.tf_center
        } else {
            self.tf_temporal
        };

        BsdfEval {
            color: Vec3::splat(value),
            pdf: 1.0,
        }
    }

    fn light_emission(&self, _light_id: LightId) -> Vec3 {
        Vec3::ONE
    }

    fn light_normal(&self, _light_id: LightId) -> Vec3 {
        vec3(-1.0, 0.0, -1.0).normalize()
    }

    fn is_occluded(&self, _ray: Ray, _max_distance: f32) -> bool {
        false
    }
}

pub struct TwoValueSetup {
    pub scene: TwoValueScene,
    pub settings: Settings,
    pub center_surface: Surface,
    pub temporal_surface: Surface,
    pub light_sample: LightSample,
}

/// Both surfaces face the light dead-on from distance 1, so the target
/// function reduces to the luminance of the scene's constant and the
/// reconnection Jacobian between them is exactly 1.
pub fn two_value_setup(tf_center: f32, tf_temporal: f32) -> TwoValueSetup {
    let center_point = vec3(0.0, 0.0, 0.0);
    let light_point = vec3(0.0, 0.0, 1.0);

    let scene = TwoValueScene {
        center_point,
        tf_center,
        tf_temporal,
    };

    let settings = Settings {
        geometry_term_in_target_function: false,
        use_visibility: false,

        // Wide-open heuristics; these tests exercise the math, not the gates
        plane_distance_threshold: 100.0,
        normal_similarity_angle_precomp: -1.0,
        roughness_similarity_threshold: 1.0,
        min_roughness_for_temporal_reuse: 0.0,

        ..Settings::default()
    };

    let center_surface = Surface {
        point: center_point,
        normal: vec3(0.0, 0.0, 1.0),
        view_direction: vec3(0.0, 0.0, 1.0),
        roughness: 0.5,
    };

    let temporal_surface = Surface {
        point: vec3(1.0, 0.0, 1.0),
        normal: vec3(-1.0, 0.0, 0.0),
        view_direction: vec3(-1.0, 0.0, 0.0),
        roughness: 0.5,
    };

    let light_sample = LightSample {
        light_id: LightId::new(0),
        light_point,
    };

    TwoValueSetup {
        scene,
        settings,
        center_surface,
        temporal_surface,
        light_sample,
    }
}

/// Sanity-checks the fixture itself so the MIS tests can rely on the
/// advertised constants.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eval_target_function, reconnection_shift_jacobian};

    #[test]
    fn two_value_setup_hits_its_constants() {
        let setup = two_value_setup(2.0, 6.0);

        let tf_center = eval_target_function(
            &setup.scene,
            setup.light_sample,
            &setup.center_surface,
            &setup.settings,
        );

        let tf_temporal = eval_target_function(
            &setup.scene,
            setup.light_sample,
            &setup.temporal_surface,
            &setup.settings,
        );

        approx::assert_relative_eq!(2.0, tf_center, epsilon = 1.0e-5);
        approx::assert_relative_eq!(6.0, tf_temporal, epsilon = 1.0e-5);

        let jacobian = reconnection_shift_jacobian(
            setup.scene.light_normal(setup.light_sample.light_id),
            setup.light_sample.light_point,
            setup.center_surface.point,
            setup.temporal_surface.point,
        )
        .unwrap();

        approx::assert_relative_eq!(1.0, jacobian, epsilon = 1.0e-5);
    }
}
