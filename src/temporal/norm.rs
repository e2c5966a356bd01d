use crate::{
    eval_target_function, BiasCorrectionMode, DiReservoir, NeighborId, Scene,
    Settings, Surface,
};

/// Numerator and denominator scaling the combined reservoir's `w_sum` into
/// its unbiased contribution weight; `1 / 1` is the no-op.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalization {
    pub nume: f32,
    pub denom: f32,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            nume: 1.0,
            denom: 1.0,
        }
    }
}

/// Everything a normalization policy may look at once all candidates were
/// folded into `reservoir`.
pub struct NormalizationContext<'a, S>
where
    S: ?Sized,
{
    pub scene: &'a S,
    pub settings: &'a Settings,

    /// The combined reservoir, holding the final retained sample.
    pub reservoir: &'a DiReservoir,

    pub center_surface: &'a Surface,
    pub temporal_surface: &'a Surface,

    pub initial_candidates_m: f32,
    pub temporal_m: f32,

    /// Neighbor that produced the retained sample.
    pub selected: NeighborId,
}

/// Computes the normalization applied at the end of the temporal reuse pass,
/// matched 1:1 with [`crate::resampling_mis_weight()`] through the active
/// bias-correction mode.
pub fn normalization_weight<S>(
    ctx: &NormalizationContext<'_, S>,
) -> Normalization
where
    S: Scene + ?Sized,
{
    if ctx.reservoir.w_sum <= 0.0 {
        // Invalid/empty reservoir, nothing to normalize
        return Normalization::default();
    }

    match ctx.settings.bias_correction_mode {
        // Divide by the summed confidence of everyone we resampled
        BiasCorrectionMode::OneOverM => Normalization {
            nume: 1.0,
            denom: ctx.initial_candidates_m + ctx.temporal_m,
        },

        // Divide by the summed confidence of the neighbors that could have
        // produced the sample we retained
        BiasCorrectionMode::OneOverZ => {
            let mut denom = 0.0;

            let target_function_at_center = eval_target_function(
                ctx.scene,
                ctx.reservoir.sample,
                ctx.center_surface,
                ctx.settings,
            );

            if target_function_at_center > 0.0 {
                denom += ctx.initial_candidates_m;
            }

            if ctx.temporal_m > 0.0 {
                let target_function_at_temporal = eval_target_function(
                    ctx.scene,
                    ctx.reservoir.sample,
                    ctx.temporal_surface,
                    ctx.settings,
                );

                if target_function_at_temporal > 0.0 {
                    denom += ctx.temporal_m;
                }
            }

            Normalization { nume: 1.0, denom }
        }

        // The producing neighbor's target function over the sum of everyone's
        BiasCorrectionMode::MisLike => mis_like(ctx, false),

        BiasCorrectionMode::MisLikeConfidence => mis_like(ctx, true),

        // Everything was already handled by the per-candidate balance
        // heuristic weights during resampling
        BiasCorrectionMode::MisGbh | BiasCorrectionMode::MisGbhConfidence => {
            Normalization::default()
        }
    }
}

fn mis_like<S>(
    ctx: &NormalizationContext<'_, S>,
    confidence_weights: bool,
) -> Normalization
where
    S: Scene + ?Sized,
{
    let target_function_at_center = eval_target_function(
        ctx.scene,
        ctx.reservoir.sample,
        ctx.center_surface,
        ctx.settings,
    );

    let target_function_at_temporal = if ctx.temporal_m > 0.0 {
        // Without a temporal neighbor there was no second technique to
        // weight against
        eval_target_function(
            ctx.scene,
            ctx.reservoir.sample,
            ctx.temporal_surface,
            ctx.settings,
        )
    } else {
        0.0
    };

    let nume = match ctx.selected {
        NeighborId::InitialCandidates => target_function_at_center,
        NeighborId::Temporal => target_function_at_temporal,
    };

    let denom = if confidence_weights {
        target_function_at_center * ctx.initial_candidates_m
            + target_function_at_temporal * ctx.temporal_m
    } else {
        target_function_at_center + target_function_at_temporal
    };

    Normalization { nume, denom }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;
    use crate::testing::two_value_setup;
    use crate::{LightId, LightSample, Reservoir};

    fn combined(w_sum: f32) -> DiReservoir {
        DiReservoir {
            reservoir: Reservoir {
                sample: LightSample {
                    light_id: LightId::new(0),
                    light_point: vec3(0.0, 0.0, 1.0),
                },
                w_sum,
                m: 2.0,
                w: 0.0,
            },
        }
    }

    fn ctx<'a>(
        setup: &'a crate::testing::TwoValueSetup,
        settings: &'a Settings,
        reservoir: &'a DiReservoir,
        temporal_m: f32,
    ) -> NormalizationContext<'a, crate::testing::TwoValueScene> {
        NormalizationContext {
            scene: &setup.scene,
            settings,
            reservoir,
            center_surface: &setup.center_surface,
            temporal_surface: &setup.temporal_surface,
            initial_candidates_m: 1.0,
            temporal_m,
            selected: NeighborId::InitialCandidates,
        }
    }

    #[test]
    fn empty_reservoir_normalizes_to_identity() {
        let setup = two_value_setup(2.0, 6.0);
        let reservoir = combined(0.0);

        for mode in [
            BiasCorrectionMode::OneOverM,
            BiasCorrectionMode::OneOverZ,
            BiasCorrectionMode::MisLike,
            BiasCorrectionMode::MisLikeConfidence,
            BiasCorrectionMode::MisGbh,
            BiasCorrectionMode::MisGbhConfidence,
        ] {
            let settings = Settings {
                bias_correction_mode: mode,
                ..setup.settings
            };

            assert_eq!(
                Normalization::default(),
                normalization_weight(&ctx(&setup, &settings, &reservoir, 1.0))
            );
        }
    }

    #[test]
    fn one_over_m_divides_by_total_confidence() {
        let setup = two_value_setup(2.0, 6.0);
        let reservoir = combined(4.0);

        let settings = Settings {
            bias_correction_mode: BiasCorrectionMode::OneOverM,
            ..setup.settings
        };

        let norm =
            normalization_weight(&ctx(&setup, &settings, &reservoir, 5.0));

        assert_eq!(1.0, norm.nume);
        assert_eq!(6.0, norm.denom);
    }

    #[test]
    fn one_over_z_counts_plausible_producers() {
        let setup = two_value_setup(2.0, 6.0);
        let reservoir = combined(4.0);

        let settings = Settings {
            bias_correction_mode: BiasCorrectionMode::OneOverZ,
            ..setup.settings
        };

        // Both surfaces score the sample > 0, so both Ms count
        let norm =
            normalization_weight(&ctx(&setup, &settings, &reservoir, 5.0));

        assert_eq!(6.0, norm.denom);

        // Absent temporal neighbor only leaves the initial candidates
        let norm =
            normalization_weight(&ctx(&setup, &settings, &reservoir, 0.0));

        assert_eq!(1.0, norm.denom);
    }

    #[test]
    fn mis_like_puts_the_producer_in_the_numerator() {
        let setup = two_value_setup(2.0, 6.0);
        let reservoir = combined(4.0);

        let settings = Settings {
            bias_correction_mode: BiasCorrectionMode::MisLike,
            ..setup.settings
        };

        let mut ctx = ctx(&setup, &settings, &reservoir, 1.0);

        let norm = normalization_weight(&ctx);

        approx::assert_relative_eq!(2.0, norm.nume, epsilon = 1.0e-5);
        approx::assert_relative_eq!(8.0, norm.denom, epsilon = 1.0e-5);

        ctx.selected = NeighborId::Temporal;

        let norm = normalization_weight(&ctx);

        approx::assert_relative_eq!(6.0, norm.nume, epsilon = 1.0e-5);
    }

    #[test]
    fn mis_like_confidence_scales_the_denominator() {
        let setup = two_value_setup(2.0, 6.0);
        let reservoir = combined(4.0);

        let settings = Settings {
            bias_correction_mode: BiasCorrectionMode::MisLikeConfidence,
            ..setup.settings
        };

        let norm =
            normalization_weight(&ctx(&setup, &settings, &reservoir, 3.0));

        // 2·1 + 6·3
        approx::assert_relative_eq!(2.0, norm.nume, epsilon = 1.0e-5);
        approx::assert_relative_eq!(20.0, norm.denom, epsilon = 1.0e-4);
    }

    #[test]
    fn gbh_is_the_identity() {
        let setup = two_value_setup(2.0, 6.0);
        let reservoir = combined(8.75);

        for mode in [
            BiasCorrectionMode::MisGbh,
            BiasCorrectionMode::MisGbhConfidence,
        ] {
            let settings = Settings {
                bias_correction_mode: mode,
                ..setup.settings
            };

            assert_eq!(
                Normalization::default(),
                normalization_weight(&ctx(&setup, &settings, &reservoir, 1.0))
            );
        }
    }
}
