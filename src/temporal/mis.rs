use crate::{
    eval_target_function, BiasCorrectionMode, DiReservoir, NeighborId, Scene,
    Settings, Surface,
};

/// Everything a resampling MIS-weight policy may look at when weighting one
/// candidate reservoir that is being folded into the combined reservoir.
pub struct MisContext<'a, S>
where
    S: ?Sized,
{
    pub scene: &'a S,
    pub settings: &'a Settings,

    /// Reservoir currently being resampled.
    pub candidate: &'a DiReservoir,

    pub center_surface: &'a Surface,
    pub temporal_surface: &'a Surface,

    pub initial_candidates_m: f32,
    pub temporal_m: f32,

    /// Which neighbor the candidate is.
    pub neighbor: NeighborId,
}

/// Computes the resampling MIS weight `m_i` for one candidate, i.e. the
/// factor multiplied into its resampling weight on top of the usual
/// `target_function × jacobian × ucw` term.
pub fn resampling_mis_weight<S>(ctx: &MisContext<'_, S>) -> f32
where
    S: Scene + ?Sized,
{
    match ctx.settings.bias_correction_mode {
        // Confidence weights only; 1/M and 1/Z differ solely in how the
        // combined reservoir gets normalized afterwards
        BiasCorrectionMode::OneOverM | BiasCorrectionMode::OneOverZ => {
            ctx.candidate.m
        }

        // No weighting at combination time, the bulk of the work happens
        // during normalization
        BiasCorrectionMode::MisLike => 1.0,

        BiasCorrectionMode::MisLikeConfidence => ctx.candidate.m,

        BiasCorrectionMode::MisGbh => generalized_balance_heuristic(ctx, false),

        BiasCorrectionMode::MisGbhConfidence => {
            generalized_balance_heuristic(ctx, true)
        }
    }
}

/// Balance-heuristic weight: the candidate's sample evaluated at its own
/// neighbor's surface over the sum of it evaluated at every neighbor's
/// surface, optionally confidence-scaled.
fn generalized_balance_heuristic<S>(
    ctx: &MisContext<'_, S>,
    confidence_weights: bool,
) -> f32
where
    S: Scene + ?Sized,
{
    let target_function_at_temporal = if ctx.temporal_m > 0.0 {
        eval_target_function(
            ctx.scene,
            ctx.candidate.sample,
            ctx.temporal_surface,
            ctx.settings,
        )
    } else {
        // No temporal neighbor, no technique to weight against
        0.0
    };

    if ctx.neighbor == NeighborId::Temporal
        && target_function_at_temporal == 0.0
    {
        // Zero numerator either way, skip the second evaluation
        return 0.0;
    }

    let target_function_at_center = eval_target_function(
        ctx.scene,
        ctx.candidate.sample,
        ctx.center_surface,
        ctx.settings,
    );

    let (temporal_term, center_term) = if confidence_weights {
        (
            target_function_at_temporal * ctx.temporal_m,
            target_function_at_center * ctx.initial_candidates_m,
        )
    } else {
        (target_function_at_temporal, target_function_at_center)
    };

    let nume = match ctx.neighbor {
        NeighborId::Temporal => temporal_term,
        NeighborId::InitialCandidates => center_term,
    };

    let denom = temporal_term + center_term;

    if denom == 0.0 {
        0.0
    } else {
        nume / denom
    }
}
