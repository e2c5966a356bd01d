/// Strategy used to keep the estimator unbiased (or deliberately, cheaply
/// biased) when reservoirs resampled from different surfaces get combined.
///
/// Selected once for the whole render; each variant pairs one resampling
/// MIS-weight formula with one normalization formula.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum BiasCorrectionMode {
    /// Pure confidence weighting; cheap, darkens around geometry edges.
    OneOverM,

    /// Confidence weighting normalized over the neighbors that could have
    /// produced the retained sample; unbiased without visibility in the
    /// target function.
    #[default]
    OneOverZ,

    /// Target-function-ratio weights applied entirely at normalization time.
    MisLike,

    /// [`Self::MisLike`], additionally weighted by each neighbor's
    /// confidence.
    MisLikeConfidence,

    /// Generalized balance heuristic; all correction happens per-candidate
    /// during resampling, normalization is the identity.
    MisGbh,

    /// [`Self::MisGbh`] with confidence-weighted target-function terms.
    MisGbhConfidence,
}

/// Render-global configuration of the resampling engine.
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    /// Maximum distance between a temporal neighbor's point and the plane of
    /// the current surface.
    pub plane_distance_threshold: f32,

    /// Cosine of the maximum angle between the current and the temporal
    /// neighbor's shading normals; precomputed from an angle upstream.
    pub normal_similarity_angle_precomp: f32,

    /// Maximum absolute roughness difference between the two surfaces.
    pub roughness_similarity_threshold: f32,

    /// Materials smoother than this never reuse temporally.
    pub min_roughness_for_temporal_reuse: f32,

    pub bias_correction_mode: BiasCorrectionMode,

    /// Whether the target function traces a shadow ray; more expensive, but
    /// removes the visibility-induced bias of the cheaper modes.
    pub use_visibility: bool,

    /// Whether the target function includes `|cos θ_light| / d²`.
    pub geometry_term_in_target_function: bool,

    /// Cap on the temporal neighbor's confidence, as a multiple of the
    /// initial candidates' confidence; keeps stale history from drowning out
    /// fresh samples.
    pub max_temporal_confidence: f32,

    /// Treats every temporal neighbor as absent for one frame, e.g. after a
    /// scene edit invalidated the reservoir history.
    pub temporal_buffer_clear_requested: bool,

    /// Pins the per-frame seed so consecutive frames draw identical random
    /// numbers; debugging aid.
    pub freeze_random: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plane_distance_threshold: 0.1,
            normal_similarity_angle_precomp: 25.0f32.to_radians().cos(),
            roughness_similarity_threshold: 0.25,
            min_roughness_for_temporal_reuse: 0.075,
            bias_correction_mode: BiasCorrectionMode::default(),
            use_visibility: false,
            geometry_term_in_target_function: true,
            max_temporal_confidence: 20.0,
            temporal_buffer_clear_requested: false,
            freeze_random: false,
        }
    }
}

/// Per-frame parameters of a pass.
#[derive(Clone, Copy, Default, Debug)]
pub struct PassParams {
    pub seed: u32,
    pub frame: u32,
}
