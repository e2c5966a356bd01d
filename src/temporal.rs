mod mis;
mod norm;

use glam::{uvec2, UVec2};
use log::debug;
use rayon::prelude::*;

pub use self::mis::*;
pub use self::norm::*;
use crate::{
    check_similarity_heuristics, eval_target_function,
    reconnection_shift_jacobian, Camera, DiReservoir, DiReservoirData,
    GBuffer, PassParams, ReprojectionMap, Scene, Settings, Surface,
    WhiteNoise,
};

/// By convention the temporal neighbor is the first neighbor to be resampled
/// and the initial-candidates reservoir the second; MIS and normalization
/// weights key off this identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighborId {
    Temporal,
    InitialCandidates,
}

/// Seed used when `freeze_random` is requested.
const FROZEN_SEED: u32 = 0x5eed0001;

/// Temporal resampling pass: per pixel, combines this frame's
/// initial-candidates reservoir with the previous frame's reservoir at the
/// reprojected position, and normalizes the result according to the active
/// bias-correction mode.
///
/// Every pixel is an independent task: it reads its own surface, its own
/// initial candidates, and the previous frame's (immutable) buffers - never
/// another pixel's in-progress reservoir - so the whole pass dispatches
/// without synchronization.
pub struct TemporalResamplingPass<'a, S> {
    pub scene: &'a S,
    pub camera: &'a Camera,
    pub settings: &'a Settings,
    pub params: PassParams,
    pub gbuffer: &'a GBuffer,
    pub prev_gbuffer: &'a GBuffer,
    pub reprojection_map: ReprojectionMap<'a>,
    pub initial_candidates: &'a [DiReservoirData],
    pub prev_reservoirs: &'a [DiReservoirData],
}

impl<'a, S> TemporalResamplingPass<'a, S>
where
    S: Scene + Sync,
{
    /// Runs the pass for every pixel, writing this frame's reservoirs into
    /// `curr_reservoirs`.
    pub fn run(&self, curr_reservoirs: &mut [DiReservoirData]) {
        let size = self.camera.viewport_size();

        debug!(
            "Running temporal resampling pass; viewport={}x{}, frame={}",
            size.x, size.y, self.params.frame
        );

        curr_reservoirs
            .par_chunks_mut(size.x as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    let screen_pos = uvec2(x as u32, y as u32);

                    *out = self.resample_pixel(screen_pos).pack();
                }
            });
    }

    /// Resamples a single pixel:
    /// heuristics gate → combine initial candidates → combine temporal
    /// neighbor → finalize.
    pub fn resample_pixel(&self, screen_pos: UVec2) -> DiReservoir {
        let screen_idx = self.camera.screen_to_idx(screen_pos);

        let seed = if self.settings.freeze_random {
            FROZEN_SEED
        } else {
            self.params.seed
        };

        let mut wnoise = WhiteNoise::new(seed, screen_pos);

        let center_surface = self.gbuffer.get(screen_pos);
        let initial = DiReservoir::read(self.initial_candidates, screen_idx);

        if center_surface.is_none() {
            // Primary miss: there's nothing to shade, so there's nothing to
            // resample either
            return initial;
        }

        // ---------------------------------------------------------------------
        // Step 1:
        //
        // Locate the temporal neighbor and gate it; anything that disqualifies
        // it (requested clear, invalid reprojection, failed heuristics, an
        // ill-conditioned reconnection) leaves it absent, i.e. m = 0, for the
        // rest of this pixel's frame.

        let mut temporal = DiReservoir::default();
        let mut temporal_surface = Surface::default();

        if !self.settings.temporal_buffer_clear_requested {
            let reprojection = self.reprojection_map.get(screen_pos);

            if reprojection.is_some() {
                let prev_pos = reprojection.prev_pos_round();

                if self.camera.contains(prev_pos.as_ivec2()) {
                    let surface = self.prev_gbuffer.get(prev_pos);

                    if check_similarity_heuristics(
                        &center_surface,
                        &surface,
                        self.settings,
                    ) {
                        temporal = DiReservoir::read(
                            self.prev_reservoirs,
                            self.camera.screen_to_idx(prev_pos),
                        );

                        temporal_surface = surface;
                    }
                }
            }
        }

        // Keep a long history from drowning out this frame's candidates
        temporal.clamp_m(
            self.settings.max_temporal_confidence * initial.m.max(1.0),
        );

        let mut temporal_jacobian = 1.0;

        if temporal.m > 0.0 && temporal.sample.is_some() {
            let jacobian = reconnection_shift_jacobian(
                self.scene.light_normal(temporal.sample.light_id),
                temporal.sample.light_point,
                center_surface.point,
                temporal_surface.point,
            );

            match jacobian {
                Some(jacobian) => temporal_jacobian = jacobian,
                None => {
                    temporal = DiReservoir::default();
                    temporal_surface = Surface::default();
                }
            }
        }

        // ---------------------------------------------------------------------
        // Step 2:
        //
        // Stream-combine both candidate reservoirs; each gets weighted with
        // `m_i × target_function × ucw × jacobian` and remembers whether it
        // ended up producing the retained sample.

        let mut combined = DiReservoir::default();
        let mut selected = NeighborId::InitialCandidates;
        let mut selected_target_function = 0.0;

        if initial.m > 0.0 {
            let target_function = eval_target_function(
                self.scene,
                initial.sample,
                &center_surface,
                self.settings,
            );

            let mis_weight = resampling_mis_weight(&MisContext {
                scene: self.scene,
                settings: self.settings,
                candidate: &initial,
                center_surface: &center_surface,
                temporal_surface: &temporal_surface,
                initial_candidates_m: initial.m,
                temporal_m: temporal.m,
                neighbor: NeighborId::InitialCandidates,
            });

            if combined.merge(
                &mut wnoise,
                &initial,
                mis_weight * target_function * initial.w,
            ) {
                selected = NeighborId::InitialCandidates;
                selected_target_function = target_function;
            }
        }

        if temporal.m > 0.0 {
            let target_function = eval_target_function(
                self.scene,
                temporal.sample,
                &center_surface,
                self.settings,
            );

            let mis_weight = resampling_mis_weight(&MisContext {
                scene: self.scene,
                settings: self.settings,
                candidate: &temporal,
                center_surface: &center_surface,
                temporal_surface: &temporal_surface,
                initial_candidates_m: initial.m,
                temporal_m: temporal.m,
                neighbor: NeighborId::Temporal,
            });

            if combined.merge(
                &mut wnoise,
                &temporal,
                mis_weight * target_function * temporal.w * temporal_jacobian,
            ) {
                selected = NeighborId::Temporal;
                selected_target_function = target_function;
            }
        }

        // ---------------------------------------------------------------------
        // Step 3:
        //
        // Finalize: turn the running weight-sum into the unbiased contribution
        // weight consumed by shading.

        let normalization = normalization_weight(&NormalizationContext {
            scene: self.scene,
            settings: self.settings,
            reservoir: &combined,
            center_surface: &center_surface,
            temporal_surface: &temporal_surface,
            initial_candidates_m: initial.m,
            temporal_m: temporal.m,
            selected,
        });

        combined.finalize(
            selected_target_function,
            normalization.nume,
            normalization.denom,
        );

        combined
    }
}
