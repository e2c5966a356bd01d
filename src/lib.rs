//! Spatiotemporal reservoir resampling for direct lighting.
//!
//! This crate implements the temporal half of a ReSTIR-style direct-light
//! sampler: each pixel stream-combines this frame's initial light candidates
//! with its own reprojected previous-frame reservoir and stays a consistent
//! estimator under a family of interchangeable bias-correction modes.
//!
//! BSDF evaluation, visibility queries and light lookups are collaborators,
//! consumed through the [`Scene`] trait; the engine itself only resamples.

mod buffers;
mod camera;
mod gbuffer;
mod light;
mod noise;
mod ray;
mod reprojection;
mod reservoir;
mod scene;
mod settings;
mod shading;
mod shift;
mod surface;
mod target;
mod temporal;
mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use self::buffers::*;
pub use self::camera::*;
pub use self::gbuffer::*;
pub use self::light::*;
pub use self::noise::*;
pub use self::ray::*;
pub use self::reprojection::*;
pub use self::reservoir::*;
pub use self::scene::*;
pub use self::settings::*;
pub use self::shading::*;
pub use self::shift::*;
pub use self::surface::*;
pub use self::target::*;
pub use self::temporal::*;
pub use self::utils::*;

pub mod prelude {
    pub use core::f32::consts::PI;

    pub use glam::*;

    pub use crate::*;
}
