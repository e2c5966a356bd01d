use core::ops::{Deref, DerefMut};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::{LightId, LightSample, Reservoir};

/// Reservoir for sampling direct lighting.
///
/// See: [`Reservoir`].
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct DiReservoir {
    pub reservoir: Reservoir<LightSample>,
}

/// Flat record of a [`DiReservoir`] inside the double-buffered reservoir
/// storage; laid out GPU-style so the same buffers can back a compute
/// dispatch.
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
pub struct DiReservoirData {
    pub m: f32,
    pub w_sum: f32,
    pub w: f32,
    pub light_id: u32,
    pub light_point: Vec3,
    _padding: u32,
}

impl DiReservoir {
    pub fn read(buffer: &[DiReservoirData], id: usize) -> Self {
        let data = buffer[id];

        Self {
            reservoir: Reservoir {
                sample: LightSample {
                    light_id: LightId::new(data.light_id),
                    light_point: data.light_point,
                },
                w_sum: data.w_sum,
                m: data.m,
                w: data.w,
            },
        }
    }

    pub fn write(self, buffer: &mut [DiReservoirData], id: usize) {
        buffer[id] = self.pack();
    }

    pub fn pack(self) -> DiReservoirData {
        DiReservoirData {
            m: self.reservoir.m,
            w_sum: self.reservoir.w_sum,
            w: self.reservoir.w,
            light_id: self.sample.light_id.get(),
            light_point: self.sample.light_point,
            _padding: 0,
        }
    }

    pub fn copy(
        input: &[DiReservoirData],
        output: &mut [DiReservoirData],
        id: usize,
    ) {
        Self::read(input, id).write(output, id);
    }

    pub fn is_empty(self) -> bool {
        self.m == 0.0
    }
}

impl Deref for DiReservoir {
    type Target = Reservoir<LightSample>;

    fn deref(&self) -> &Self::Target {
        &self.reservoir
    }
}

impl DerefMut for DiReservoir {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reservoir
    }
}
