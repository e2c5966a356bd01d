use log::debug;

use crate::{Camera, DiReservoir, DiReservoirData};

/// Two same-shaped buffers whose logical roles ("written this frame" vs
/// "read-only snapshot of the previous frame") swap at frame boundaries.
///
/// Keeping the roles explicit removes the aliasing hazard of resampling from
/// the same array a pass is writing into.
#[derive(Debug)]
pub struct DoubleBuffered<T> {
    a: T,
    b: T,
    flipped: bool,
}

impl<T> DoubleBuffered<T> {
    pub fn new(a: T, b: T) -> Self {
        Self {
            a,
            b,
            flipped: false,
        }
    }

    pub fn curr(&self) -> &T {
        if self.flipped {
            &self.b
        } else {
            &self.a
        }
    }

    pub fn curr_mut(&mut self) -> &mut T {
        if self.flipped {
            &mut self.b
        } else {
            &mut self.a
        }
    }

    pub fn past(&self) -> &T {
        if self.flipped {
            &self.a
        } else {
            &self.b
        }
    }

    /// Borrows the buffer being written this frame together with the
    /// previous frame's read-only one.
    pub fn curr_mut_and_past(&mut self) -> (&mut T, &T) {
        if self.flipped {
            (&mut self.b, &self.a)
        } else {
            (&mut self.a, &self.b)
        }
    }

    /// Swaps the buffers' logical roles; call once per frame boundary.
    pub fn swap(&mut self) {
        self.flipped = !self.flipped;
    }
}

impl DoubleBuffered<Vec<DiReservoirData>> {
    /// Allocates double-buffered per-pixel reservoir storage for given
    /// camera, both halves starting out empty.
    pub fn for_camera(camera: &Camera) -> Self {
        let size = camera.viewport_size();
        let len = (size.x * size.y) as usize;

        debug!("Allocating reservoir buffers; size={}x{}", size.x, size.y);

        Self::new(
            vec![DiReservoir::default().pack(); len],
            vec![DiReservoir::default().pack(); len],
        )
    }
}
