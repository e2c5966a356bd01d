mod di;

pub use self::di::*;
use crate::WhiteNoise;

/// Weighted-reservoir-sampling container: one retained sample plus the
/// streaming statistics needed to keep combining it with other reservoirs.
///
/// `w_sum` is the exact running sum of all candidate weights seen so far,
/// `m` counts (possibly fractionally) how many candidates contributed, and
/// `w` is the finalized unbiased contribution weight - it stays zero until
/// [`Self::finalize()`] runs.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Reservoir<T> {
    pub sample: T,
    pub w_sum: f32,
    pub m: f32,
    pub w: f32,
}

impl<T> Reservoir<T>
where
    T: Clone + Copy,
{
    /// Folds one candidate in; returns whether it became the retained sample.
    ///
    /// The candidate is retained with probability `weight / w_sum`; a
    /// zero-weight candidate still contributes to the `m` / `w_sum`
    /// bookkeeping but can never be selected.
    pub fn update(
        &mut self,
        wnoise: &mut WhiteNoise,
        sample: T,
        weight: f32,
        m: f32,
    ) -> bool {
        self.m += m;
        self.w_sum += weight;

        if weight <= 0.0 {
            return false;
        }

        if wnoise.sample() * self.w_sum <= weight {
            self.sample = sample;
            true
        } else {
            false
        }
    }

    /// Folds another reservoir in, carrying its confidence along; `weight` is
    /// the full resampling weight the caller computed for it.
    pub fn merge(
        &mut self,
        wnoise: &mut WhiteNoise,
        rhs: &Self,
        weight: f32,
    ) -> bool {
        if rhs.m <= 0.0 {
            return false;
        }

        self.update(wnoise, rhs.sample, weight, rhs.m)
    }

    /// Turns `w_sum` into the unbiased contribution weight.
    ///
    /// `pdf` is the target function of the retained sample at the surface the
    /// reservoir now lives on; `norm_num` / `norm_denom` come from the active
    /// normalization policy. Degenerate denominators yield a zero-radiance
    /// reservoir instead of NaN.
    pub fn finalize(&mut self, pdf: f32, norm_num: f32, norm_denom: f32) {
        let denom = pdf * norm_denom;

        self.w = if denom == 0.0 {
            0.0
        } else {
            (self.w_sum * norm_num) / denom
        };
    }

    pub fn clamp_m(&mut self, max: f32) {
        self.m = self.m.min(max);
    }
}
