use glam::Vec3;

/// Identifier of an emissive primitive; [`LightId::NONE`] is the "no sample"
/// sentinel.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LightId(u32);

impl LightId {
    pub const NONE: Self = Self(u32::MAX);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

impl Default for LightId {
    fn default() -> Self {
        Self::NONE
    }
}

/// One candidate produced by the initial-sampling stage: an emissive
/// primitive plus a concrete point sampled on it.
///
/// Immutable once produced; reservoirs move it around wholesale.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct LightSample {
    pub light_id: LightId,
    pub light_point: Vec3,
}

impl LightSample {
    pub fn is_none(&self) -> bool {
        self.light_id.is_none()
    }

    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}
