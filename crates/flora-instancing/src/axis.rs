//! Coordinate conventions between the engine and the instancing host.

use glam::Vec3;

/// How engine-space vectors map into host space.
///
/// The engine grows plants along +Z; the host is Y-up. Swapping Y and Z puts
/// engine up on host up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisConvention {
    /// `(x, y, z) -> (x, z, y)`.
    #[default]
    EngineToHost,
    /// No change.
    Identity,
}

impl AxisConvention {
    /// Map a position or direction into host space.
    pub fn apply(self, v: Vec3) -> Vec3 {
        match self {
            Self::EngineToHost => Vec3::new(v.x, v.z, v.y),
            Self::Identity => v,
        }
    }
}
