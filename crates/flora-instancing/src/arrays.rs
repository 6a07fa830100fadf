//! Instance records and the host's parallel-array instancing format.

use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Placement of one instanced object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceRecord {
    pub id: u32,
    pub position: Vec3,
    pub scale: Vec3,
    /// Unit vector, or zero for degenerate branches.
    pub aim_direction: Vec3,
}

/// Index-aligned instancing channels, as consumed by the host instancer.
///
/// Record `i` lives at index `i` of every populated channel. Point clouds fill
/// only `id` and `position`; `scale` and `aim_direction` then stay empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceArrays {
    pub id: Vec<f64>,
    pub position: Vec<DVec3>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scale: Vec<DVec3>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aim_direction: Vec<DVec3>,
}

impl InstanceArrays {
    /// Pack records into all four channels.
    pub fn from_records(records: &[InstanceRecord]) -> Self {
        let mut arrays = Self::with_capacity(records.len());
        for record in records {
            arrays.id.push(f64::from(record.id));
            arrays.position.push(record.position.as_dvec3());
            arrays.scale.push(record.scale.as_dvec3());
            arrays.aim_direction.push(record.aim_direction.as_dvec3());
        }
        arrays
    }

    /// Pack bare positions with sequential ids into `id` and `position`.
    pub fn from_points(points: &[Vec3]) -> Self {
        Self {
            id: (0..points.len()).map(|i| i as f64).collect(),
            position: points.iter().map(|p| p.as_dvec3()).collect(),
            scale: Vec::new(),
            aim_direction: Vec::new(),
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            id: Vec::with_capacity(capacity),
            position: Vec::with_capacity(capacity),
            scale: Vec::with_capacity(capacity),
            aim_direction: Vec::with_capacity(capacity),
        }
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Every populated channel has exactly `len()` entries.
    pub fn is_aligned(&self) -> bool {
        let n = self.len();
        let optional_ok = |len: usize| len == 0 || len == n;
        self.position.len() == n
            && optional_ok(self.scale.len())
            && optional_ok(self.aim_direction.len())
    }
}
