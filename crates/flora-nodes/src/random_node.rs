//! Node that scatters uniformly random points inside a box.

use flora_instancing::InstanceArrays;
use glam::Vec3;
use rand::Rng;

use crate::InstancerNode;
use crate::attribute::AttributeValue;
use crate::error::NodeError;
use crate::slot::OutputSlot;

/// Inputs of [`RandomPointNode`]. Bounds can be set whole or per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RandomAttribute {
    NumberOfPoints,
    MinimumBound,
    MinimumBoundX,
    MinimumBoundY,
    MinimumBoundZ,
    MaximumBound,
    MaximumBoundX,
    MaximumBoundY,
    MaximumBoundZ,
}

impl RandomAttribute {
    pub const ALL: [Self; 9] = [
        Self::NumberOfPoints,
        Self::MinimumBound,
        Self::MinimumBoundX,
        Self::MinimumBoundY,
        Self::MinimumBoundZ,
        Self::MaximumBound,
        Self::MaximumBoundX,
        Self::MaximumBoundY,
        Self::MaximumBoundZ,
    ];

    pub fn long_name(self) -> &'static str {
        match self {
            Self::NumberOfPoints => "numberOfPoints",
            Self::MinimumBound => "minimumBound",
            Self::MinimumBoundX => "minimumBoundX",
            Self::MinimumBoundY => "minimumBoundY",
            Self::MinimumBoundZ => "minimumBoundZ",
            Self::MaximumBound => "maximumBound",
            Self::MaximumBoundX => "maximumBoundX",
            Self::MaximumBoundY => "maximumBoundY",
            Self::MaximumBoundZ => "maximumBoundZ",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::NumberOfPoints => "nu",
            Self::MinimumBound => "b",
            Self::MinimumBoundX => "bx",
            Self::MinimumBoundY => "by",
            Self::MinimumBoundZ => "bz",
            Self::MaximumBound => "x",
            Self::MaximumBoundX => "xx",
            Self::MaximumBoundY => "xy",
            Self::MaximumBoundZ => "xz",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.long_name() == name || a.short_name() == name)
    }
}

/// Sample `count` points, each axis drawn as `min + (max - min) * u` with
/// `u` in `[0, 1)`.
///
/// Bounds are not reordered: `min > max` samples the reversed range and
/// `min == max` pins that axis to the bound.
pub fn sample_points_with<R: Rng>(
    rng: &mut R,
    count: usize,
    min: Vec3,
    max: Vec3,
) -> Vec<Vec3> {
    let extent = max - min;
    (0..count)
        .map(|_| {
            let u = Vec3::new(rng.random(), rng.random(), rng.random());
            min + extent * u
        })
        .collect()
}

/// Emits `numberOfPoints` random positions inside the bounds.
///
/// Uses the thread-local RNG, so every recompute gives a new scatter.
#[derive(Debug)]
pub struct RandomPointNode {
    number_of_points: u32,
    minimum_bound: Vec3,
    maximum_bound: Vec3,
    points: OutputSlot,
}

impl Default for RandomPointNode {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPointNode {
    pub const TYPE_NAME: &'static str = "randomNode";
    const OUTPUT_NAME: &'static str = "outPoints";
    const OUTPUT_SHORT_NAME: &'static str = "op";

    pub fn new() -> Self {
        Self {
            number_of_points: 1,
            minimum_bound: Vec3::splat(-5.0),
            maximum_bound: Vec3::splat(5.0),
            points: OutputSlot::default(),
        }
    }

    pub fn number_of_points(&self) -> u32 {
        self.number_of_points
    }

    pub fn minimum_bound(&self) -> Vec3 {
        self.minimum_bound
    }

    pub fn maximum_bound(&self) -> Vec3 {
        self.maximum_bound
    }

    /// Negative counts are clamped to 0.
    pub fn set_number_of_points(&mut self, count: i64) {
        self.number_of_points = count.clamp(0, i64::from(u32::MAX)) as u32;
        self.points.mark_dirty();
    }

    pub fn set_minimum_bound(&mut self, bound: Vec3) {
        self.minimum_bound = bound;
        self.points.mark_dirty();
    }

    pub fn set_maximum_bound(&mut self, bound: Vec3) {
        self.maximum_bound = bound;
        self.points.mark_dirty();
    }

    pub fn is_dirty(&self) -> bool {
        self.points.is_dirty()
    }

    /// Resample with the given RNG and write the output.
    pub fn compute_with<R: Rng>(&mut self, rng: &mut R) {
        let points = sample_points_with(
            rng,
            self.number_of_points as usize,
            self.minimum_bound,
            self.maximum_bound,
        );
        self.points.write(InstanceArrays::from_points(&points));
        tracing::info!(points = points.len(), "finished randomNode generation");
    }

    /// Pull the output, resampling if any input changed.
    pub fn points(&mut self) -> &InstanceArrays {
        if self.points.is_dirty() {
            self.compute_with(&mut rand::rng());
        }
        self.points.value()
    }
}

fn to_vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

impl InstancerNode for RandomPointNode {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn set_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), NodeError> {
        let attribute =
            RandomAttribute::from_name(name).ok_or_else(|| NodeError::UnknownAttribute {
                node: Self::TYPE_NAME,
                name: name.to_string(),
            })?;

        let mut min = self.minimum_bound;
        let mut max = self.maximum_bound;
        match attribute {
            RandomAttribute::NumberOfPoints => {
                self.set_number_of_points(value.as_int(name)?);
                return Ok(());
            }
            RandomAttribute::MinimumBound => min = to_vec3(value.as_float3(name)?),
            RandomAttribute::MinimumBoundX => min.x = value.as_float(name)? as f32,
            RandomAttribute::MinimumBoundY => min.y = value.as_float(name)? as f32,
            RandomAttribute::MinimumBoundZ => min.z = value.as_float(name)? as f32,
            RandomAttribute::MaximumBound => max = to_vec3(value.as_float3(name)?),
            RandomAttribute::MaximumBoundX => max.x = value.as_float(name)? as f32,
            RandomAttribute::MaximumBoundY => max.y = value.as_float(name)? as f32,
            RandomAttribute::MaximumBoundZ => max.z = value.as_float(name)? as f32,
        }
        self.set_minimum_bound(min);
        self.set_maximum_bound(max);
        Ok(())
    }

    fn output(&mut self, name: &str) -> Result<&InstanceArrays, NodeError> {
        if name != Self::OUTPUT_NAME && name != Self::OUTPUT_SHORT_NAME {
            return Err(NodeError::UnknownAttribute {
                node: Self::TYPE_NAME,
                name: name.to_string(),
            });
        }
        Ok(self.points())
    }

    fn output_names(&self) -> &'static [&'static str] {
        &[Self::OUTPUT_NAME]
    }
}
