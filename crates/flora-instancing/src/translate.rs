//! Branch and flower translation into instance records.

use flora_lsystem::{BranchSegment, FlowerPoint};
use glam::Vec3;

use crate::arrays::InstanceRecord;
use crate::axis::AxisConvention;

/// Y/Z scale of every branch instance.
pub const BRANCH_WIDTH: f32 = 0.25;
/// Uniform scale of every flower instance.
pub const FLOWER_SCALE: f32 = 0.25;
/// Aim direction given to every flower; flower orientation is not carried over.
pub const FLOWER_AIM: Vec3 = Vec3::Z;

/// Converts engine geometry into host-space instance records.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryTranslator {
    pub axes: AxisConvention,
    pub branch_width: f32,
    pub flower_scale: f32,
}

impl Default for GeometryTranslator {
    fn default() -> Self {
        Self {
            axes: AxisConvention::EngineToHost,
            branch_width: BRANCH_WIDTH,
            flower_scale: FLOWER_SCALE,
        }
    }
}

impl GeometryTranslator {
    /// One record per segment, ids from 0.
    ///
    /// Position is the segment midpoint and scale is
    /// `(length, branch_width, branch_width)`. A zero-length segment gets a
    /// zero aim direction.
    pub fn translate_branches(&self, segments: &[BranchSegment]) -> Vec<InstanceRecord> {
        segments
            .iter()
            .enumerate()
            .map(|(id, segment)| {
                let midpoint = (segment.start + segment.end) * 0.5;
                let delta = self.axes.apply(segment.end - segment.start);
                InstanceRecord {
                    id: id as u32,
                    position: self.axes.apply(midpoint),
                    scale: Vec3::new(delta.length(), self.branch_width, self.branch_width),
                    aim_direction: delta.normalize_or_zero(),
                }
            })
            .collect()
    }

    /// One record per flower, ids from 0, with constant scale and aim.
    pub fn translate_flowers(&self, flowers: &[FlowerPoint]) -> Vec<InstanceRecord> {
        flowers
            .iter()
            .enumerate()
            .map(|(id, flower)| InstanceRecord {
                id: id as u32,
                position: self.axes.apply(flower.position),
                scale: Vec3::splat(self.flower_scale),
                aim_direction: FLOWER_AIM,
            })
            .collect()
    }
}

/// [`GeometryTranslator::translate_branches`] with default settings.
pub fn translate_branches(segments: &[BranchSegment]) -> Vec<InstanceRecord> {
    GeometryTranslator::default().translate_branches(segments)
}

/// [`GeometryTranslator::translate_flowers`] with default settings.
pub fn translate_flowers(flowers: &[FlowerPoint]) -> Vec<InstanceRecord> {
    GeometryTranslator::default().translate_flowers(flowers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn segment(start: Vec3, end: Vec3) -> BranchSegment {
        BranchSegment { start, end }
    }

    fn flower(position: Vec3) -> FlowerPoint {
        FlowerPoint {
            position,
            orientation: Quat::from_rotation_x(0.7),
        }
    }

    #[test]
    fn test_branch_record() {
        let records = translate_branches(&[segment(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0))]);
        let r = records[0];
        assert_eq!(r.id, 0);
        // Engine +Z becomes host +Y.
        assert_eq!(r.position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(r.scale, Vec3::new(2.0, 0.25, 0.25));
        assert_eq!(r.aim_direction, Vec3::Y);
    }

    #[test]
    fn test_branch_axis_swap() {
        let records = translate_branches(&[segment(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(1.0, 6.0, 3.0),
        )]);
        assert_eq!(records[0].position, Vec3::new(1.0, 3.0, 4.0));
        assert_eq!(records[0].aim_direction, Vec3::Z);
    }

    #[test]
    fn test_aim_is_unit_length() {
        let records = translate_branches(&[
            segment(Vec3::ZERO, Vec3::new(3.0, 4.0, 12.0)),
            segment(Vec3::ONE, Vec3::new(-2.0, 0.5, 7.0)),
        ]);
        for r in records {
            assert!((r.aim_direction.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_length_branch() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let r = translate_branches(&[segment(p, p)])[0];
        assert_eq!(r.aim_direction, Vec3::ZERO);
        assert!(!r.aim_direction.is_nan());
        assert_eq!(r.scale.x, 0.0);
        assert_eq!(r.position, Vec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_output_lengths_match_input() {
        let segments: Vec<_> = (0..17)
            .map(|i| segment(Vec3::splat(i as f32), Vec3::splat(i as f32 + 1.0)))
            .collect();
        let flowers: Vec<_> = (0..5).map(|i| flower(Vec3::splat(i as f32))).collect();

        let branches = translate_branches(&segments);
        assert_eq!(branches.len(), segments.len());
        assert!(branches.iter().enumerate().all(|(i, r)| r.id == i as u32));
        assert_eq!(translate_flowers(&flowers).len(), flowers.len());
        assert!(translate_branches(&[]).is_empty());
    }

    #[test]
    fn test_flower_record() {
        let records = translate_flowers(&[flower(Vec3::new(1.0, 2.0, 3.0)), flower(Vec3::ZERO)]);
        assert_eq!(records[0].position, Vec3::new(1.0, 3.0, 2.0));
        assert_eq!(records[0].scale, Vec3::splat(0.25));
        assert_eq!(records[0].aim_direction, Vec3::Z);
        assert_eq!(records[1].id, 1);
    }

    #[test]
    fn test_custom_translator() {
        let translator = GeometryTranslator {
            axes: AxisConvention::Identity,
            branch_width: 0.1,
            flower_scale: 2.0,
        };
        let b = translator.translate_branches(&[segment(Vec3::ZERO, Vec3::Z)])[0];
        assert_eq!(b.scale, Vec3::new(1.0, 0.1, 0.1));
        assert_eq!(b.aim_direction, Vec3::Z);
        let f = translator.translate_flowers(&[flower(Vec3::new(1.0, 2.0, 3.0))])[0];
        assert_eq!(f.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(f.scale, Vec3::splat(2.0));
    }
}
