//! Geometry translation from L-system output to host instancing arrays.

mod arrays;
mod axis;
mod translate;

pub use arrays::{InstanceArrays, InstanceRecord};
pub use axis::AxisConvention;
pub use translate::{
    BRANCH_WIDTH, FLOWER_AIM, FLOWER_SCALE, GeometryTranslator, translate_branches,
    translate_flowers,
};
