//! Host-facing node adapters.
//!
//! Each node owns its inputs and output slots. Setters mark outputs dirty;
//! reading a dirty output recomputes it in place (pull evaluation). Engine
//! errors are logged and leave the previous output untouched.

mod attribute;
mod error;
mod lsystem_node;
mod random_node;
mod slot;

pub use attribute::AttributeValue;
pub use error::NodeError;
pub use lsystem_node::{LSystemAttribute, LSystemInstanceNode, LSystemOutput};
pub use random_node::{RandomAttribute, RandomPointNode, sample_points_with};
pub use slot::OutputSlot;

use flora_instancing::InstanceArrays;

/// Attribute-driven node, addressed by host attribute names.
pub trait InstancerNode {
    /// Registered node type name.
    fn type_name(&self) -> &'static str;

    /// Set an input by its long or short name.
    fn set_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), NodeError>;

    /// Pull an output by its long or short name, recomputing it if dirty.
    fn output(&mut self, name: &str) -> Result<&InstanceArrays, NodeError>;

    /// Long names of all outputs.
    fn output_names(&self) -> &'static [&'static str];
}
