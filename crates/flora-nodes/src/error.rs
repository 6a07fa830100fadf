//! Node adapter errors.

use flora_lsystem::LSystemError;

#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// No input or output with this name on the node.
    #[error("{node} has no attribute '{name}'")]
    UnknownAttribute { node: &'static str, name: String },

    /// The value's type does not match the attribute.
    #[error("attribute '{name}' expects {expected}, got {found}")]
    AttributeType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Grammar loading or interpretation failed.
    #[error(transparent)]
    Engine(#[from] LSystemError),
}
