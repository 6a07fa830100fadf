//! Dynamically typed attribute values, as delivered by the host.

use crate::error::NodeError;

#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Float3([f64; 3]),
}

impl AttributeValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Float3(_) => "float3",
        }
    }

    pub fn as_int(&self, name: &str) -> Result<i64, NodeError> {
        match self {
            Self::Int(v) => Ok(*v),
            _ => Err(self.mismatch(name, "int")),
        }
    }

    /// Ints are widened.
    pub fn as_float(&self, name: &str) -> Result<f64, NodeError> {
        match self {
            Self::Float(v) => Ok(*v),
            Self::Int(v) => Ok(*v as f64),
            _ => Err(self.mismatch(name, "float")),
        }
    }

    pub fn as_bool(&self, name: &str) -> Result<bool, NodeError> {
        match self {
            Self::Bool(v) => Ok(*v),
            _ => Err(self.mismatch(name, "bool")),
        }
    }

    pub fn into_string(self, name: &str) -> Result<String, NodeError> {
        match self {
            Self::String(v) => Ok(v),
            other => Err(other.mismatch(name, "string")),
        }
    }

    pub fn as_float3(&self, name: &str) -> Result<[f64; 3], NodeError> {
        match self {
            Self::Float3(v) => Ok(*v),
            _ => Err(self.mismatch(name, "float3")),
        }
    }

    fn mismatch(&self, name: &str, expected: &'static str) -> NodeError {
        NodeError::AttributeType {
            name: name.to_string(),
            expected,
            found: self.kind(),
        }
    }
}
