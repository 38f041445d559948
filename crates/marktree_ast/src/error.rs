//! Schema violation errors.

use thiserror::Error;

use crate::NodeType;

/// Errors raised when a node does not satisfy the field contract of its type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The node carries a field its type does not define.
    #[error("field `{field}` is not part of the `{node_type}` schema")]
    UnexpectedField {
        /// Type of the offending node.
        node_type: NodeType,
        /// Name of the field.
        field: &'static str,
    },

    /// A required field is absent.
    #[error("`{node_type}` requires field `{field}`")]
    MissingField {
        /// Type of the offending node.
        node_type: NodeType,
        /// Name of the field.
        field: &'static str,
    },

    /// A field is present but its value is out of range.
    #[error("invalid `{field}` for `{node_type}`: {message}")]
    InvalidField {
        /// Type of the offending node.
        node_type: NodeType,
        /// Name of the field.
        field: &'static str,
        /// What is wrong with the value.
        message: String,
    },

    /// A leaf-only type was given children.
    #[error("`{node_type}` is a leaf type and cannot have children")]
    UnexpectedChildren {
        /// Type of the offending node.
        node_type: NodeType,
    },

    /// The field data could not be read at all.
    #[error("malformed node: {0}")]
    Malformed(String),
}

impl SchemaError {
    /// Creates a new unexpected field error.
    pub fn unexpected_field(node_type: NodeType, field: &'static str) -> Self {
        Self::UnexpectedField { node_type, field }
    }

    /// Creates a new missing field error.
    pub fn missing_field(node_type: NodeType, field: &'static str) -> Self {
        Self::MissingField { node_type, field }
    }

    /// Creates a new invalid field error.
    pub fn invalid_field(
        node_type: NodeType,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            node_type,
            field,
            message: message.into(),
        }
    }

    /// Creates a new malformed node error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
