//! # marktree_ast
//!
//! Node schema of the marktree markdown AST.
//!
//! This crate provides the closed set of node types produced by the
//! `marktree_parser` tree builder, the field contract of each type, and a
//! manual constructor for building trees by hand.
//!
//! ## Architecture
//!
//! - A [`Node`] owns its children; trees are plain values that can be cloned,
//!   compared and serialized
//! - Every [`NodeType`] has exactly one [`NodeSchema`] naming the data fields
//!   it may carry and whether it has children
//! - Deserialization and [`md`] reject nodes that violate their schema
//!
//! ## Example
//!
//! ```rust
//! use marktree_ast::children;
//! use marktree_ast::construct::{document, heading, paragraph, strong};
//!
//! let doc = document([
//!     heading(1, "Title", ["Title"]),
//!     paragraph(children!["This is ", strong(["bold"]), " text."]),
//! ]);
//!
//! let json = serde_json::to_value(&doc).unwrap();
//! assert_eq!(json["children"][0]["level"], 1);
//! ```

pub mod construct;
mod error;
mod node;
mod node_type;
mod schema;
pub mod visitor;

pub use construct::{Child, md};
pub use error::SchemaError;
pub use node::{Align, CellData, ImageData, LinkData, Node, NodeData};
pub use node_type::NodeType;
pub use schema::{FieldKind, FieldSpec, NodeSchema};

// Re-export commonly used visitor items for convenience
pub use visitor::{VisitResult, Visitor};
