//! Visitor pattern for AST traversal.
//!
//! - [`Visitor`] - Read-only traversal trait
//! - [`walk_node`] - Dispatch function for type-specific visitors
//! - [`walk_children`] - Traverse all children of a node
//!
//! # Example
//!
//! ```rust
//! use marktree_ast::Node;
//! use marktree_ast::construct::{document, em, paragraph};
//! use marktree_ast::visitor::{Visitor, VisitResult, walk_node};
//! use marktree_ast::children;
//! use std::ops::ControlFlow;
//!
//! struct TextCollector<'a> {
//!     texts: Vec<&'a str>,
//! }
//!
//! impl<'a> Visitor<'a> for TextCollector<'a> {
//!     fn visit_text(&mut self, node: &'a Node) -> VisitResult {
//!         if let Some(text) = node.text() {
//!             self.texts.push(text);
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let doc = document([paragraph(children!["foo ", em(["bar"])])]);
//!
//! let mut collector = TextCollector { texts: Vec::new() };
//! let _ = walk_node(&mut collector, &doc);
//! assert_eq!(collector.texts, vec!["foo ", "bar"]);
//! ```

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{walk_children, walk_node};
