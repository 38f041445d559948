//! Visitor trait for traversing AST nodes.
//!
//! Each `visit_*` method has a default implementation that walks children,
//! so implementors only override the node types they care about.

use std::ops::ControlFlow;

use crate::Node;

use super::walk::{walk_children, walk_node};

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - continue visiting
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Visitor trait for traversing AST nodes without modification.
///
/// The `'a` lifetime is the lifetime of the visited tree, so visitors may keep
/// references into it.
pub trait Visitor<'a>: Sized {
    /// Called before visiting any node.
    #[inline]
    fn enter_node(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after visiting a node and all its children.
    #[inline]
    fn exit_node(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Visits any node by dispatching to the type-specific method.
    #[inline]
    fn visit_node(&mut self, node: &'a Node) -> VisitResult {
        walk_node(self, node)
    }

    // === Block-level node visitors ===

    fn visit_document(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_paragraph(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_heading(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_code(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(()) // Leaf node
    }

    fn visit_block_quote(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_horizontal_rule(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(()) // Leaf node
    }

    fn visit_list(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_list_item(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    /// Visit a Table node. The default walks header rows, then body rows.
    fn visit_table(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_table_row(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_table_cell(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    // === Inline-level node visitors ===

    fn visit_strong(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_emphasis(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_delete(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_code_span(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(()) // Leaf node
    }

    fn visit_link(&mut self, node: &'a Node) -> VisitResult {
        walk_children(self, node)
    }

    fn visit_image(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(()) // Leaf node
    }

    fn visit_break(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(()) // Leaf node
    }

    fn visit_text(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(()) // Text leaf
    }

    fn visit_html(&mut self, _node: &'a Node) -> VisitResult {
        ControlFlow::Continue(()) // Leaf node
    }
}
