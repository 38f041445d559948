//! Walk functions for AST traversal.

use std::ops::ControlFlow;

use crate::{Node, NodeType};

use super::visit::{VisitResult, Visitor};

/// Walks a node by dispatching to the appropriate type-specific visitor method.
///
/// Calls `enter_node`, then the `visit_*` method for the node type, then
/// `exit_node`. A `Break` from any of them stops the walk.
pub fn walk_node<'a, V>(visitor: &mut V, node: &'a Node) -> VisitResult
where
    V: Visitor<'a>,
{
    visitor.enter_node(node)?;

    let result = match node.node_type {
        // Block-level nodes
        NodeType::Document => visitor.visit_document(node),
        NodeType::Paragraph => visitor.visit_paragraph(node),
        NodeType::Heading => visitor.visit_heading(node),
        NodeType::Code => visitor.visit_code(node),
        NodeType::BlockQuote => visitor.visit_block_quote(node),
        NodeType::HorizontalRule => visitor.visit_horizontal_rule(node),
        NodeType::List => visitor.visit_list(node),
        NodeType::ListItem => visitor.visit_list_item(node),
        NodeType::Table => visitor.visit_table(node),
        NodeType::TableRow => visitor.visit_table_row(node),
        NodeType::TableCell => visitor.visit_table_cell(node),

        // Inline-level nodes
        NodeType::Strong => visitor.visit_strong(node),
        NodeType::Emphasis => visitor.visit_emphasis(node),
        NodeType::Delete => visitor.visit_delete(node),
        NodeType::CodeSpan => visitor.visit_code_span(node),
        NodeType::Link => visitor.visit_link(node),
        NodeType::Image => visitor.visit_image(node),
        NodeType::Break => visitor.visit_break(node),
        NodeType::Text => visitor.visit_text(node),
        NodeType::Html => visitor.visit_html(node),
    };

    result?;

    visitor.exit_node(node)
}

/// Walks all children of a node.
///
/// For tables the header rows in `head` are walked before the body rows.
#[inline]
pub fn walk_children<'a, V>(visitor: &mut V, node: &'a Node) -> VisitResult
where
    V: Visitor<'a>,
{
    for child in node.head().iter().chain(&node.children) {
        walk_node(visitor, child)?;
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Align;
    use crate::children;
    use crate::construct::*;

    /// A simple visitor that counts nodes of each type.
    #[derive(Default)]
    struct NodeCounter {
        document_count: usize,
        paragraph_count: usize,
        text_count: usize,
        total_count: usize,
        exit_count: usize,
    }

    impl<'a> Visitor<'a> for NodeCounter {
        fn enter_node(&mut self, _node: &'a Node) -> VisitResult {
            self.total_count += 1;
            ControlFlow::Continue(())
        }

        fn exit_node(&mut self, _node: &'a Node) -> VisitResult {
            self.exit_count += 1;
            ControlFlow::Continue(())
        }

        fn visit_document(&mut self, node: &'a Node) -> VisitResult {
            self.document_count += 1;
            walk_children(self, node)
        }

        fn visit_paragraph(&mut self, node: &'a Node) -> VisitResult {
            self.paragraph_count += 1;
            walk_children(self, node)
        }

        fn visit_text(&mut self, _node: &'a Node) -> VisitResult {
            self.text_count += 1;
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn walk_node_visits_single_text_node() {
        let node = text("hello");

        let mut counter = NodeCounter::default();
        let result = walk_node(&mut counter, &node);

        assert!(result.is_continue());
        assert_eq!(counter.text_count, 1);
        assert_eq!(counter.total_count, 1);
    }

    #[test]
    fn walk_node_visits_nested_tree() {
        let doc = document([
            paragraph(children!["hello ", strong(["world"])]),
            paragraph(["again"]),
        ]);

        let mut counter = NodeCounter::default();
        let result = walk_node(&mut counter, &doc);

        assert!(result.is_continue());
        assert_eq!(counter.document_count, 1);
        assert_eq!(counter.paragraph_count, 2);
        assert_eq!(counter.text_count, 3);
        assert_eq!(counter.total_count, 7);
        assert_eq!(counter.exit_count, 7);
    }

    #[test]
    fn walk_children_includes_table_head() {
        let doc = document([table(
            [tablerow([tablecell(true, Align::None, ["h"])])],
            [tablerow([tablecell(false, Align::None, ["b"])])],
        )]);

        struct Texts(Vec<String>);
        impl<'a> Visitor<'a> for Texts {
            fn visit_text(&mut self, node: &'a Node) -> VisitResult {
                self.0.extend(node.text().map(str::to_string));
                ControlFlow::Continue(())
            }
        }

        let mut texts = Texts(Vec::new());
        let _ = walk_node(&mut texts, &doc);
        assert_eq!(texts.0, vec!["h", "b"]);
    }

    #[test]
    fn walk_stops_on_break() {
        struct StopAtFirstText {
            seen: usize,
        }

        impl<'a> Visitor<'a> for StopAtFirstText {
            fn visit_text(&mut self, _node: &'a Node) -> VisitResult {
                self.seen += 1;
                ControlFlow::Break(())
            }
        }

        let doc = document([paragraph(["one"]), paragraph(["two"])]);
        let mut visitor = StopAtFirstText { seen: 0 };

        assert!(walk_node(&mut visitor, &doc).is_break());
        assert_eq!(visitor.seen, 1);
    }
}
