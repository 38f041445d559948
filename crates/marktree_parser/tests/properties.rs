//! Property tests for the markdown tree builder.

use std::ops::ControlFlow;

use marktree_ast::visitor::walk_node;
use marktree_ast::{Node, NodeType, VisitResult, Visitor};
use marktree_parser::{FailureKind, Options, parse};
use proptest::prelude::*;
use serde_json::Value;

/// Markdown-ish input without `<`, so no raw HTML can appear.
fn markdown_source() -> impl Strategy<Value = String> {
    "[a-z *_`#>\\-\\n|~\\[\\]()!0-9.:]{0,64}"
}

fn options() -> impl Strategy<Value = Options> {
    (any::<bool>(), any::<bool>()).prop_map(|(extended, breaks)| {
        Options::new()
            .with_extended_syntax(extended)
            .with_explicit_line_breaks(breaks)
    })
}

/// Records every node type seen in a tree.
#[derive(Default)]
struct TypeCollector(Vec<NodeType>);

impl<'a> Visitor<'a> for TypeCollector {
    fn enter_node(&mut self, node: &'a Node) -> VisitResult {
        self.0.push(node.node_type);
        ControlFlow::Continue(())
    }
}

/// Checks that `children` is present exactly on container types.
fn children_match_schema(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    let Some(node_type) = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(NodeType::from_tag)
    else {
        return false;
    };

    let children_ok = match object.get("children") {
        Some(Value::Array(children)) => {
            node_type.is_parent() && children.iter().all(children_match_schema)
        }
        Some(_) => false,
        None => !node_type.is_parent(),
    };
    let head_ok = match object.get("head") {
        Some(Value::Array(rows)) => rows.iter().all(children_match_schema),
        Some(_) => false,
        None => true,
    };

    children_ok && head_ok
}

proptest! {
    #[test]
    fn test_html_free_source_always_parses(source in markdown_source(), options in options()) {
        let doc = parse(&source, &options);
        prop_assert!(doc.is_ok(), "{:?}", doc);

        let doc = doc.unwrap();
        prop_assert_eq!(doc.node_type, NodeType::Document);
    }

    #[test]
    fn test_json_round_trip_is_lossless(source in markdown_source(), options in options()) {
        let doc = parse(&source, &options).unwrap();

        let json = serde_json::to_string(&doc).unwrap();
        let back = Node::from_json(&json).unwrap();

        prop_assert_eq!(back, doc);
    }

    #[test]
    fn test_leaf_types_never_serialize_children(source in markdown_source(), options in options()) {
        let doc = parse(&source, &options).unwrap();
        let json = serde_json::to_value(&doc).unwrap();

        prop_assert!(children_match_schema(&json), "{}", json);
    }

    #[test]
    fn test_only_document_sits_at_the_root(source in markdown_source(), options in options()) {
        let doc = parse(&source, &options).unwrap();

        let mut collector = TypeCollector::default();
        let _ = walk_node(&mut collector, &doc);

        prop_assert_eq!(collector.0[0], NodeType::Document);
        prop_assert!(collector.0[1..].iter().all(|t| *t != NodeType::Document));
        prop_assert!(collector.0.iter().all(|t| *t != NodeType::Html));
    }

    #[test]
    fn test_raw_html_always_fails(
        prefix in "[a-z]{0,10}",
        suffix in "[a-z ]{0,10}",
        options in options(),
    ) {
        let source = format!("{prefix}<span>{suffix}");
        let err = parse(&source, &options).unwrap_err();

        prop_assert_eq!(err.kind, FailureKind::RawHtml);
        prop_assert!(err.to_string().contains("raw HTML"));
    }
}
