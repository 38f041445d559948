//! Manual node construction.
//!
//! [`md`] builds any node from its type tag, a JSON object of data fields and
//! an optional child list, checking the result against the schema. The typed
//! shorthands below it cannot fail and are what tests and programmatic tree
//! construction normally use.
//!
//! Children may be given as bare strings, which are wrapped into `text` nodes,
//! or as already built nodes. Mix both with the [`children!`](crate::children)
//! macro:
//!
//! ```rust
//! use marktree_ast::children;
//! use marktree_ast::construct::{em, paragraph};
//!
//! let node = paragraph(children!["foo ", em(["bar"])]);
//! assert_eq!(node.children.len(), 2);
//! ```

use serde_json::Value;

use crate::node::RawNode;
use crate::{Align, Node, NodeData, NodeType, SchemaError};

/// A positional child: literal text or a built node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Text(String),
    Node(Node),
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<Child> for Node {
    fn from(child: Child) -> Self {
        match child {
            Child::Text(content) => text(content),
            Child::Node(node) => node,
        }
    }
}

/// Builds a child list from mixed strings and nodes.
#[macro_export]
macro_rules! children {
    ($($child:expr),* $(,)?) => {
        ::std::vec::Vec::<$crate::Child>::from([$($crate::Child::from($child)),*])
    };
}

fn collect<I>(children: I) -> Vec<Node>
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    children
        .into_iter()
        .map(|child| Node::from(child.into()))
        .collect()
}

/// Builds a node from a type, a JSON object of data fields and optional children.
///
/// `fields` holds everything except `type` and `children`; pass
/// `serde_json::json!({})` for types without data.
///
/// # Example
///
/// ```rust
/// use marktree_ast::{md, NodeType};
/// use serde_json::json;
///
/// let heading = md(
///     NodeType::Heading,
///     json!({ "level": 1, "content": "Title" }),
///     Some(vec!["Title".into()]),
/// )
/// .unwrap();
///
/// assert_eq!(heading.children[0].text(), Some("Title"));
/// ```
pub fn md(
    node_type: NodeType,
    fields: Value,
    children: Option<Vec<Child>>,
) -> Result<Node, SchemaError> {
    let Value::Object(mut fields) = fields else {
        return Err(SchemaError::malformed("node fields must be a JSON object"));
    };
    for reserved in ["type", "children"] {
        if fields.contains_key(reserved) {
            return Err(SchemaError::unexpected_field(node_type, reserved));
        }
    }

    fields.insert(
        "type".to_string(),
        Value::String(node_type.tag().to_string()),
    );
    let mut raw: RawNode = serde_json::from_value(Value::Object(fields))
        .map_err(|e| SchemaError::malformed(e.to_string()))?;
    raw.children = children.map(collect);

    Node::try_from(raw)
}

/// Creates a `text` node.
pub fn text(content: impl Into<String>) -> Node {
    Node::new_text(NodeType::Text, content)
}

/// Creates a `document` node.
pub fn document<I>(children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::Document, collect(children))
}

/// Creates a `paragraph` node.
pub fn paragraph<I>(children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::Paragraph, collect(children))
}

/// Creates a `heading` node. `level` must be between 1 and 6.
pub fn heading<I>(level: u8, content: impl Into<String>, children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::Heading, collect(children))
        .with_data(NodeData::heading(level))
        .with_content(content)
}

/// Creates a `code` block node.
pub fn code(content: impl Into<String>, lang: Option<&str>) -> Node {
    Node::new_text(NodeType::Code, content).with_data(NodeData::code_block(lang))
}

/// Creates a `codespan` node.
pub fn codespan(content: impl Into<String>) -> Node {
    Node::new_text(NodeType::CodeSpan, content)
}

/// Creates an `html` node.
pub fn html(content: impl Into<String>) -> Node {
    Node::new_text(NodeType::Html, content)
}

/// Creates a `blockquote` node.
pub fn blockquote<I>(children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::BlockQuote, collect(children))
}

/// Creates an `hr` node.
pub fn hr() -> Node {
    Node::new_leaf(NodeType::HorizontalRule)
}

/// Creates a `list` node.
pub fn list<I>(ordered: bool, children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::List, collect(children)).with_data(NodeData::list(ordered))
}

/// Creates a `listitem` node.
pub fn listitem<I>(children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::ListItem, collect(children))
}

/// Creates a `listitem` node for a task list entry.
pub fn task_item<I>(checked: bool, children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    listitem(children).with_data(NodeData::task(checked))
}

/// Creates a `table` node from header rows and body rows.
pub fn table<H, B>(head: H, body: B) -> Node
where
    H: IntoIterator<Item = Node>,
    B: IntoIterator<Item = Node>,
{
    Node::new_parent(NodeType::Table, body.into_iter().collect())
        .with_data(NodeData::table(head.into_iter().collect()))
}

/// Creates a `tablerow` node.
pub fn tablerow<I>(children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::TableRow, collect(children))
}

/// Creates a `tablecell` node.
pub fn tablecell<I>(header: bool, align: Align, children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::TableCell, collect(children))
        .with_data(NodeData::table_cell(header, align))
}

/// Creates a `strong` node.
pub fn strong<I>(children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::Strong, collect(children))
}

/// Creates an `em` node.
pub fn em<I>(children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::Emphasis, collect(children))
}

/// Creates a `del` node.
pub fn del<I>(children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::Delete, collect(children))
}

/// Creates a `br` node.
pub fn br() -> Node {
    Node::new_leaf(NodeType::Break)
}

/// Creates a `link` node.
pub fn link<I>(href: impl Into<String>, title: Option<&str>, children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Child>,
{
    Node::new_parent(NodeType::Link, collect(children)).with_data(NodeData::link(href, title))
}

/// Creates an `image` node. Pass `""` for an image without a title.
pub fn image(href: impl Into<String>, text: impl Into<String>, title: impl Into<String>) -> Node {
    Node::new_leaf(NodeType::Image).with_data(NodeData::image(href, text, title))
}
