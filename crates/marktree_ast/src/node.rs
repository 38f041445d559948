//! Node definition.
//!
//! The core AST node type. A node owns its children, and its serialized form
//! is a flat JSON object: `type`, the type-specific data fields, and
//! `children` for container types.

use serde::{Deserialize, Serialize};

use crate::{NodeType, SchemaError};

/// A node in the markdown AST.
///
/// # Example
///
/// ```rust
/// use marktree_ast::{Node, NodeType};
///
/// let text = Node::new_text(NodeType::Text, "hello");
/// let paragraph = Node::new_parent(NodeType::Paragraph, vec![text]);
///
/// assert_eq!(paragraph.children[0].text(), Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Node {
    /// The type of this node.
    pub node_type: NodeType,

    /// Literal content (text runs, code, code spans, raw markup, heading text).
    pub content: Option<String>,

    /// Additional node-specific data.
    pub data: NodeData,

    /// Child nodes (empty for leaf types).
    pub children: Vec<Node>,
}

/// Type-specific data of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeData {
    #[default]
    None,
    /// Heading level (1-6).
    Heading(u8),
    /// Code block language.
    CodeBlock(Option<String>),
    /// Whether the list is ordered.
    List(bool),
    /// Task list item state.
    Task(bool),
    Link(LinkData),
    Image(ImageData),
    /// Header rows of a table.
    Table(Vec<Node>),
    TableCell(CellData),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkData {
    pub href: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub href: String,
    /// Alternative text.
    pub text: String,
    /// Title, empty when the source has none.
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellData {
    pub header: bool,
    pub align: Align,
}

/// Column alignment of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// No explicit alignment, serialized as `""`.
    #[default]
    #[serde(rename = "")]
    None,
    Left,
    Right,
    Center,
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{Error, SerializeStruct};

        let has_children = self.node_type.schema().has_children;
        if !has_children && !self.children.is_empty() {
            return Err(S::Error::custom(format!(
                "`{}` is a leaf type and cannot have children",
                self.node_type
            )));
        }

        let mut len = 1; // type
        if has_children {
            len += 1;
        }
        if self.content.is_some() {
            len += 1;
        }
        len += self.data.present_field_count();

        let mut state = serializer.serialize_struct("Node", len)?;

        state.serialize_field("type", &self.node_type)?;
        self.data.serialize_fields(&mut state)?;

        if let Some(content) = &self.content {
            state.serialize_field("content", content)?;
        }

        if has_children {
            state.serialize_field("children", &self.children)?;
        }

        state.end()
    }
}

impl Node {
    /// Creates a new parent node with children.
    #[inline]
    pub fn new_parent(node_type: NodeType, children: Vec<Node>) -> Self {
        Self {
            node_type,
            content: None,
            data: NodeData::None,
            children,
        }
    }

    /// Creates a new text node with content.
    #[inline]
    pub fn new_text(node_type: NodeType, content: impl Into<String>) -> Self {
        Self {
            node_type,
            content: Some(content.into()),
            data: NodeData::None,
            children: Vec::new(),
        }
    }

    /// Creates a new leaf node (no children, no content).
    #[inline]
    pub fn new_leaf(node_type: NodeType) -> Self {
        Self {
            node_type,
            content: None,
            data: NodeData::None,
            children: Vec::new(),
        }
    }

    /// Replaces the node-specific data.
    #[inline]
    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = data;
        self
    }

    /// Replaces the content.
    #[inline]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Returns true if this node has children.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns true if this node is a text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        self.node_type.is_text()
    }

    /// Returns the literal content of this node, if any.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the header rows of a table (empty for other types).
    pub fn head(&self) -> &[Node] {
        match &self.data {
            NodeData::Table(head) => head,
            _ => &[],
        }
    }

    /// Reads a node from its JSON form.
    ///
    /// Each tree level takes two JSON nesting levels, so deeply nested
    /// documents exceed `serde_json`'s default recursion limit. This reader
    /// lifts the limit and grows the stack on demand instead.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();

        let node = Node::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Ok(node)
    }
}

impl NodeData {
    /// Returns the number of serialized fields.
    fn present_field_count(&self) -> usize {
        match self {
            NodeData::None => 0,
            NodeData::Heading(_) => 1,
            NodeData::CodeBlock(lang) => usize::from(lang.is_some()),
            NodeData::List(_) => 1,
            NodeData::Task(_) => 1,
            NodeData::Link(link) => 1 + usize::from(link.title.is_some()),
            NodeData::Image(_) => 3,
            NodeData::Table(_) => 1,
            NodeData::TableCell(_) => 2,
        }
    }

    /// Serializes present fields into the given struct serializer state.
    fn serialize_fields<S: serde::ser::SerializeStruct>(
        &self,
        state: &mut S,
    ) -> Result<(), S::Error> {
        match self {
            NodeData::None => {}
            NodeData::Heading(level) => {
                state.serialize_field("level", level)?;
            }
            NodeData::CodeBlock(lang) => {
                if let Some(lang) = lang {
                    state.serialize_field("lang", lang)?;
                }
            }
            NodeData::List(ordered) => {
                state.serialize_field("ordered", ordered)?;
            }
            NodeData::Task(checked) => {
                state.serialize_field("checked", checked)?;
            }
            NodeData::Link(link) => {
                state.serialize_field("href", &link.href)?;
                if let Some(title) = &link.title {
                    state.serialize_field("title", title)?;
                }
            }
            NodeData::Image(image) => {
                state.serialize_field("href", &image.href)?;
                state.serialize_field("text", &image.text)?;
                state.serialize_field("title", &image.title)?;
            }
            NodeData::Table(head) => {
                state.serialize_field("head", head)?;
            }
            NodeData::TableCell(cell) => {
                state.serialize_field("header", &cell.header)?;
                state.serialize_field("align", &cell.align)?;
            }
        }
        Ok(())
    }

    /// Creates node data for a heading.
    #[inline]
    pub const fn heading(level: u8) -> Self {
        Self::Heading(level)
    }

    /// Creates node data for a code block.
    #[inline]
    pub fn code_block(lang: Option<impl Into<String>>) -> Self {
        Self::CodeBlock(lang.map(Into::into))
    }

    /// Creates node data for a list.
    #[inline]
    pub const fn list(ordered: bool) -> Self {
        Self::List(ordered)
    }

    /// Creates node data for a task list item.
    #[inline]
    pub const fn task(checked: bool) -> Self {
        Self::Task(checked)
    }

    /// Creates node data for a link.
    #[inline]
    pub fn link(href: impl Into<String>, title: Option<impl Into<String>>) -> Self {
        Self::Link(LinkData {
            href: href.into(),
            title: title.map(Into::into),
        })
    }

    /// Creates node data for an image.
    #[inline]
    pub fn image(
        href: impl Into<String>,
        text: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self::Image(ImageData {
            href: href.into(),
            text: text.into(),
            title: title.into(),
        })
    }

    /// Creates node data for a table with the given header rows.
    #[inline]
    pub fn table(head: Vec<Node>) -> Self {
        Self::Table(head)
    }

    /// Creates node data for a table cell.
    #[inline]
    pub const fn table_cell(header: bool, align: Align) -> Self {
        Self::TableCell(CellData { header, align })
    }
}

/// Wire form of a node, checked against the schema before becoming a [`Node`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawNode {
    #[serde(rename = "type")]
    pub(crate) node_type: Option<NodeType>,
    pub(crate) content: Option<String>,
    pub(crate) level: Option<u8>,
    pub(crate) lang: Option<String>,
    pub(crate) ordered: Option<bool>,
    pub(crate) checked: Option<bool>,
    pub(crate) href: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) head: Option<Vec<Node>>,
    pub(crate) header: Option<bool>,
    pub(crate) align: Option<Align>,
    pub(crate) children: Option<Vec<Node>>,
}

impl RawNode {
    /// Names of the data fields present on this node.
    fn present_fields(&self) -> Vec<&'static str> {
        [
            ("content", self.content.is_some()),
            ("level", self.level.is_some()),
            ("lang", self.lang.is_some()),
            ("ordered", self.ordered.is_some()),
            ("checked", self.checked.is_some()),
            ("href", self.href.is_some()),
            ("title", self.title.is_some()),
            ("text", self.text.is_some()),
            ("head", self.head.is_some()),
            ("header", self.header.is_some()),
            ("align", self.align.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

impl TryFrom<RawNode> for Node {
    type Error = SchemaError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let node_type = raw
            .node_type
            .ok_or_else(|| SchemaError::malformed("missing field `type`"))?;
        let schema = node_type.schema();

        let present = raw.present_fields();
        for &name in &present {
            if schema.field(name).is_none() {
                return Err(SchemaError::unexpected_field(node_type, name));
            }
        }
        for field in schema.required_fields() {
            if !present.contains(&field.name) {
                return Err(SchemaError::missing_field(node_type, field.name));
            }
        }
        if raw.children.is_some() && !schema.has_children {
            return Err(SchemaError::UnexpectedChildren { node_type });
        }

        // Required fields are known to be present past this point.
        let data = match node_type {
            NodeType::Heading => {
                let level = raw.level.unwrap_or_default();
                if !(1..=6).contains(&level) {
                    return Err(SchemaError::invalid_field(
                        node_type,
                        "level",
                        format!("{level} is not between 1 and 6"),
                    ));
                }
                NodeData::Heading(level)
            }
            NodeType::Code => NodeData::CodeBlock(raw.lang),
            NodeType::List => NodeData::List(raw.ordered.unwrap_or_default()),
            NodeType::ListItem => raw.checked.map_or(NodeData::None, NodeData::Task),
            NodeType::Link => NodeData::Link(LinkData {
                href: raw.href.unwrap_or_default(),
                title: raw.title,
            }),
            NodeType::Image => NodeData::Image(ImageData {
                href: raw.href.unwrap_or_default(),
                text: raw.text.unwrap_or_default(),
                title: raw.title.unwrap_or_default(),
            }),
            NodeType::Table => NodeData::Table(raw.head.unwrap_or_default()),
            NodeType::TableCell => NodeData::TableCell(CellData {
                header: raw.header.unwrap_or_default(),
                align: raw.align.unwrap_or_default(),
            }),
            _ => NodeData::None,
        };

        Ok(Node {
            node_type,
            content: raw.content,
            data,
            children: raw.children.unwrap_or_default(),
        })
    }
}
