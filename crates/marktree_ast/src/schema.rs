//! Field contracts of every node type.
//!
//! [`NodeType::schema`] is the type-indexed lookup used by deserialization and
//! by the manual constructor to decide which fields a node may carry.

use crate::NodeType;

/// Value domain of a node field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string.
    String,
    /// A non-negative integer.
    Integer,
    /// A boolean.
    Boolean,
    /// A column alignment: `""`, `"left"`, `"right"` or `"center"`.
    Align,
    /// An ordered sequence of nodes.
    Nodes,
}

/// A single data field of a node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Serialized field name.
    pub name: &'static str,
    /// Value domain.
    pub kind: FieldKind,
    /// Whether every node of the type must carry this field.
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// The field contract of one node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSchema {
    /// The node type this contract belongs to.
    pub node_type: NodeType,
    /// Data fields besides `type` and `children`.
    pub fields: &'static [FieldSpec],
    /// Whether the type carries a `children` sequence.
    pub has_children: bool,
}

impl NodeSchema {
    /// Looks up a field by its serialized name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the fields every node of this type must carry.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|field| field.required)
    }
}

const CONTENT: FieldSpec = FieldSpec::required("content", FieldKind::String);

const fn container(node_type: NodeType, fields: &'static [FieldSpec]) -> NodeSchema {
    NodeSchema {
        node_type,
        fields,
        has_children: true,
    }
}

const fn leaf(node_type: NodeType, fields: &'static [FieldSpec]) -> NodeSchema {
    NodeSchema {
        node_type,
        fields,
        has_children: false,
    }
}

const HEADING_FIELDS: &[FieldSpec] = &[FieldSpec::required("level", FieldKind::Integer), CONTENT];
const CODE_FIELDS: &[FieldSpec] = &[CONTENT, FieldSpec::optional("lang", FieldKind::String)];
const LIST_FIELDS: &[FieldSpec] = &[FieldSpec::required("ordered", FieldKind::Boolean)];
const LIST_ITEM_FIELDS: &[FieldSpec] = &[FieldSpec::optional("checked", FieldKind::Boolean)];
const TABLE_FIELDS: &[FieldSpec] = &[FieldSpec::required("head", FieldKind::Nodes)];
const TABLE_CELL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("header", FieldKind::Boolean),
    FieldSpec::required("align", FieldKind::Align),
];
const LINK_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("href", FieldKind::String),
    FieldSpec::optional("title", FieldKind::String),
];
const IMAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("href", FieldKind::String),
    FieldSpec::required("text", FieldKind::String),
    FieldSpec::required("title", FieldKind::String),
];
const CONTENT_FIELDS: &[FieldSpec] = &[CONTENT];

static DOCUMENT: NodeSchema = container(NodeType::Document, &[]);
static PARAGRAPH: NodeSchema = container(NodeType::Paragraph, &[]);
static HEADING: NodeSchema = container(NodeType::Heading, HEADING_FIELDS);
static CODE: NodeSchema = leaf(NodeType::Code, CODE_FIELDS);
static BLOCK_QUOTE: NodeSchema = container(NodeType::BlockQuote, &[]);
static HORIZONTAL_RULE: NodeSchema = leaf(NodeType::HorizontalRule, &[]);
static LIST: NodeSchema = container(NodeType::List, LIST_FIELDS);
static LIST_ITEM: NodeSchema = container(NodeType::ListItem, LIST_ITEM_FIELDS);
static TABLE: NodeSchema = container(NodeType::Table, TABLE_FIELDS);
static TABLE_ROW: NodeSchema = container(NodeType::TableRow, &[]);
static TABLE_CELL: NodeSchema = container(NodeType::TableCell, TABLE_CELL_FIELDS);
static STRONG: NodeSchema = container(NodeType::Strong, &[]);
static EMPHASIS: NodeSchema = container(NodeType::Emphasis, &[]);
static DELETE: NodeSchema = container(NodeType::Delete, &[]);
static CODE_SPAN: NodeSchema = leaf(NodeType::CodeSpan, CONTENT_FIELDS);
static LINK: NodeSchema = container(NodeType::Link, LINK_FIELDS);
static IMAGE: NodeSchema = leaf(NodeType::Image, IMAGE_FIELDS);
static BREAK: NodeSchema = leaf(NodeType::Break, &[]);
static TEXT: NodeSchema = leaf(NodeType::Text, CONTENT_FIELDS);
static HTML: NodeSchema = leaf(NodeType::Html, CONTENT_FIELDS);

impl NodeType {
    /// Returns the field contract of this node type.
    pub fn schema(&self) -> &'static NodeSchema {
        match self {
            NodeType::Document => &DOCUMENT,
            NodeType::Paragraph => &PARAGRAPH,
            NodeType::Heading => &HEADING,
            NodeType::Code => &CODE,
            NodeType::BlockQuote => &BLOCK_QUOTE,
            NodeType::HorizontalRule => &HORIZONTAL_RULE,
            NodeType::List => &LIST,
            NodeType::ListItem => &LIST_ITEM,
            NodeType::Table => &TABLE,
            NodeType::TableRow => &TABLE_ROW,
            NodeType::TableCell => &TABLE_CELL,
            NodeType::Strong => &STRONG,
            NodeType::Emphasis => &EMPHASIS,
            NodeType::Delete => &DELETE,
            NodeType::CodeSpan => &CODE_SPAN,
            NodeType::Link => &LINK,
            NodeType::Image => &IMAGE,
            NodeType::Break => &BREAK,
            NodeType::Text => &TEXT,
            NodeType::Html => &HTML,
        }
    }
}
