//! Node type definitions for the markdown AST.
//!
//! The set of types is closed: every construct the tree builder can emit has
//! exactly one variant here, and the serialized tag of each variant is the
//! value stored in the `type` field of a serialized node.

use serde::{Deserialize, Serialize};

/// Node types of the markdown AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeType {
    // Document structure
    /// Root document node.
    #[serde(rename = "document")]
    Document,

    // Block elements
    /// Paragraph containing inline content.
    #[serde(rename = "paragraph")]
    Paragraph,
    /// Heading (H1-H6).
    #[serde(rename = "heading")]
    Heading,
    /// Fenced or indented code block.
    #[serde(rename = "code")]
    Code,
    /// Block quote.
    #[serde(rename = "blockquote")]
    BlockQuote,
    /// Horizontal rule / thematic break.
    #[serde(rename = "hr")]
    HorizontalRule,
    /// Ordered or unordered list.
    #[serde(rename = "list")]
    List,
    /// Item in a list.
    #[serde(rename = "listitem")]
    ListItem,
    /// Table (GFM).
    #[serde(rename = "table")]
    Table,
    /// Table row (GFM).
    #[serde(rename = "tablerow")]
    TableRow,
    /// Table cell (GFM).
    #[serde(rename = "tablecell")]
    TableCell,

    // Inline elements
    /// Strong emphasis (bold).
    #[serde(rename = "strong")]
    Strong,
    /// Emphasis (italic).
    #[serde(rename = "em")]
    Emphasis,
    /// Strikethrough text (GFM).
    #[serde(rename = "del")]
    Delete,
    /// Inline code span.
    #[serde(rename = "codespan")]
    CodeSpan,
    /// Hyperlink.
    #[serde(rename = "link")]
    Link,
    /// Image.
    #[serde(rename = "image")]
    Image,
    /// Explicit line break.
    #[serde(rename = "br")]
    Break,
    /// Plain text run.
    #[serde(rename = "text")]
    Text,
    /// Raw inline markup.
    #[serde(rename = "html")]
    Html,
}

impl NodeType {
    /// Every node type, in declaration order.
    pub const ALL: [NodeType; 20] = [
        NodeType::Document,
        NodeType::Paragraph,
        NodeType::Heading,
        NodeType::Code,
        NodeType::BlockQuote,
        NodeType::HorizontalRule,
        NodeType::List,
        NodeType::ListItem,
        NodeType::Table,
        NodeType::TableRow,
        NodeType::TableCell,
        NodeType::Strong,
        NodeType::Emphasis,
        NodeType::Delete,
        NodeType::CodeSpan,
        NodeType::Link,
        NodeType::Image,
        NodeType::Break,
        NodeType::Text,
        NodeType::Html,
    ];

    /// Returns the serialized tag of this node type.
    pub const fn tag(&self) -> &'static str {
        match self {
            NodeType::Document => "document",
            NodeType::Paragraph => "paragraph",
            NodeType::Heading => "heading",
            NodeType::Code => "code",
            NodeType::BlockQuote => "blockquote",
            NodeType::HorizontalRule => "hr",
            NodeType::List => "list",
            NodeType::ListItem => "listitem",
            NodeType::Table => "table",
            NodeType::TableRow => "tablerow",
            NodeType::TableCell => "tablecell",
            NodeType::Strong => "strong",
            NodeType::Emphasis => "em",
            NodeType::Delete => "del",
            NodeType::CodeSpan => "codespan",
            NodeType::Link => "link",
            NodeType::Image => "image",
            NodeType::Break => "br",
            NodeType::Text => "text",
            NodeType::Html => "html",
        }
    }

    /// Resolves a serialized tag back to its node type.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|node_type| node_type.tag() == tag)
    }

    /// Returns true if this node type is a block element.
    #[inline]
    pub const fn is_block(&self) -> bool {
        matches!(
            self,
            NodeType::Document
                | NodeType::Paragraph
                | NodeType::Heading
                | NodeType::Code
                | NodeType::BlockQuote
                | NodeType::HorizontalRule
                | NodeType::List
                | NodeType::ListItem
                | NodeType::Table
                | NodeType::TableRow
        )
    }

    /// Returns true if this node type is an inline element.
    #[inline]
    pub const fn is_inline(&self) -> bool {
        matches!(
            self,
            NodeType::Strong
                | NodeType::Emphasis
                | NodeType::Delete
                | NodeType::CodeSpan
                | NodeType::Link
                | NodeType::Image
                | NodeType::Break
                | NodeType::Text
                | NodeType::Html
        )
    }

    /// Returns true if this node type can contain children.
    #[inline]
    pub const fn is_parent(&self) -> bool {
        matches!(
            self,
            NodeType::Document
                | NodeType::Paragraph
                | NodeType::Heading
                | NodeType::BlockQuote
                | NodeType::List
                | NodeType::ListItem
                | NodeType::Table
                | NodeType::TableRow
                | NodeType::TableCell
                | NodeType::Strong
                | NodeType::Emphasis
                | NodeType::Delete
                | NodeType::Link
        )
    }

    /// Returns true if this node type is a text node (carries `content`, no children).
    #[inline]
    pub const fn is_text(&self) -> bool {
        matches!(
            self,
            NodeType::Text | NodeType::CodeSpan | NodeType::Code | NodeType::Html
        )
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
