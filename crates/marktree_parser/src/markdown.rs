//! Markdown tree builder using markdown-rs (wooorm/markdown-rs).
//!
//! The grammar engine produces an mdast tree; this module converts it
//! bottom-up into marktree nodes. Every container's children are converted
//! before the container itself is created, and the first construct outside
//! the node schema aborts the whole conversion.

use std::collections::HashMap;
use std::ops::ControlFlow;

use markdown::mdast::{self, AlignKind};
use markdown::{Constructs, ParseOptions, to_mdast};
use marktree_ast::visitor::walk_node;
use marktree_ast::{Align, Node, NodeData, NodeType, VisitResult, Visitor};
use tracing::{debug, warn};

use crate::{Options, ParseFailure};

/// Markdown parser implementation.
///
/// Recognizes CommonMark and, with [`Options::extended_syntax`], the GFM
/// extensions that have a node type: strikethrough, tables, autolink
/// literals and task list items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownParser {
    options: Options,
}

impl MarkdownParser {
    /// Creates a new Markdown parser with the given options.
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Returns the options this parser was created with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Builds grammar engine options for a single parse.
    fn engine_options(&self) -> ParseOptions {
        let constructs = if self.options.extended_syntax {
            // Footnotes have no node type.
            Constructs {
                gfm_footnote_definition: false,
                gfm_label_start_footnote: false,
                ..Constructs::gfm()
            }
        } else {
            Constructs::default()
        };

        ParseOptions {
            constructs,
            ..ParseOptions::default()
        }
    }

    /// Parses markdown source into a `document` node.
    pub fn parse(&self, source: &str) -> Result<Node, ParseFailure> {
        debug!(
            "Parsing {} bytes of markdown (extended syntax: {}, explicit line breaks: {})",
            source.len(),
            self.options.extended_syntax,
            self.options.explicit_line_breaks
        );

        let mdast = to_mdast(source, &self.engine_options())
            .map_err(|e| ParseFailure::engine(source, e.to_string()))?;

        let mut definitions = HashMap::new();
        collect_definitions(&mdast, &mut definitions);

        let builder = TreeBuilder {
            options: &self.options,
            definitions,
            source,
        };
        let document = match &mdast {
            mdast::Node::Root(root) => {
                Node::new_parent(NodeType::Document, builder.convert_children(&root.children)?)
            }
            other => Node::new_parent(NodeType::Document, builder.convert_node(other)?),
        };

        debug!("Built document with {} nodes", count_nodes(&document));
        Ok(document)
    }
}

/// Target of a link reference definition.
#[derive(Debug, Clone)]
struct Definition {
    url: String,
    title: Option<String>,
}

/// Collects link reference definitions from the whole tree. The first
/// definition of a label wins.
fn collect_definitions(node: &mdast::Node, definitions: &mut HashMap<String, Definition>) {
    if let mdast::Node::Definition(def) = node {
        definitions
            .entry(normalize_label(&def.identifier))
            .or_insert_with(|| Definition {
                url: def.url.clone(),
                title: def.title.clone(),
            });
    }

    if let Some(children) = node.children() {
        for child in children {
            collect_definitions(child, definitions);
        }
    }
}

fn normalize_label(identifier: &str) -> String {
    identifier.to_lowercase()
}

/// Converts one mdast tree into marktree nodes.
struct TreeBuilder<'a> {
    options: &'a Options,
    definitions: HashMap<String, Definition>,
    source: &'a str,
}

impl TreeBuilder<'_> {
    /// Converts a node. Definitions and unresolved references may expand to
    /// zero or several nodes, so the result is a sequence.
    fn convert_node(&self, node: &mdast::Node) -> Result<Vec<Node>, ParseFailure> {
        use markdown::mdast::Node as Md;

        let converted = match node {
            Md::Root(root) => {
                Node::new_parent(NodeType::Document, self.convert_children(&root.children)?)
            }

            Md::Paragraph(para) => {
                Node::new_parent(NodeType::Paragraph, self.convert_children(&para.children)?)
            }

            Md::Heading(heading) => {
                let children = self.convert_children(&heading.children)?;
                let content = plain_text(&children);
                Node::new_parent(NodeType::Heading, children)
                    .with_data(NodeData::heading(heading.depth))
                    .with_content(content)
            }

            Md::Text(text) => Node::new_text(NodeType::Text, text.value.as_str()),

            Md::Emphasis(em) => {
                Node::new_parent(NodeType::Emphasis, self.convert_children(&em.children)?)
            }

            Md::Strong(strong) => {
                Node::new_parent(NodeType::Strong, self.convert_children(&strong.children)?)
            }

            Md::Delete(del) => {
                Node::new_parent(NodeType::Delete, self.convert_children(&del.children)?)
            }

            Md::InlineCode(code) => Node::new_text(NodeType::CodeSpan, code.value.as_str()),

            Md::Code(code) => Node::new_text(NodeType::Code, code.value.as_str())
                .with_data(NodeData::code_block(code.lang.as_deref())),

            Md::Blockquote(quote) => {
                Node::new_parent(NodeType::BlockQuote, self.convert_children(&quote.children)?)
            }

            Md::ThematicBreak(_) => Node::new_leaf(NodeType::HorizontalRule),

            Md::Break(_) => Node::new_leaf(NodeType::Break),

            Md::List(list) => {
                let tight = !list.spread
                    && list
                        .children
                        .iter()
                        .all(|item| !matches!(item, Md::ListItem(item) if item.spread));

                let mut items = Vec::with_capacity(list.children.len());
                for item in &list.children {
                    match item {
                        Md::ListItem(item) => items.push(self.convert_list_item(item, tight)?),
                        other => items.extend(self.convert_node(other)?),
                    }
                }
                Node::new_parent(NodeType::List, items).with_data(NodeData::list(list.ordered))
            }

            Md::ListItem(item) => self.convert_list_item(item, false)?,

            Md::Table(table) => {
                let mut rows = table.children.iter();
                let head = match rows.next() {
                    Some(row) => vec![self.convert_row(row, true, &table.align)?],
                    None => Vec::new(),
                };
                let body = rows
                    .map(|row| self.convert_row(row, false, &table.align))
                    .collect::<Result<Vec<_>, _>>()?;

                Node::new_parent(NodeType::Table, body).with_data(NodeData::table(head))
            }

            Md::Link(link) => Node::new_parent(NodeType::Link, self.convert_children(&link.children)?)
                .with_data(NodeData::link(link.url.as_str(), link.title.as_deref())),

            Md::Image(image) => Node::new_leaf(NodeType::Image).with_data(NodeData::image(
                image.url.as_str(),
                image.alt.as_str(),
                image.title.as_deref().unwrap_or_default(),
            )),

            Md::LinkReference(reference) => {
                let children = self.convert_children(&reference.children)?;
                match self.definition(&reference.identifier) {
                    Some(def) => Node::new_parent(NodeType::Link, children).with_data(
                        NodeData::link(def.url.as_str(), def.title.as_deref()),
                    ),
                    // Unresolved: keep the label text.
                    None => return Ok(children),
                }
            }

            Md::ImageReference(reference) => match self.definition(&reference.identifier) {
                Some(def) => Node::new_leaf(NodeType::Image).with_data(NodeData::image(
                    def.url.as_str(),
                    reference.alt.as_str(),
                    def.title.as_deref().unwrap_or_default(),
                )),
                None => Node::new_text(NodeType::Text, reference.alt.as_str()),
            },

            Md::Definition(_) => return Ok(Vec::new()),

            Md::Html(html) => {
                let offset = start_offset(node);
                warn!("Rejecting raw HTML at byte {:?}: {}", offset, html.value);
                return Err(ParseFailure::raw_html(html.value.as_str(), offset));
            }

            other => {
                return Err(ParseFailure::unsupported(
                    construct_name(other),
                    self.fragment(other),
                    start_offset(other),
                ));
            }
        };

        Ok(vec![converted])
    }

    /// Converts a list of mdast children, merging adjacent text runs.
    fn convert_children(&self, children: &[mdast::Node]) -> Result<Vec<Node>, ParseFailure> {
        let mut nodes = Vec::with_capacity(children.len());
        for child in children {
            nodes.extend(self.convert_node(child)?);
        }

        let nodes = merge_text(nodes);
        if self.options.explicit_line_breaks {
            Ok(split_lines(nodes))
        } else {
            Ok(nodes)
        }
    }

    /// Converts a list item. Paragraphs of tight items are unwrapped so their
    /// inline content sits directly in the item.
    fn convert_list_item(&self, item: &mdast::ListItem, tight: bool) -> Result<Node, ParseFailure> {
        let mut children = Vec::with_capacity(item.children.len());
        for child in &item.children {
            match child {
                mdast::Node::Paragraph(para) if tight => {
                    children.extend(self.convert_children(&para.children)?)
                }
                other => children.extend(self.convert_node(other)?),
            }
        }

        let node = Node::new_parent(NodeType::ListItem, children);
        Ok(match item.checked {
            Some(checked) => node.with_data(NodeData::task(checked)),
            None => node,
        })
    }

    fn convert_row(
        &self,
        row: &mdast::Node,
        header: bool,
        align: &[AlignKind],
    ) -> Result<Node, ParseFailure> {
        let mdast::Node::TableRow(row) = row else {
            return Err(ParseFailure::unsupported(
                construct_name(row),
                self.fragment(row),
                start_offset(row),
            ));
        };

        // Every row has exactly one cell per column: extra cells are dropped
        // and missing ones are filled with empty cells.
        let columns = if align.is_empty() {
            row.children.len()
        } else {
            align.len()
        };

        let mut cells = Vec::with_capacity(columns);
        for column in 0..columns {
            let align = align.get(column).map_or(Align::None, convert_align);
            let children = match row.children.get(column) {
                Some(mdast::Node::TableCell(cell)) => self.convert_children(&cell.children)?,
                Some(other) => {
                    return Err(ParseFailure::unsupported(
                        construct_name(other),
                        self.fragment(other),
                        start_offset(other),
                    ));
                }
                None => Vec::new(),
            };
            cells.push(
                Node::new_parent(NodeType::TableCell, children)
                    .with_data(NodeData::table_cell(header, align)),
            );
        }

        Ok(Node::new_parent(NodeType::TableRow, cells))
    }

    fn definition(&self, identifier: &str) -> Option<&Definition> {
        self.definitions.get(&normalize_label(identifier))
    }

    /// Source text covered by a node.
    fn fragment(&self, node: &mdast::Node) -> &str {
        node.position()
            .and_then(|pos| self.source.get(pos.start.offset..pos.end.offset))
            .unwrap_or_default()
    }
}

fn start_offset(node: &mdast::Node) -> Option<usize> {
    node.position().map(|pos| pos.start.offset)
}

fn convert_align(align: &AlignKind) -> Align {
    match align {
        AlignKind::Left => Align::Left,
        AlignKind::Right => Align::Right,
        AlignKind::Center => Align::Center,
        AlignKind::None => Align::None,
    }
}

/// Name of an engine construct outside the node schema.
fn construct_name(node: &mdast::Node) -> &'static str {
    use markdown::mdast::Node as Md;

    match node {
        Md::FootnoteDefinition(_) => "footnote definition",
        Md::FootnoteReference(_) => "footnote reference",
        Md::Math(_) => "math",
        Md::InlineMath(_) => "inline math",
        Md::Yaml(_) => "yaml frontmatter",
        Md::Toml(_) => "toml frontmatter",
        Md::MdxJsxFlowElement(_) | Md::MdxJsxTextElement(_) => "jsx",
        Md::MdxjsEsm(_) => "esm",
        Md::MdxFlowExpression(_) | Md::MdxTextExpression(_) => "expression",
        Md::TableRow(_) => "table row",
        Md::TableCell(_) => "table cell",
        _ => "unknown",
    }
}

/// Merges adjacent `text` nodes into one.
fn merge_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let extend = node.node_type == NodeType::Text
            && merged
                .last()
                .is_some_and(|last| last.node_type == NodeType::Text);

        if extend {
            if let Some(last) = merged.last_mut() {
                last.content
                    .get_or_insert_with(String::new)
                    .push_str(node.text().unwrap_or_default());
            }
        } else {
            merged.push(node);
        }
    }
    merged
}

/// Splits `text` nodes on newlines into `text`, `br`, `text`.
fn split_lines(nodes: Vec<Node>) -> Vec<Node> {
    let mut split = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node.text() {
            Some(content) if node.node_type == NodeType::Text && content.contains('\n') => {
                for (i, line) in content.split('\n').enumerate() {
                    if i > 0 {
                        split.push(Node::new_leaf(NodeType::Break));
                    }
                    if !line.is_empty() {
                        split.push(Node::new_text(NodeType::Text, line));
                    }
                }
            }
            _ => split.push(node),
        }
    }
    split
}

/// Collects the plain text of inline nodes: text runs, code spans and image
/// alternative text.
struct PlainText(String);

impl<'a> Visitor<'a> for PlainText {
    fn visit_text(&mut self, node: &'a Node) -> VisitResult {
        self.0.push_str(node.text().unwrap_or_default());
        ControlFlow::Continue(())
    }

    fn visit_code_span(&mut self, node: &'a Node) -> VisitResult {
        self.0.push_str(node.text().unwrap_or_default());
        ControlFlow::Continue(())
    }

    fn visit_image(&mut self, node: &'a Node) -> VisitResult {
        if let NodeData::Image(image) = &node.data {
            self.0.push_str(&image.text);
        }
        ControlFlow::Continue(())
    }
}

fn plain_text(nodes: &[Node]) -> String {
    let mut collector = PlainText(String::new());
    for node in nodes {
        let _ = walk_node(&mut collector, node);
    }
    collector.0
}

#[derive(Default)]
struct NodeCounter(usize);

impl<'a> Visitor<'a> for NodeCounter {
    fn enter_node(&mut self, _node: &'a Node) -> VisitResult {
        self.0 += 1;
        ControlFlow::Continue(())
    }
}

fn count_nodes(node: &Node) -> usize {
    let mut counter = NodeCounter::default();
    let _ = walk_node(&mut counter, node);
    counter.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;
    use marktree_ast::children;
    use marktree_ast::construct::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Node {
        MarkdownParser::default().parse(source).unwrap()
    }

    #[test]
    fn test_parse_simple_markdown() {
        let ast = parse("# Hello\n\nThis is a paragraph.");

        assert_eq!(ast.node_type, NodeType::Document);
        assert_eq!(ast.children.len(), 2);
    }

    #[test]
    fn test_parse_heading_levels() {
        let ast = parse("# Level 1\n\n## Level 2");

        assert_eq!(ast.children[0].data, NodeData::Heading(1));
        assert_eq!(ast.children[1].data, NodeData::Heading(2));
        assert_eq!(ast.children[1].text(), Some("Level 2"));
    }

    #[test]
    fn test_heading_content_flattens_inline_markup() {
        let ast = parse("## Use `cargo` *now*");

        assert_eq!(ast.children[0].text(), Some("Use cargo now"));
        assert_eq!(
            ast.children[0].children,
            vec![text("Use "), codespan("cargo"), text(" "), em(["now"])]
        );
    }

    #[test]
    fn test_parse_empty_document() {
        let ast = parse("");

        assert_eq!(ast, document(children![]));
    }

    #[test]
    fn test_parse_code_block_no_language() {
        let ast = parse("```\nplain code\n```");

        assert_eq!(ast.children, vec![code("plain code", None)]);
    }

    #[test]
    fn test_parse_indented_code() {
        let ast = parse("    let x = 1;");

        assert_eq!(ast.children, vec![code("let x = 1;", None)]);
    }

    #[test]
    fn test_parse_unordered_list() {
        let ast = parse("- Item 1\n- Item 2\n- Item 3");

        assert_eq!(
            ast.children,
            vec![list(
                false,
                [listitem(["Item 1"]), listitem(["Item 2"]), listitem(["Item 3"])]
            )]
        );
    }

    #[test]
    fn test_loose_list_keeps_paragraphs() {
        let ast = parse("- one\n\n- two");

        assert_eq!(
            ast.children,
            vec![list(
                false,
                [
                    listitem([paragraph(["one"])]),
                    listitem([paragraph(["two"])])
                ]
            )]
        );
    }

    #[test]
    fn test_nested_list() {
        let ast = parse("- outer\n  - inner");

        assert_eq!(
            ast.children,
            vec![list(
                false,
                [listitem(children![
                    "outer",
                    list(false, [listitem(["inner"])])
                ])]
            )]
        );
    }

    #[test]
    fn test_task_list_items() {
        let ast = parse("- [x] done\n- [ ] todo");

        let items = &ast.children[0].children;
        assert_eq!(items[0].data, NodeData::Task(true));
        assert_eq!(items[1].data, NodeData::Task(false));
    }

    #[test]
    fn test_table_alignment() {
        let ast = parse("| a | b | c |\n|:--|:-:|--:|\n| 1 | 2 | 3 |");

        let table = &ast.children[0];
        let head_cells = &table.head()[0].children;
        assert_eq!(head_cells[0].data, NodeData::table_cell(true, Align::Left));
        assert_eq!(head_cells[1].data, NodeData::table_cell(true, Align::Center));
        assert_eq!(head_cells[2].data, NodeData::table_cell(true, Align::Right));

        let body_cells = &table.children[0].children;
        assert_eq!(body_cells[2].data, NodeData::table_cell(false, Align::Right));
    }

    #[test]
    fn test_table_without_body() {
        let ast = parse("| a |\n|---|");

        assert_eq!(
            ast.children,
            vec![table(
                [tablerow([tablecell(true, Align::None, ["a"])])],
                Vec::new()
            )]
        );
    }

    #[test]
    fn test_body_row_with_extra_cells_is_truncated() {
        let ast = parse("| a |\n|---|\n| b | extra |");

        assert_eq!(
            ast.children,
            vec![table(
                [tablerow([tablecell(true, Align::None, ["a"])])],
                [tablerow([tablecell(false, Align::None, ["b"])])]
            )]
        );
    }

    #[test]
    fn test_body_row_with_missing_cells_is_padded() {
        let ast = parse("| a | b |\n|:--|--:|\n| x |");

        let empty: [Node; 0] = [];
        assert_eq!(
            ast.children,
            vec![table(
                [tablerow([
                    tablecell(true, Align::Left, ["a"]),
                    tablecell(true, Align::Right, ["b"]),
                ])],
                [tablerow([
                    tablecell(false, Align::Left, ["x"]),
                    tablecell(false, Align::Right, empty),
                ])]
            )]
        );
    }

    #[test]
    fn test_image_without_title_has_empty_title() {
        let ast = parse("![alt](a.png)");

        assert_eq!(ast.children, vec![paragraph([image("a.png", "alt", "")])]);
    }

    #[test]
    fn test_link_with_title() {
        let ast = parse("[Link](https://example.com \"Example Title\")");

        assert_eq!(
            ast.children,
            vec![paragraph([link(
                "https://example.com",
                Some("Example Title"),
                ["Link"]
            )])]
        );
    }

    #[test]
    fn test_autolink() {
        let ast = parse("<https://example.com>");

        assert_eq!(
            ast.children,
            vec![paragraph([link(
                "https://example.com",
                None,
                ["https://example.com"]
            )])]
        );
    }

    #[test]
    fn test_link_reference_is_resolved() {
        let ast = parse("[docs][ref]\n\n[ref]: https://example.com \"Docs\"");

        assert_eq!(
            ast.children,
            vec![paragraph([link("https://example.com", Some("Docs"), ["docs"])])]
        );
    }

    #[test]
    fn test_image_reference_is_resolved() {
        let ast = parse("![logo][Img]\n\n[img]: logo.png");

        assert_eq!(
            ast.children,
            vec![paragraph([image("logo.png", "logo", "")])]
        );
    }

    #[test]
    fn test_collapsed_reference_uses_first_definition() {
        let ast = parse("[a][]\n\n[a]: first\n[a]: second");

        assert_eq!(ast.children, vec![paragraph([link("first", None, ["a"])])]);
    }

    #[test]
    fn test_strikethrough_requires_extended_syntax() {
        let plain = MarkdownParser::new(Options::new().with_extended_syntax(false))
            .parse("~~xyz~~")
            .unwrap();

        assert_eq!(plain.children, vec![paragraph(["~~xyz~~"])]);
    }

    #[test]
    fn test_table_requires_extended_syntax() {
        let plain = MarkdownParser::new(Options::new().with_extended_syntax(false))
            .parse("| a |\n|---|")
            .unwrap();

        assert_eq!(plain.children[0].node_type, NodeType::Paragraph);
    }

    #[test]
    fn test_footnotes_are_not_recognized() {
        let ast = parse("text[^1]\n\n[^1]: note");

        for node in &ast.children {
            assert_eq!(node.node_type, NodeType::Paragraph);
        }
    }

    #[test]
    fn test_soft_break_stays_in_text() {
        let ast = parse("some\nbreak");

        assert_eq!(ast.children, vec![paragraph(["some\nbreak"])]);
    }

    #[test]
    fn test_explicit_line_breaks() {
        let ast = MarkdownParser::new(Options::new().with_explicit_line_breaks(true))
            .parse("one\ntwo *three*\nfour")
            .unwrap();

        assert_eq!(
            ast.children,
            vec![paragraph(children![
                "one",
                br(),
                "two ",
                em(["three"]),
                br(),
                "four"
            ])]
        );
    }

    #[test]
    fn test_hard_break() {
        let ast = parse("one\\\ntwo");

        assert_eq!(ast.children, vec![paragraph(children!["one", br(), "two"])]);
    }

    #[test]
    fn test_raw_html_block_fails() {
        let err = MarkdownParser::default().parse("<div>\nhi\n</div>").unwrap_err();

        assert_eq!(err.kind, FailureKind::RawHtml);
        assert_eq!(err.offset, Some(0));
        assert!(err.fragment.starts_with("<div>"));
    }

    #[test]
    fn test_inline_html_fails_with_offset() {
        let err = MarkdownParser::default()
            .parse("some <b>bold</b> text")
            .unwrap_err();

        assert_eq!(err.kind, FailureKind::RawHtml);
        assert_eq!(err.fragment, "<b>");
        assert_eq!(err.offset, Some(5));
    }

    #[test]
    fn test_raw_html_inside_list_aborts_whole_parse() {
        let err = MarkdownParser::default()
            .parse("- fine\n- <em>not</em>")
            .unwrap_err();

        assert_eq!(err.kind, FailureKind::RawHtml);
    }

    #[test]
    fn test_merge_text() {
        let merged = merge_text(vec![text("a"), text("b"), br(), text("c")]);

        assert_eq!(merged, vec![text("ab"), br(), text("c")]);
    }

    #[test]
    fn test_split_lines_skips_empty_segments() {
        let split = split_lines(vec![text("a\n"), codespan("x\ny")]);

        assert_eq!(split, vec![text("a"), br(), codespan("x\ny")]);
    }

    #[test]
    fn test_count_nodes() {
        let doc = document([paragraph(children!["a", strong(["b"])])]);

        assert_eq!(count_nodes(&doc), 5);
    }

    #[test]
    fn test_options_accessor() {
        let options = Options::new().with_explicit_line_breaks(true);
        let parser = MarkdownParser::new(options);

        assert_eq!(parser.options(), &options);
    }
}
