//! # marktree_parser
//!
//! Markdown to marktree AST builder.
//!
//! This crate provides:
//! - [`parse`], turning markdown source into a `document` node
//! - [`MarkdownParser`], the same conversion bound to a set of [`Options`]
//! - [`ParseFailure`], returned when the source contains raw HTML or another
//!   construct the node schema cannot express
//!
//! ## Architecture
//!
//! The grammar engine (`markdown-rs`) produces an mdast tree, which is
//! converted bottom-up into [`marktree_ast::Node`] values. Engine options are
//! built from [`Options`] on every call, so parses never share state.
//!
//! ## Example
//!
//! ```rust
//! use marktree_ast::children;
//! use marktree_ast::construct::{document, heading, paragraph, strong};
//! use marktree_parser::{Options, parse};
//!
//! let doc = parse("# Title\n\nThis is **bold** text.", &Options::default()).unwrap();
//!
//! assert_eq!(
//!     doc,
//!     document([
//!         heading(1, "Title", ["Title"]),
//!         paragraph(children!["This is ", strong(["bold"]), " text."]),
//!     ])
//! );
//!
//! let err = parse("<span>Hello!</span>", &Options::default()).unwrap_err();
//! assert!(err.to_string().contains("raw HTML"));
//! ```

mod error;
mod markdown;
mod options;

pub use error::{FailureKind, OptionsError, ParseFailure};
pub use markdown::MarkdownParser;
pub use options::Options;

use marktree_ast::Node;

/// Parses markdown source into a `document` node.
///
/// Fails with [`ParseFailure`] at the first section the node schema cannot
/// represent; no partial tree is returned.
pub fn parse(source: &str, options: &Options) -> Result<Node, ParseFailure> {
    MarkdownParser::new(*options).parse(source)
}
