//! # martian
//!
//! Convert Markdown to Notion API blocks and rich text.
//!
//! The conversion runs on the mdast-shaped tree from [`martian_core::ast`],
//! so any Markdown front-end can feed it. A [pulldown-cmark] based parser is
//! bundled for the common case of starting from a string.
//!
//! ## Example
//!
//! ```rust
//! use martian::{markdown_to_blocks, Options};
//!
//! let blocks = markdown_to_blocks("# Hello\n\nWorld", &Options::default());
//! assert_eq!(blocks[0].kind(), "heading_1");
//! assert_eq!(blocks[1].kind(), "paragraph");
//! ```
//!
//! ## Example (rich text)
//!
//! ```rust
//! use martian::{markdown_to_rich_text, Options};
//!
//! let runs = markdown_to_rich_text("hello **world**", &Options::default()).unwrap();
//! assert_eq!(runs.len(), 2);
//! assert!(runs[1].annotations().bold);
//! ```
//!
//! [pulldown-cmark]: https://docs.rs/pulldown-cmark

pub mod inline;
pub mod limits;
pub mod options;
pub mod parse;
mod service;
pub mod translate;

pub use limits::LimitViolation;
pub use martian_core::ast::{self, Root};
pub use martian_core::notion::{self, Annotations, Block, CodeLanguage, Color, RichText};
pub use martian_core::serialize;
pub use options::{LimitCallback, LimitOptions, NonInline, Options};
pub use service::MartianService;

/// Error type for martian operations
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MartianError {
    /// A top-level node other than a paragraph reached the rich-text entry point
    #[error("Unsupported markdown element: {kind}")]
    UnsupportedNode { kind: &'static str },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid options JSON: {0}")]
    OptionsJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MartianError>;

/// Convert a Markdown tree to Notion blocks
pub fn to_blocks(root: &Root, options: &Options) -> Vec<Block> {
    let blocks = translate::document(root, options);
    limits::enforce_blocks(blocks, &options.notion_limits)
}

/// Convert a Markdown tree holding a single inline fragment to rich text
pub fn to_rich_text(root: &Root, options: &Options) -> Result<Vec<RichText>> {
    let runs = translate::rich_text(root, options)?;
    Ok(limits::enforce_rich_text(runs, &options.notion_limits))
}

/// Parse a Markdown string and convert it to Notion blocks
pub fn markdown_to_blocks(markdown: &str, options: &Options) -> Vec<Block> {
    to_blocks(&parse::parse_markdown(markdown), options)
}

/// Parse an inline Markdown string and convert it to rich text
pub fn markdown_to_rich_text(markdown: &str, options: &Options) -> Result<Vec<RichText>> {
    to_rich_text(&parse::parse_markdown(markdown), options)
}
