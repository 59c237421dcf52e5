//! Markdown Abstract Syntax Tree
//!
//! This module defines the input tree consumed by the block translator.
//! It follows the mdast shape: flow (block-level) nodes own phrasing
//! (inline) nodes, and containers own their children.

/// Root of a parsed Markdown document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Root {
    pub children: Vec<Block>,
}

impl Root {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }
}

/// A flow (block-level) Markdown node
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Block {
    /// Paragraph containing inline content
    Paragraph(Vec<Inline>),

    /// Heading with depth (1-6) and inline content
    Heading { depth: u8, content: Vec<Inline> },

    /// Block quote containing nested blocks
    BlockQuote(Vec<Block>),

    /// List; a defined `start` marks it as ordered
    List {
        start: Option<u64>,
        items: Vec<ListItem>,
    },

    /// Fenced or indented code block
    Code { lang: Option<String>, value: String },

    /// GFM table; the first row is the header row
    Table { rows: Vec<TableRow> },

    /// Thematic break (horizontal rule)
    ThematicBreak,

    /// Display math block
    Math(String),

    /// Raw HTML block
    Html(String),
}

/// A table row is a list of cells, each cell holding inline content
pub type TableRow = Vec<Vec<Inline>>;

/// A list item containing blocks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    /// Task list marker state, `None` for plain items
    pub checked: Option<bool>,
    pub content: Vec<Block>,
}

impl ListItem {
    pub fn new(content: Vec<Block>) -> Self {
        Self {
            checked: None,
            content,
        }
    }

    pub fn task(checked: bool, content: Vec<Block>) -> Self {
        Self {
            checked: Some(checked),
            content,
        }
    }

    pub fn from_inlines(inlines: Vec<Inline>) -> Self {
        Self::new(vec![Block::Paragraph(inlines)])
    }
}

/// A phrasing (inline) Markdown node
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Inline {
    /// Plain text
    Text(String),

    /// Emphasis (italic)
    Emphasis(Vec<Inline>),

    /// Strong emphasis (bold)
    Strong(Vec<Inline>),

    /// GFM strikethrough
    Delete(Vec<Inline>),

    /// Inline code
    Code(String),

    /// Link with URL, optional title and content
    Link {
        url: String,
        title: Option<String>,
        content: Vec<Inline>,
    },

    /// Image with URL, alt text and optional title
    Image {
        url: String,
        alt: String,
        title: Option<String>,
    },

    /// Hard line break
    Break,

    /// Inline math
    Math(String),

    /// Raw inline HTML
    Html(String),
}

impl Inline {
    pub fn text(value: impl Into<String>) -> Self {
        Inline::Text(value.into())
    }

    pub fn code(value: impl Into<String>) -> Self {
        Inline::Code(value.into())
    }

    pub fn link(url: impl Into<String>, content: Vec<Inline>) -> Self {
        Inline::Link {
            url: url.into(),
            title: None,
            content,
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Inline::Image {
            url: url.into(),
            alt: String::new(),
            title: None,
        }
    }

    /// Check if this inline is empty/blank
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::Emphasis(inlines) | Inline::Strong(inlines) | Inline::Delete(inlines) => {
                inlines.iter().all(|i| i.is_blank())
            }
            Inline::Code(code) => code.is_empty(),
            Inline::Link { content, .. } => content.iter().all(|i| i.is_blank()),
            Inline::Math(math) => math.trim().is_empty(),
            Inline::Image { .. } | Inline::Break => false,
            Inline::Html(html) => html.trim().is_empty(),
        }
    }

    /// Plain text content, used for image alt text and alert detection
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(text) | Inline::Code(text) | Inline::Math(text) => text.clone(),
            Inline::Emphasis(inner) | Inline::Strong(inner) | Inline::Delete(inner) => {
                inlines_plain_text(inner)
            }
            Inline::Link { content, .. } => inlines_plain_text(content),
            Inline::Image { alt, .. } => alt.clone(),
            Inline::Break => "\n".to_string(),
            Inline::Html(_) => String::new(),
        }
    }
}

impl Block {
    /// The mdast type name of this node, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading { .. } => "heading",
            Block::BlockQuote(_) => "blockquote",
            Block::List { .. } => "list",
            Block::Code { .. } => "code",
            Block::Table { .. } => "table",
            Block::ThematicBreak => "thematicBreak",
            Block::Math(_) => "math",
            Block::Html(_) => "html",
        }
    }

    pub fn heading(depth: u8, content: Vec<Inline>) -> Self {
        Block::Heading { depth, content }
    }

    pub fn code(value: impl Into<String>, lang: Option<&str>) -> Self {
        Block::Code {
            lang: lang.map(str::to_string),
            value: value.into(),
        }
    }

    pub fn unordered_list(items: Vec<ListItem>) -> Self {
        Block::List { start: None, items }
    }

    pub fn ordered_list(start: u64, items: Vec<ListItem>) -> Self {
        Block::List {
            start: Some(start),
            items,
        }
    }
}

/// Concatenate the plain text of a run of inlines
pub fn inlines_plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::plain_text).collect()
}
