//! Inline resolution: phrasing nodes to rich text runs.
//!
//! Formatting containers derive a new [`Context`] for their subtree, so
//! siblings never see each other's annotations.

use martian_core::ast::Inline;
use martian_core::limits::{text_length, RICH_TEXT_CONTENT};
use martian_core::notion::{Annotations, RichText};

/// Annotations and link inherited by the runs of a subtree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    annotations: Annotations,
    link: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn bold(&self) -> Self {
        let mut next = self.clone();
        next.annotations.bold = true;
        next
    }

    pub fn italic(&self) -> Self {
        let mut next = self.clone();
        next.annotations.italic = true;
        next
    }

    pub fn strikethrough(&self) -> Self {
        let mut next = self.clone();
        next.annotations.strikethrough = true;
        next
    }

    pub fn code(&self) -> Self {
        let mut next = self.clone();
        next.annotations.code = true;
        next
    }

    pub fn with_link(&self, url: &str) -> Self {
        let mut next = self.clone();
        next.link = Some(url.to_string());
        next
    }

    /// A text run carrying this context
    pub fn run(&self, content: impl Into<String>) -> RichText {
        let run = RichText::text(content).with_annotations(self.annotations);
        match &self.link {
            Some(url) => run.with_link(url.as_str()),
            None => run,
        }
    }
}

/// Resolve one inline node to its runs
pub fn resolve(node: &Inline, ctx: &Context) -> Vec<RichText> {
    match node {
        Inline::Text(value) => chunk_text(value, ctx),
        Inline::Delete(children) => resolve_nested(children, &ctx.strikethrough()),
        Inline::Emphasis(children) => resolve_nested(children, &ctx.italic()),
        Inline::Strong(children) => resolve_nested(children, &ctx.bold()),
        Inline::Link { url, content, .. } => resolve_nested(content, &ctx.with_link(url)),
        Inline::Code(value) => vec![ctx.code().run(value.as_str())],
        Inline::Math(expression) => {
            vec![RichText::equation(expression.as_str()).with_annotations(ctx.annotations)]
        }
        Inline::Image { url, title, .. } => {
            let label = title.as_deref().filter(|t| !t.is_empty()).unwrap_or(url);
            vec![ctx.run(label)]
        }
        // top-level breaks split paragraphs in the block translator
        Inline::Break => Vec::new(),
        other => {
            tracing::debug!(node = ?other, "Dropping unsupported inline node");
            Vec::new()
        }
    }
}

/// Resolve a sequence of inline nodes, concatenating their runs
pub fn resolve_all(nodes: &[Inline], ctx: &Context) -> Vec<RichText> {
    nodes.iter().flat_map(|node| resolve(node, ctx)).collect()
}

/// Children of a formatting container. A break here cannot split the
/// paragraph, so it stays in the run list as a newline carrying the context.
fn resolve_nested(nodes: &[Inline], ctx: &Context) -> Vec<RichText> {
    nodes
        .iter()
        .flat_map(|node| match node {
            Inline::Break => vec![ctx.run("\n")],
            other => resolve(other, ctx),
        })
        .collect()
}

/// Split text into runs of at most [`RICH_TEXT_CONTENT`] UTF-16 code units
pub fn chunk_text(value: &str, ctx: &Context) -> Vec<RichText> {
    split_units(value, RICH_TEXT_CONTENT)
        .into_iter()
        .map(|chunk| ctx.run(chunk))
        .collect()
}

/// Split on char boundaries so that no chunk exceeds `size` code units
fn split_units(value: &str, size: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut units = 0;
    for (index, c) in value.char_indices() {
        let width = c.len_utf16();
        if units + width > size {
            chunks.push(&value[start..index]);
            start = index;
            units = 0;
        }
        units += width;
    }
    if start < value.len() {
        chunks.push(&value[start..]);
    }
    chunks
}
