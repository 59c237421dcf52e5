//! Block translation: Markdown flow nodes to Notion blocks.

mod callout;
mod paragraph;

use martian_core::ast::{self, Inline, ListItem, Root, TableRow};
use martian_core::notion::{Block, CodeLanguage, RichText};

use crate::inline::{self, Context};
use crate::options::{NonInline, Options};
use crate::{MartianError, Result};

pub use callout::AlertKind;
pub use paragraph::{image_source, ImageRejection, ImageSource};

/// Translate every top-level node of a document
pub fn document(root: &Root, options: &Options) -> Vec<Block> {
    blocks_all(&root.children, options)
}

/// Translate a document expected to hold a single inline fragment.
///
/// Paragraph content is resolved directly; hard breaks become newline runs.
/// Other top-level nodes are dropped or rejected per [`Options::non_inline`].
pub fn rich_text(root: &Root, options: &Options) -> Result<Vec<RichText>> {
    let ctx = Context::new();
    let mut runs = Vec::new();

    for child in &root.children {
        match child {
            ast::Block::Paragraph(inlines) => {
                for node in inlines {
                    match node {
                        Inline::Break => runs.push(ctx.run("\n")),
                        other => runs.extend(inline::resolve(other, &ctx)),
                    }
                }
            }
            other => match options.non_inline {
                NonInline::Ignore => {
                    tracing::debug!(kind = other.kind(), "Ignoring non-inline node");
                }
                NonInline::Throw => {
                    return Err(MartianError::UnsupportedNode { kind: other.kind() });
                }
            },
        }
    }

    Ok(runs)
}

/// Translate one flow node to zero or more blocks
pub fn blocks(node: &ast::Block, options: &Options) -> Vec<Block> {
    match node {
        ast::Block::Paragraph(inlines) => paragraph::paragraph(inlines, options),
        ast::Block::Heading { depth, content } => vec![heading(*depth, content)],
        ast::Block::Code { lang, value } => vec![code(lang.as_deref(), value)],
        ast::Block::BlockQuote(children) => vec![callout::blockquote(children, options)],
        ast::Block::List { start, items } => list(start.is_some(), items, options),
        ast::Block::Table { rows } => table(rows).into_iter().collect(),
        ast::Block::Math(value) => vec![equation(value)],
        ast::Block::ThematicBreak => vec![Block::divider()],
        other => {
            tracing::debug!(kind = other.kind(), "Dropping unsupported block");
            Vec::new()
        }
    }
}

/// Translate a sequence of flow nodes, preserving order
pub fn blocks_all(nodes: &[ast::Block], options: &Options) -> Vec<Block> {
    nodes.iter().flat_map(|node| blocks(node, options)).collect()
}

fn heading(depth: u8, content: &[Inline]) -> Block {
    let rich_text = inline::resolve_all(content, &Context::new());
    match depth {
        1 => Block::heading_one(rich_text),
        2 => Block::heading_two(rich_text),
        _ => Block::heading_three(rich_text),
    }
}

fn code(lang: Option<&str>, value: &str) -> Block {
    Block::code(
        inline::chunk_text(value, &Context::new()),
        CodeLanguage::resolve(lang),
    )
}

fn list(ordered: bool, items: &[ListItem], options: &Options) -> Vec<Block> {
    items
        .iter()
        .map(|item| list_item(ordered, item, options))
        .collect()
}

fn list_item(ordered: bool, item: &ListItem, options: &Options) -> Block {
    let (rich_text, rest) = match item.content.split_first() {
        Some((ast::Block::Paragraph(inlines), rest)) => {
            (inline::resolve_all(inlines, &Context::new()), rest)
        }
        _ => (Vec::new(), item.content.as_slice()),
    };
    let children = blocks_all(rest, options);

    if ordered {
        Block::numbered_list_item(rich_text, children)
    } else if let Some(checked) = item.checked {
        Block::to_do(checked, rich_text, children)
    } else {
        Block::bulleted_list_item(rich_text, children)
    }
}

fn table(rows: &[TableRow]) -> Option<Block> {
    let width = rows.first()?.len();
    let ctx = Context::new();
    let rows = rows
        .iter()
        .map(|row| {
            Block::table_row(
                row.iter()
                    .map(|cell| inline::resolve_all(cell, &ctx))
                    .collect(),
            )
        })
        .collect();
    Some(Block::table(rows, width))
}

fn equation(value: &str) -> Block {
    // KaTeX line continuation
    Block::equation(value.replace('\n', "\\\\\n"))
}
