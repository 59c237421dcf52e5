//! Markdown front-end.
//!
//! Folds pulldown-cmark's event stream into the mdast-shaped tree from
//! [`martian_core::ast`]. GFM tables, strikethrough, task lists and `$`
//! math are enabled. Alert markers such as `[!NOTE]` are left as plain text
//! so the block translator can recognise them.

use std::mem;

use martian_core::ast::{inlines_plain_text, Block, Inline, ListItem, Root, TableRow};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag};

/// Parser extensions used by [`parse_markdown`]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_MATH
}

/// Parse a Markdown string into a tree
pub fn parse_markdown(markdown: &str) -> Root {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(markdown, parser_options()) {
        builder.event(event);
    }
    builder.finish()
}

enum Span {
    Emphasis,
    Strong,
    Delete,
    Link { url: String, title: Option<String> },
    Image { url: String, title: Option<String> },
}

/// An open node waiting for its end event
enum Frame {
    Root(Vec<Block>),
    BlockQuote(Vec<Block>),
    List {
        start: Option<u64>,
        items: Vec<ListItem>,
    },
    /// Tight items hold inline content directly, collected in `loose`
    Item {
        checked: Option<bool>,
        blocks: Vec<Block>,
        loose: Vec<Inline>,
    },
    Paragraph {
        inlines: Vec<Inline>,
        display_math: usize,
    },
    Heading {
        depth: u8,
        inlines: Vec<Inline>,
    },
    Code {
        lang: Option<String>,
        value: String,
    },
    Html(String),
    Table(Vec<TableRow>),
    Row(TableRow),
    Cell(Vec<Inline>),
    Span {
        span: Span,
        inlines: Vec<Inline>,
    },
    /// Constructs without a tree node of their own; content moves to the parent
    Transparent {
        blocks: Vec<Block>,
        inlines: Vec<Inline>,
    },
}

struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Root(Vec::new())],
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.text(text),
            Event::Code(code) => self.push_inline(Inline::Code(code.into_string())),
            Event::InlineMath(math) => self.push_inline(Inline::Math(math.into_string())),
            Event::DisplayMath(math) => {
                if let Some(Frame::Paragraph { display_math, .. }) = self.stack.last_mut() {
                    *display_math += 1;
                }
                self.push_inline(Inline::Math(math.trim().to_string()));
            }
            Event::Html(html) => match self.stack.last_mut() {
                Some(Frame::Html(value)) => value.push_str(&html),
                _ => self.push_block(Block::Html(html.into_string())),
            },
            Event::InlineHtml(html) => self.push_inline(Inline::Html(html.into_string())),
            Event::SoftBreak => self.push_inline(Inline::text("\n")),
            Event::HardBreak => self.push_inline(Inline::Break),
            Event::Rule => self.push_block(Block::ThematicBreak),
            Event::TaskListMarker(checked) => self.mark_task(checked),
            Event::FootnoteReference(_) => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph {
                inlines: Vec::new(),
                display_math: 0,
            },
            Tag::Heading { level, .. } => Frame::Heading {
                depth: level as u8,
                inlines: Vec::new(),
            },
            Tag::BlockQuote(_) => Frame::BlockQuote(Vec::new()),
            Tag::CodeBlock(kind) => Frame::Code {
                lang: match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
                    CodeBlockKind::Indented => None,
                },
                value: String::new(),
            },
            Tag::HtmlBlock => Frame::Html(String::new()),
            Tag::List(start) => Frame::List {
                start,
                items: Vec::new(),
            },
            Tag::Item => Frame::Item {
                checked: None,
                blocks: Vec::new(),
                loose: Vec::new(),
            },
            Tag::Table(_) => Frame::Table(Vec::new()),
            Tag::TableHead | Tag::TableRow => Frame::Row(Vec::new()),
            Tag::TableCell => Frame::Cell(Vec::new()),
            Tag::Emphasis => span(Span::Emphasis),
            Tag::Strong => span(Span::Strong),
            Tag::Strikethrough => span(Span::Delete),
            Tag::Link {
                dest_url, title, ..
            } => span(Span::Link {
                url: dest_url.into_string(),
                title: non_empty(title),
            }),
            Tag::Image {
                dest_url, title, ..
            } => span(Span::Image {
                url: dest_url.into_string(),
                title: non_empty(title),
            }),
            _ => Frame::Transparent {
                blocks: Vec::new(),
                inlines: Vec::new(),
            },
        };
        self.stack.push(frame);
    }

    fn close(&mut self) {
        // the root frame is never closed by an event
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame {
            Frame::Root(_) => {}
            Frame::BlockQuote(children) => self.push_block(Block::BlockQuote(children)),
            Frame::List { start, items } => self.push_block(Block::List { start, items }),
            Frame::Item {
                checked,
                mut blocks,
                mut loose,
            } => {
                flush_loose(&mut loose, &mut blocks);
                let item = ListItem {
                    checked,
                    content: blocks,
                };
                match self.stack.last_mut() {
                    Some(Frame::List { items, .. }) => items.push(item),
                    _ => item.content.into_iter().for_each(|block| self.push_block(block)),
                }
            }
            Frame::Paragraph {
                inlines,
                display_math,
            } => {
                for block in finish_paragraph(inlines, display_math) {
                    self.push_block(block);
                }
            }
            Frame::Heading { depth, inlines } => self.push_block(Block::Heading {
                depth,
                content: inlines,
            }),
            Frame::Code { lang, mut value } => {
                if value.ends_with('\n') {
                    value.pop();
                }
                self.push_block(Block::Code { lang, value });
            }
            Frame::Html(value) => self.push_block(Block::Html(value)),
            Frame::Table(rows) => self.push_block(Block::Table { rows }),
            Frame::Row(cells) => {
                if let Some(Frame::Table(rows)) = self.stack.last_mut() {
                    rows.push(cells);
                }
            }
            Frame::Cell(inlines) => {
                if let Some(Frame::Row(cells)) = self.stack.last_mut() {
                    cells.push(inlines);
                }
            }
            Frame::Span { span, inlines } => self.push_inline(finish_span(span, inlines)),
            Frame::Transparent { blocks, inlines } => {
                inlines.into_iter().for_each(|node| self.push_inline(node));
                blocks.into_iter().for_each(|block| self.push_block(block));
            }
        }
    }

    fn text(&mut self, text: CowStr<'_>) {
        match self.stack.last_mut() {
            Some(Frame::Code { value, .. }) => value.push_str(&text),
            Some(Frame::Html(value)) => value.push_str(&text),
            _ => self.push_inline(Inline::Text(text.into_string())),
        }
    }

    fn push_inline(&mut self, node: Inline) {
        let inlines = match self.stack.last_mut() {
            Some(
                Frame::Paragraph { inlines, .. }
                | Frame::Heading { inlines, .. }
                | Frame::Cell(inlines)
                | Frame::Span { inlines, .. }
                | Frame::Transparent { inlines, .. }
                | Frame::Item { loose: inlines, .. },
            ) => inlines,
            _ => {
                self.push_block(Block::Paragraph(vec![node]));
                return;
            }
        };
        append_inline(inlines, node);
    }

    fn push_block(&mut self, block: Block) {
        for frame in self.stack.iter_mut().rev() {
            match frame {
                Frame::Root(blocks)
                | Frame::BlockQuote(blocks)
                | Frame::Transparent { blocks, .. } => {
                    blocks.push(block);
                    return;
                }
                Frame::Item { blocks, loose, .. } => {
                    flush_loose(loose, blocks);
                    blocks.push(block);
                    return;
                }
                _ => {}
            }
        }
    }

    fn mark_task(&mut self, checked: bool) {
        let item = self.stack.iter_mut().rev().find_map(|frame| match frame {
            Frame::Item { checked, .. } => Some(checked),
            _ => None,
        });
        if let Some(slot) = item {
            *slot = Some(checked);
        }
    }

    fn finish(mut self) -> Root {
        while self.stack.len() > 1 {
            self.close();
        }
        match self.stack.pop() {
            Some(Frame::Root(children)) => Root::new(children),
            _ => Root::default(),
        }
    }
}

fn span(span: Span) -> Frame {
    Frame::Span {
        span,
        inlines: Vec::new(),
    }
}

fn non_empty(value: CowStr<'_>) -> Option<String> {
    (!value.is_empty()).then(|| value.into_string())
}

/// Merge adjacent text so alert markers and emoji survive event splitting
fn append_inline(inlines: &mut Vec<Inline>, node: Inline) {
    if let Inline::Text(next) = &node {
        if let Some(Inline::Text(previous)) = inlines.last_mut() {
            previous.push_str(next);
            return;
        }
    }
    inlines.push(node);
}

fn flush_loose(loose: &mut Vec<Inline>, blocks: &mut Vec<Block>) {
    if !loose.is_empty() {
        blocks.push(Block::Paragraph(mem::take(loose)));
    }
}

fn finish_span(span: Span, inlines: Vec<Inline>) -> Inline {
    match span {
        Span::Emphasis => Inline::Emphasis(inlines),
        Span::Strong => Inline::Strong(inlines),
        Span::Delete => Inline::Delete(inlines),
        Span::Link { url, title } => Inline::Link {
            url,
            title,
            content: inlines,
        },
        Span::Image { url, title } => Inline::Image {
            url,
            alt: inlines_plain_text(&inlines),
            title,
        },
    }
}

/// A paragraph holding only `$$` display math becomes math blocks
fn finish_paragraph(inlines: Vec<Inline>, display_math: usize) -> Vec<Block> {
    let math_only = display_math > 0
        && inlines.iter().all(|node| match node {
            Inline::Math(_) => true,
            other => other.is_blank(),
        });
    if !math_only {
        return vec![Block::Paragraph(inlines)];
    }

    inlines
        .into_iter()
        .filter_map(|node| match node {
            Inline::Math(value) => Some(Block::Math(value)),
            _ => None,
        })
        .collect()
}
