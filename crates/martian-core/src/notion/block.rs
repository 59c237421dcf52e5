//! Notion block model
//!
//! Builders here only pack already-resolved fields; all translation
//! decisions live in the `martian` crate.

use super::language::CodeLanguage;
use super::rich_text::{Color, RichText};

/// A Notion block as sent in an append-children request
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph {
        rich_text: Vec<RichText>,
    },
    Heading1 {
        rich_text: Vec<RichText>,
    },
    Heading2 {
        rich_text: Vec<RichText>,
    },
    Heading3 {
        rich_text: Vec<RichText>,
    },
    BulletedListItem {
        rich_text: Vec<RichText>,
        children: Vec<Block>,
    },
    NumberedListItem {
        rich_text: Vec<RichText>,
        children: Vec<Block>,
    },
    ToDo {
        checked: bool,
        rich_text: Vec<RichText>,
        children: Vec<Block>,
    },
    Quote {
        rich_text: Vec<RichText>,
        children: Vec<Block>,
    },
    Callout {
        rich_text: Vec<RichText>,
        /// Emoji icon
        icon: String,
        color: Color,
        children: Vec<Block>,
    },
    Code {
        rich_text: Vec<RichText>,
        language: CodeLanguage,
    },
    /// Externally hosted image
    Image {
        url: String,
    },
    Table {
        width: usize,
        has_column_header: bool,
        has_row_header: bool,
        /// `TableRow` blocks
        children: Vec<Block>,
    },
    TableRow {
        cells: Vec<Vec<RichText>>,
    },
    Equation {
        expression: String,
    },
    Divider,
    TableOfContents,
}

impl Block {
    pub fn paragraph(rich_text: Vec<RichText>) -> Self {
        Block::Paragraph { rich_text }
    }

    pub fn heading_one(rich_text: Vec<RichText>) -> Self {
        Block::Heading1 { rich_text }
    }

    pub fn heading_two(rich_text: Vec<RichText>) -> Self {
        Block::Heading2 { rich_text }
    }

    pub fn heading_three(rich_text: Vec<RichText>) -> Self {
        Block::Heading3 { rich_text }
    }

    pub fn bulleted_list_item(rich_text: Vec<RichText>, children: Vec<Block>) -> Self {
        Block::BulletedListItem {
            rich_text,
            children,
        }
    }

    pub fn numbered_list_item(rich_text: Vec<RichText>, children: Vec<Block>) -> Self {
        Block::NumberedListItem {
            rich_text,
            children,
        }
    }

    pub fn to_do(checked: bool, rich_text: Vec<RichText>, children: Vec<Block>) -> Self {
        Block::ToDo {
            checked,
            rich_text,
            children,
        }
    }

    pub fn quote(rich_text: Vec<RichText>, children: Vec<Block>) -> Self {
        Block::Quote {
            rich_text,
            children,
        }
    }

    pub fn callout(
        rich_text: Vec<RichText>,
        icon: impl Into<String>,
        color: Color,
        children: Vec<Block>,
    ) -> Self {
        Block::Callout {
            rich_text,
            icon: icon.into(),
            color,
            children,
        }
    }

    pub fn code(rich_text: Vec<RichText>, language: CodeLanguage) -> Self {
        Block::Code {
            rich_text,
            language,
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Block::Image { url: url.into() }
    }

    pub fn table(rows: Vec<Block>, width: usize) -> Self {
        Block::Table {
            width,
            has_column_header: true,
            has_row_header: false,
            children: rows,
        }
    }

    pub fn table_row(cells: Vec<Vec<RichText>>) -> Self {
        Block::TableRow { cells }
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Block::Equation {
            expression: expression.into(),
        }
    }

    pub fn divider() -> Self {
        Block::Divider
    }

    pub fn table_of_contents() -> Self {
        Block::TableOfContents
    }

    /// The Notion `type` tag of this block
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Heading1 { .. } => "heading_1",
            Block::Heading2 { .. } => "heading_2",
            Block::Heading3 { .. } => "heading_3",
            Block::BulletedListItem { .. } => "bulleted_list_item",
            Block::NumberedListItem { .. } => "numbered_list_item",
            Block::ToDo { .. } => "to_do",
            Block::Quote { .. } => "quote",
            Block::Callout { .. } => "callout",
            Block::Code { .. } => "code",
            Block::Image { .. } => "image",
            Block::Table { .. } => "table",
            Block::TableRow { .. } => "table_row",
            Block::Equation { .. } => "equation",
            Block::Divider => "divider",
            Block::TableOfContents => "table_of_contents",
        }
    }

    /// Rich text directly owned by this block (table cells excluded)
    pub fn rich_text(&self) -> Option<&[RichText]> {
        match self {
            Block::Paragraph { rich_text }
            | Block::Heading1 { rich_text }
            | Block::Heading2 { rich_text }
            | Block::Heading3 { rich_text }
            | Block::BulletedListItem { rich_text, .. }
            | Block::NumberedListItem { rich_text, .. }
            | Block::ToDo { rich_text, .. }
            | Block::Quote { rich_text, .. }
            | Block::Callout { rich_text, .. }
            | Block::Code { rich_text, .. } => Some(rich_text),
            _ => None,
        }
    }

    /// Nested child blocks
    pub fn children(&self) -> &[Block] {
        match self {
            Block::BulletedListItem { children, .. }
            | Block::NumberedListItem { children, .. }
            | Block::ToDo { children, .. }
            | Block::Quote { children, .. }
            | Block::Callout { children, .. }
            | Block::Table { children, .. } => children,
            _ => &[],
        }
    }

    /// Visit every rich text run in this block and its descendants, table cells included
    pub fn for_each_rich_text_mut(&mut self, f: &mut dyn FnMut(&mut RichText)) {
        match self {
            Block::Paragraph { rich_text }
            | Block::Heading1 { rich_text }
            | Block::Heading2 { rich_text }
            | Block::Heading3 { rich_text }
            | Block::Code { rich_text, .. } => rich_text.iter_mut().for_each(f),
            Block::BulletedListItem {
                rich_text,
                children,
            }
            | Block::NumberedListItem {
                rich_text,
                children,
            }
            | Block::ToDo {
                rich_text,
                children,
                ..
            }
            | Block::Quote {
                rich_text,
                children,
            }
            | Block::Callout {
                rich_text,
                children,
                ..
            } => {
                rich_text.iter_mut().for_each(&mut *f);
                for child in children {
                    child.for_each_rich_text_mut(f);
                }
            }
            Block::Table { children, .. } => {
                for child in children {
                    child.for_each_rich_text_mut(f);
                }
            }
            Block::TableRow { cells } => cells.iter_mut().flatten().for_each(f),
            Block::Image { .. } | Block::Equation { .. } | Block::Divider | Block::TableOfContents => {}
        }
    }
}
