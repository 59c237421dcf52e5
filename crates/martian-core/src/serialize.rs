//! Notion API serialization
//!
//! Converts the block model into the JSON bodies expected by the
//! append-block-children endpoint.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::notion::{Block, CodeLanguage, Color, RichText};

/// Serialize a list of blocks to a JSON array value
pub fn to_json(blocks: &[Block]) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(blocks)
}

/// Serialize a list of blocks to a JSON string
pub fn to_json_string(blocks: &[Block]) -> serde_json::Result<String> {
    serde_json::to_string(blocks)
}

#[derive(Serialize)]
struct Link<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct TextContent<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<Link<'a>>,
}

#[derive(Serialize)]
struct Expression<'a> {
    expression: &'a str,
}

impl Serialize for RichText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        match self {
            RichText::Text {
                content,
                link,
                annotations,
            } => {
                map.serialize_entry("type", "text")?;
                map.serialize_entry(
                    "text",
                    &TextContent {
                        content,
                        link: link.as_deref().map(|url| Link { url }),
                    },
                )?;
                map.serialize_entry("annotations", annotations)?;
            }
            RichText::Equation {
                expression,
                annotations,
            } => {
                map.serialize_entry("type", "equation")?;
                map.serialize_entry("equation", &Expression { expression })?;
                map.serialize_entry("annotations", annotations)?;
            }
        }
        map.end()
    }
}

fn no_children(children: &&[Block]) -> bool {
    children.is_empty()
}

#[derive(Serialize)]
struct TextPayload<'a> {
    rich_text: &'a [RichText],
    #[serde(skip_serializing_if = "no_children")]
    children: &'a [Block],
}

#[derive(Serialize)]
struct ToDoPayload<'a> {
    rich_text: &'a [RichText],
    checked: bool,
    #[serde(skip_serializing_if = "no_children")]
    children: &'a [Block],
}

#[derive(Serialize)]
struct Emoji<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    emoji: &'a str,
}

#[derive(Serialize)]
struct CalloutPayload<'a> {
    rich_text: &'a [RichText],
    icon: Emoji<'a>,
    color: Color,
    #[serde(skip_serializing_if = "no_children")]
    children: &'a [Block],
}

#[derive(Serialize)]
struct CodePayload<'a> {
    rich_text: &'a [RichText],
    language: CodeLanguage,
}

#[derive(Serialize)]
struct ImagePayload<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    external: Link<'a>,
}

#[derive(Serialize)]
struct TablePayload<'a> {
    table_width: usize,
    has_column_header: bool,
    has_row_header: bool,
    #[serde(skip_serializing_if = "no_children")]
    children: &'a [Block],
}

#[derive(Serialize)]
struct TableRowPayload<'a> {
    cells: &'a [Vec<RichText>],
}

#[derive(Serialize)]
struct Empty {}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("type", kind)?;

        match self {
            Block::Paragraph { rich_text }
            | Block::Heading1 { rich_text }
            | Block::Heading2 { rich_text }
            | Block::Heading3 { rich_text } => map.serialize_entry(
                kind,
                &TextPayload {
                    rich_text,
                    children: &[],
                },
            )?,
            Block::BulletedListItem {
                rich_text,
                children,
            }
            | Block::NumberedListItem {
                rich_text,
                children,
            }
            | Block::Quote {
                rich_text,
                children,
            } => map.serialize_entry(
                kind,
                &TextPayload {
                    rich_text,
                    children,
                },
            )?,
            Block::ToDo {
                checked,
                rich_text,
                children,
            } => map.serialize_entry(
                kind,
                &ToDoPayload {
                    rich_text,
                    checked: *checked,
                    children,
                },
            )?,
            Block::Callout {
                rich_text,
                icon,
                color,
                children,
            } => map.serialize_entry(
                kind,
                &CalloutPayload {
                    rich_text,
                    icon: Emoji {
                        kind: "emoji",
                        emoji: icon,
                    },
                    color: *color,
                    children,
                },
            )?,
            Block::Code {
                rich_text,
                language,
            } => map.serialize_entry(
                kind,
                &CodePayload {
                    rich_text,
                    language: *language,
                },
            )?,
            Block::Image { url } => map.serialize_entry(
                kind,
                &ImagePayload {
                    kind: "external",
                    external: Link { url },
                },
            )?,
            Block::Table {
                width,
                has_column_header,
                has_row_header,
                children,
            } => map.serialize_entry(
                kind,
                &TablePayload {
                    table_width: *width,
                    has_column_header: *has_column_header,
                    has_row_header: *has_row_header,
                    children,
                },
            )?,
            Block::TableRow { cells } => map.serialize_entry(kind, &TableRowPayload { cells })?,
            Block::Equation { expression } => {
                map.serialize_entry(kind, &Expression { expression })?
            }
            Block::Divider | Block::TableOfContents => map.serialize_entry(kind, &Empty {})?,
        }

        map.end()
    }
}
