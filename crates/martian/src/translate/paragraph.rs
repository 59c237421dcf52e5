//! Paragraphs: table-of-contents markers, image hoisting and hard breaks.

use std::ffi::OsStr;
use std::path::Path;

use martian_core::ast::Inline;
use martian_core::notion::{Block, RichText};
use url::Url;

use crate::inline::{self, Context};
use crate::options::Options;

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "tif", "tiff", "bmp", "svg", "heic", "webp",
];

/// Outcome of checking an image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Usable as an external image block
    Accepted(&'a str),
    /// Rendered as text instead
    Rejected {
        url: &'a str,
        reason: ImageRejection,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImageRejection {
    #[error("not an absolute URL: {0}")]
    Malformed(url::ParseError),
    #[error("unsupported image extension")]
    UnsupportedExtension,
}

/// Check an image URL against the strictness setting
pub fn image_source<'a>(url: &'a str, options: &Options) -> ImageSource<'a> {
    if !options.strict_image_urls {
        return ImageSource::Accepted(url);
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(err) => {
            return ImageSource::Rejected {
                url,
                reason: ImageRejection::Malformed(err),
            }
        }
    };

    let extension = Path::new(parsed.path())
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match extension {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => ImageSource::Accepted(url),
        _ => ImageSource::Rejected {
            url,
            reason: ImageRejection::UnsupportedExtension,
        },
    }
}

pub(super) fn paragraph(inlines: &[Inline], options: &Options) -> Vec<Block> {
    if is_table_of_contents(inlines) {
        return vec![Block::table_of_contents()];
    }

    let ctx = Context::new();
    let mut blocks = Vec::new();
    let mut current: Vec<RichText> = Vec::new();

    for node in inlines {
        match node {
            Inline::Image { url, .. } => match image_source(url, options) {
                ImageSource::Accepted(url) => {
                    flush(&mut current, &mut blocks);
                    blocks.push(Block::image(url));
                }
                ImageSource::Rejected { url, reason } => {
                    tracing::debug!(url, %reason, "Rendering image as text");
                    current.extend(inline::chunk_text(url, &ctx));
                }
            },
            Inline::Break => flush(&mut current, &mut blocks),
            other => current.extend(inline::resolve(other, &ctx)),
        }
    }
    flush(&mut current, &mut blocks);

    blocks
}

fn flush(current: &mut Vec<RichText>, blocks: &mut Vec<Block>) {
    if !current.is_empty() {
        blocks.push(Block::paragraph(std::mem::take(current)));
    }
}

/// `[[_TOC_]]` as written by GitLab and Azure DevOps
fn is_table_of_contents(inlines: &[Inline]) -> bool {
    match inlines {
        [Inline::Text(open), Inline::Emphasis(inner), ..] if open == "[[" => {
            matches!(inner.as_slice(), [Inline::Text(marker)] if marker == "TOC")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(value: &str) -> RichText {
        RichText::text(value)
    }

    #[rstest]
    #[case("https://example.com/image.png", true)]
    #[case("https://example.com/image.JPEG", true)]
    #[case("https://example.com/a/b.webp?size=2", true)]
    #[case("https://example.com/image.txt", false)]
    #[case("https://example.com/image", false)]
    #[case("image.png", false)]
    #[case("not a url", false)]
    fn test_strict_image_source(#[case] url: &str, #[case] accepted: bool) {
        let source = image_source(url, &Options::default());
        assert_eq!(matches!(source, ImageSource::Accepted(_)), accepted);
    }

    #[test]
    fn test_relaxed_image_source() {
        let options = Options {
            strict_image_urls: false,
            ..Default::default()
        };
        assert_eq!(
            image_source("image.png", &options),
            ImageSource::Accepted("image.png")
        );
    }

    #[test]
    fn test_rejection_reason() {
        let source = image_source("https://example.com/doc.pdf", &Options::default());
        assert_eq!(
            source,
            ImageSource::Rejected {
                url: "https://example.com/doc.pdf",
                reason: ImageRejection::UnsupportedExtension,
            }
        );
    }

    #[test]
    fn test_image_splits_paragraph() {
        let inlines = vec![
            Inline::text("before "),
            Inline::image("https://example.com/a.png"),
            Inline::text(" after"),
        ];
        assert_eq!(
            paragraph(&inlines, &Options::default()),
            vec![
                Block::paragraph(vec![text("before ")]),
                Block::image("https://example.com/a.png"),
                Block::paragraph(vec![text(" after")]),
            ]
        );
    }

    #[test]
    fn test_lone_image_has_no_empty_paragraphs() {
        let inlines = vec![Inline::image("https://example.com/a.png")];
        assert_eq!(
            paragraph(&inlines, &Options::default()),
            vec![Block::image("https://example.com/a.png")]
        );
    }

    #[test]
    fn test_invalid_image_becomes_text() {
        let inlines = vec![Inline::text("see "), Inline::image("diagram.png")];
        assert_eq!(
            paragraph(&inlines, &Options::default()),
            vec![Block::paragraph(vec![text("see "), text("diagram.png")])]
        );
    }

    #[test]
    fn test_break_splits_paragraph() {
        let inlines = vec![Inline::text("one"), Inline::Break, Inline::text("two")];
        assert_eq!(
            paragraph(&inlines, &Options::default()),
            vec![
                Block::paragraph(vec![text("one")]),
                Block::paragraph(vec![text("two")]),
            ]
        );
    }

    #[test]
    fn test_break_inside_strong_stays_in_paragraph() {
        let inlines = vec![Inline::Strong(vec![
            Inline::text("one"),
            Inline::Break,
            Inline::text("two"),
        ])];
        let blocks = paragraph(&inlines, &Options::default());
        assert_eq!(blocks.len(), 1);
        let runs = blocks[0].rich_text().unwrap();
        let contents: Vec<&str> = runs.iter().map(RichText::content).collect();
        assert_eq!(contents, vec!["one", "\n", "two"]);
        assert!(runs.iter().all(|run| run.annotations().bold));
    }

    #[test]
    fn test_table_of_contents_marker() {
        let inlines = vec![
            Inline::text("[["),
            Inline::Emphasis(vec![Inline::text("TOC")]),
            Inline::text("]]"),
        ];
        assert_eq!(
            paragraph(&inlines, &Options::default()),
            vec![Block::table_of_contents()]
        );
    }

    #[test]
    fn test_near_miss_table_of_contents() {
        let inlines = vec![
            Inline::text("[["),
            Inline::Emphasis(vec![Inline::text("toc")]),
            Inline::text("]]"),
        ];
        let out = paragraph(&inlines, &Options::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind(), "paragraph");
    }
}
