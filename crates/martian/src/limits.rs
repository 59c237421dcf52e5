//! Notion request limit enforcement.
//!
//! Runs after translation. Oversized arrays and text runs are reported
//! through [`LimitOptions::on_error`] and, unless truncation is disabled,
//! cut down to size. Link URLs are only reported.

use martian_core::limits::{
    text_length, PAYLOAD_BLOCKS, RICH_TEXT_ARRAYS, RICH_TEXT_CONTENT, RICH_TEXT_LINK_URL,
};
use martian_core::notion::{Block, RichText};

use crate::options::LimitOptions;

const ELLIPSIS: &str = "...";

/// A Notion request limit that the converted output exceeds
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LimitViolation {
    #[error("Resulting blocks array exceeds Notion limit ({max}): got {count}")]
    TooManyBlocks { count: usize, max: usize },

    #[error("Resulting rich text array exceeds Notion limit ({max}): got {count}")]
    TooManyRichTexts { count: usize, max: usize },

    #[error("Text content exceeds Notion limit ({max} characters): got {length}")]
    TextTooLong { length: usize, max: usize },

    #[error("Link URL exceeds Notion limit ({max} characters): got {length}")]
    LinkTooLong { length: usize, max: usize },
}

/// Enforce limits on a top-level block list and every run inside it
pub fn enforce_blocks(mut blocks: Vec<Block>, options: &LimitOptions) -> Vec<Block> {
    if blocks.len() > PAYLOAD_BLOCKS {
        options.report(&LimitViolation::TooManyBlocks {
            count: blocks.len(),
            max: PAYLOAD_BLOCKS,
        });
        if options.truncate {
            blocks.truncate(PAYLOAD_BLOCKS);
        }
    }

    for block in &mut blocks {
        block.for_each_rich_text_mut(&mut |run: &mut RichText| check_run(run, options));
    }
    blocks
}

/// Enforce limits on a rich text array
pub fn enforce_rich_text(mut runs: Vec<RichText>, options: &LimitOptions) -> Vec<RichText> {
    if runs.len() > RICH_TEXT_ARRAYS {
        options.report(&LimitViolation::TooManyRichTexts {
            count: runs.len(),
            max: RICH_TEXT_ARRAYS,
        });
        if options.truncate {
            runs.truncate(RICH_TEXT_ARRAYS);
        }
    }

    for run in &mut runs {
        check_run(run, options);
    }
    runs
}

fn check_run(run: &mut RichText, options: &LimitOptions) {
    // equations carry neither content nor links
    let RichText::Text { content, link, .. } = run else {
        return;
    };

    let length = text_length(content);
    if length > RICH_TEXT_CONTENT {
        options.report(&LimitViolation::TextTooLong {
            length,
            max: RICH_TEXT_CONTENT,
        });
        if options.truncate {
            *content = truncate_with_ellipsis(content, RICH_TEXT_CONTENT);
        }
    }

    if let Some(url) = link {
        let length = text_length(url);
        if length > RICH_TEXT_LINK_URL {
            options.report(&LimitViolation::LinkTooLong {
                length,
                max: RICH_TEXT_LINK_URL,
            });
        }
    }
}

/// Cut `content` on a char boundary so that, with the ellipsis, it fits in `max` units
fn truncate_with_ellipsis(content: &str, max: usize) -> String {
    let budget = max - text_length(ELLIPSIS);
    let mut units = 0;
    let end = content
        .char_indices()
        .find(|(_, c)| {
            units += c.len_utf16();
            units > budget
        })
        .map_or(content.len(), |(index, _)| index);
    let mut truncated = content[..end].to_string();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording() -> (LimitOptions, Arc<Mutex<Vec<LimitViolation>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let options = LimitOptions::default().on_error(move |violation| {
            sink.lock().unwrap().push(violation.clone());
        });
        (options, seen)
    }

    fn paragraphs(count: usize) -> Vec<Block> {
        (0..count)
            .map(|i| Block::paragraph(vec![RichText::text(i.to_string())]))
            .collect()
    }

    #[test]
    fn test_truncates_block_count() {
        let (options, seen) = recording();
        let blocks = enforce_blocks(paragraphs(1005), &options);
        assert_eq!(blocks.len(), 1000);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![LimitViolation::TooManyBlocks {
                count: 1005,
                max: 1000
            }]
        );
    }

    #[test]
    fn test_keeps_block_count_without_truncation() {
        let (mut options, seen) = recording();
        options.truncate = false;
        let blocks = enforce_blocks(paragraphs(1001), &options);
        assert_eq!(blocks.len(), 1001);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_truncates_long_text_with_ellipsis() {
        let (options, seen) = recording();
        let runs = enforce_rich_text(vec![RichText::text("é".repeat(2500))], &options);
        let content = runs[0].content();
        assert_eq!(content.chars().count(), 2000);
        assert!(content.ends_with("..."));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![LimitViolation::TextTooLong {
                length: 2500,
                max: 2000
            }]
        );
    }

    #[test]
    fn test_measures_text_in_utf16_units() {
        let (options, seen) = recording();
        let runs = enforce_rich_text(vec![RichText::text("🦀".repeat(1500))], &options);
        let content = runs[0].content();
        assert!(text_length(content) <= 2000);
        assert_eq!(content.chars().filter(|c| *c == '🦀').count(), 998);
        assert!(content.ends_with("..."));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![LimitViolation::TextTooLong {
                length: 3000,
                max: 2000
            }]
        );
    }

    #[test]
    fn test_surrogate_pairs_at_the_limit_pass() {
        let (options, seen) = recording();
        let text = "🦀".repeat(1000);
        let runs = enforce_rich_text(vec![RichText::text(text.clone())], &options);
        assert_eq!(runs[0].content(), text);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_checks_runs_in_table_cells() {
        let (options, seen) = recording();
        let table = Block::table(
            vec![Block::table_row(vec![vec![RichText::text("x".repeat(2001))]])],
            1,
        );
        let blocks = enforce_blocks(vec![table], &options);
        let Block::Table { children, .. } = &blocks[0] else {
            panic!("expected table");
        };
        let Block::TableRow { cells } = &children[0] else {
            panic!("expected table row");
        };
        assert_eq!(cells[0][0].content().chars().count(), 2000);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_long_link_is_reported_not_truncated() {
        let (options, seen) = recording();
        let url = format!("https://example.com/{}", "a".repeat(1000));
        let runs = enforce_rich_text(vec![RichText::text("link").with_link(url.clone())], &options);
        assert_eq!(runs[0].link(), Some(url.as_str()));
        assert!(matches!(
            seen.lock().unwrap()[0],
            LimitViolation::LinkTooLong { max: 1000, .. }
        ));
    }

    #[test]
    fn test_equations_are_exempt() {
        let (options, seen) = recording();
        let runs = enforce_rich_text(vec![RichText::equation("x".repeat(3000))], &options);
        assert_eq!(runs[0].content().len(), 3000);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_within_limits_is_untouched() {
        let (options, seen) = recording();
        let runs = vec![RichText::text("a"); 100];
        assert_eq!(enforce_rich_text(runs.clone(), &options), runs);
        assert!(seen.lock().unwrap().is_empty());
    }
}
