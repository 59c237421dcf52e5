//! Request limits enforced by the Notion API
//!
//! Lengths are counted in UTF-16 code units, the way the API measures them.

/// Maximum number of blocks in one append-children payload
pub const PAYLOAD_BLOCKS: usize = 1000;

/// Maximum number of runs in one rich text array
pub const RICH_TEXT_ARRAYS: usize = 100;

/// Maximum length of a text run's content
pub const RICH_TEXT_CONTENT: usize = 2000;

/// Maximum length of a text run's link URL
pub const RICH_TEXT_LINK_URL: usize = 1000;

/// Length of `value` as counted against the limits above
pub fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}
