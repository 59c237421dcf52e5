//! MartianService - a reusable converter holding its options.

use martian_core::ast::Root;
use martian_core::notion::{Block, RichText};

use crate::limits::LimitViolation;
use crate::options::Options;
use crate::Result;

/// Converts Markdown to Notion blocks and rich text with a fixed set of options
#[derive(Debug, Clone)]
pub struct MartianService {
    options: Options,
}

impl MartianService {
    /// Create a MartianService with default options
    pub fn new() -> Self {
        Self {
            options: Options::default(),
        }
    }

    /// Create a MartianService with custom options
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Convert a Markdown tree to blocks
    pub fn blocks(&self, root: &Root) -> Vec<Block> {
        crate::to_blocks(root, &self.options)
    }

    /// Convert a Markdown tree holding an inline fragment to rich text
    pub fn rich_text(&self, root: &Root) -> Result<Vec<RichText>> {
        crate::to_rich_text(root, &self.options)
    }

    /// Parse and convert a Markdown string to blocks
    pub fn markdown_to_blocks(&self, markdown: &str) -> Vec<Block> {
        crate::markdown_to_blocks(markdown, &self.options)
    }

    /// Parse and convert an inline Markdown string to rich text
    pub fn markdown_to_rich_text(&self, markdown: &str) -> Result<Vec<RichText>> {
        crate::markdown_to_rich_text(markdown, &self.options)
    }

    /// Register a callback for limit violations
    pub fn on_limit_error<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&LimitViolation) + Send + Sync + 'static,
    {
        self.options.notion_limits = self.options.notion_limits.clone().on_error(callback);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

impl Default for MartianService {
    fn default() -> Self {
        Self::new()
    }
}
