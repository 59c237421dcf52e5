//! Conversion options.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::limits::LimitViolation;
use crate::{MartianError, Result};

/// Callback invoked for every limit violation
pub type LimitCallback = Arc<dyn Fn(&LimitViolation) + Send + Sync>;

/// What the rich-text entry point does with non-paragraph top-level nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonInline {
    /// Drop them
    #[default]
    Ignore,
    /// Fail with [`MartianError::UnsupportedNode`]
    Throw,
}

impl FromStr for NonInline {
    type Err = MartianError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(NonInline::Ignore),
            "throw" => Ok(NonInline::Throw),
            other => Err(MartianError::InvalidOptions(format!(
                "unknown nonInline mode '{other}', expected 'ignore' or 'throw'"
            ))),
        }
    }
}

/// Handling of Notion's request limits
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LimitOptions {
    /// Truncate offending arrays and text instead of passing them through
    pub truncate: bool,

    /// Called once per violation, whether or not truncation is enabled
    #[serde(skip)]
    pub on_error: Option<LimitCallback>,
}

impl Default for LimitOptions {
    fn default() -> Self {
        Self {
            truncate: true,
            on_error: None,
        }
    }
}

impl LimitOptions {
    /// Set the violation callback
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&LimitViolation) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(callback));
        self
    }

    pub(crate) fn report(&self, violation: &LimitViolation) {
        tracing::warn!(truncate = self.truncate, "{violation}");
        if let Some(callback) = &self.on_error {
            callback(violation);
        }
    }
}

impl fmt::Debug for LimitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimitOptions")
            .field("truncate", &self.truncate)
            .field("on_error", &self.on_error.as_ref().map(|_| "Fn(&LimitViolation)"))
            .finish()
    }
}

/// Options for Markdown to Notion conversion
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Only emit image blocks for absolute URLs with a known image extension
    pub strict_image_urls: bool,

    /// Turn blockquotes starting with an emoji into callouts
    pub enable_emoji_callouts: bool,

    pub non_inline: NonInline,

    pub notion_limits: LimitOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strict_image_urls: true,
            enable_emoji_callouts: false,
            non_inline: NonInline::Ignore,
            notion_limits: LimitOptions::default(),
        }
    }
}

impl Options {
    /// Read options from a JSON object with camelCase keys.
    ///
    /// Missing keys keep their defaults. The limit callback cannot be set
    /// this way.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(options.strict_image_urls);
        assert!(!options.enable_emoji_callouts);
        assert_eq!(options.non_inline, NonInline::Ignore);
        assert!(options.notion_limits.truncate);
        assert!(options.notion_limits.on_error.is_none());
    }

    #[test]
    fn test_from_json_partial() {
        let options = Options::from_json(
            r#"{"enableEmojiCallouts": true, "nonInline": "throw", "notionLimits": {"truncate": false}}"#,
        )
        .unwrap();
        assert!(options.strict_image_urls);
        assert!(options.enable_emoji_callouts);
        assert_eq!(options.non_inline, NonInline::Throw);
        assert!(!options.notion_limits.truncate);
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        let err = Options::from_json(r#"{"nonInline": "explode"}"#).unwrap_err();
        assert!(matches!(err, MartianError::OptionsJson(_)));
    }

    #[test]
    fn test_non_inline_from_str() {
        assert_eq!("Throw".parse::<NonInline>().unwrap(), NonInline::Throw);
        assert_eq!(" ignore ".parse::<NonInline>().unwrap(), NonInline::Ignore);
        let err = "loud".parse::<NonInline>().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_report_calls_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let limits = LimitOptions::default().on_error(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        limits.report(&LimitViolation::TooManyBlocks {
            count: 1001,
            max: 1000,
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_hides_callback() {
        let limits = LimitOptions::default().on_error(|_| {});
        let debug = format!("{limits:?}");
        assert!(debug.contains("truncate: true"));
        assert!(debug.contains("Fn(&LimitViolation)"));
    }
}
