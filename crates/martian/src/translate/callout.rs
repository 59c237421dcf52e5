//! Blockquotes: GFM alerts, emoji callouts and plain quotes.

use martian_core::ast::{self, Inline};
use martian_core::notion::{Block, Color, RichText};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{blocks_all, paragraph};
use crate::inline::{self, Context};
use crate::options::Options;

static ALERT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[!(NOTE|TIP|IMPORTANT|WARNING|CAUTION)\][ \t]*(?:\r?\n|$)").unwrap()
});

// Text-presentation symbols (©, ™, ‼) only count when followed by U+FE0F
static LEADING_EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:[0-9#*]\x{FE0F}?\x{20E3}",
        r"|\p{Regional_Indicator}{2}",
        r"|(?:\p{Emoji_Presentation}\x{FE0F}?|\p{Extended_Pictographic}\x{FE0F})\p{Emoji_Modifier}?",
        r"(?:\x{200D}\p{Extended_Pictographic}\x{FE0F}?\p{Emoji_Modifier}?)*)",
    ))
    .unwrap()
});

/// Background colors for emoji callouts, keyed without variation selectors
const EMOJI_COLORS: &[(&str, Color)] = &[
    ("📘", Color::BlueBackground),
    ("ℹ", Color::BlueBackground),
    ("📝", Color::BlueBackground),
    ("🔵", Color::BlueBackground),
    ("💡", Color::GreenBackground),
    ("✅", Color::GreenBackground),
    ("🌱", Color::GreenBackground),
    ("🟢", Color::GreenBackground),
    ("☝", Color::PurpleBackground),
    ("🔮", Color::PurpleBackground),
    ("🟣", Color::PurpleBackground),
    ("⚠", Color::YellowBackground),
    ("🚧", Color::YellowBackground),
    ("⚡", Color::YellowBackground),
    ("🟡", Color::YellowBackground),
    ("🔥", Color::OrangeBackground),
    ("🟠", Color::OrangeBackground),
    ("❗", Color::RedBackground),
    ("❌", Color::RedBackground),
    ("🚨", Color::RedBackground),
    ("⛔", Color::RedBackground),
    ("🛑", Color::RedBackground),
    ("🔴", Color::RedBackground),
];

/// GitHub alert kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "NOTE" => Some(AlertKind::Note),
            "TIP" => Some(AlertKind::Tip),
            "IMPORTANT" => Some(AlertKind::Important),
            "WARNING" => Some(AlertKind::Warning),
            "CAUTION" => Some(AlertKind::Caution),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlertKind::Note => "Note",
            AlertKind::Tip => "Tip",
            AlertKind::Important => "Important",
            AlertKind::Warning => "Warning",
            AlertKind::Caution => "Caution",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AlertKind::Note => "📘",
            AlertKind::Tip => "💡",
            AlertKind::Important => "☝️",
            AlertKind::Warning => "⚠️",
            AlertKind::Caution => "❗",
        }
    }

    pub fn color(self) -> Color {
        match self {
            AlertKind::Note => Color::BlueBackground,
            AlertKind::Tip => Color::GreenBackground,
            AlertKind::Important => Color::PurpleBackground,
            AlertKind::Warning => Color::YellowBackground,
            AlertKind::Caution => Color::RedBackground,
        }
    }
}

pub(super) fn blockquote(children: &[ast::Block], options: &Options) -> Block {
    if let Some(callout) = alert(children, options) {
        return callout;
    }
    if options.enable_emoji_callouts {
        if let Some(callout) = emoji_callout(children, options) {
            return callout;
        }
    }
    Block::quote(Vec::new(), blocks_all(children, options))
}

/// Leading paragraph text of a blockquote, with the rest of the paragraph and the other blocks
fn leading_text(children: &[ast::Block]) -> Option<(&str, &[Inline], &[ast::Block])> {
    let (first, rest) = children.split_first()?;
    let ast::Block::Paragraph(inlines) = first else {
        return None;
    };
    let (Inline::Text(text), tail) = inlines.split_first()? else {
        return None;
    };
    Some((text.as_str(), tail, rest))
}

fn alert(children: &[ast::Block], options: &Options) -> Option<Block> {
    let (text, tail, rest) = leading_text(children)?;
    let captures = ALERT_MARKER.captures(text)?;
    let kind = AlertKind::parse(&captures[1])?;
    let marker_end = captures.get(0)?.end();

    let mut body_inlines = Vec::new();
    let remainder = text[marker_end..].trim_start();
    if !remainder.is_empty() {
        body_inlines.push(Inline::text(remainder));
    }
    body_inlines.extend(tail.iter().cloned());

    let mut body = Vec::new();
    if !body_inlines.iter().all(Inline::is_blank) {
        body.extend(paragraph::paragraph(&body_inlines, options));
    }
    body.extend(blocks_all(rest, options));

    Some(Block::callout(
        vec![RichText::text(kind.label())],
        kind.icon(),
        kind.color(),
        body,
    ))
}

fn emoji_callout(children: &[ast::Block], options: &Options) -> Option<Block> {
    let (text, tail, rest) = leading_text(children)?;
    let emoji = LEADING_EMOJI.find(text)?;
    let icon = emoji.as_str();

    let ctx = Context::new();
    let mut rich_text = Vec::new();
    let remainder = text[emoji.end()..].trim_start();
    if !remainder.is_empty() {
        rich_text.extend(inline::chunk_text(remainder, &ctx));
    }
    rich_text.extend(inline::resolve_all(tail, &ctx));

    Some(Block::callout(
        rich_text,
        icon,
        emoji_color(icon),
        blocks_all(rest, options),
    ))
}

fn emoji_color(icon: &str) -> Color {
    let bare: String = icon.chars().filter(|c| *c != '\u{FE0F}').collect();
    EMOJI_COLORS
        .iter()
        .find(|(emoji, _)| *emoji == bare)
        .map_or(Color::Default, |(_, color)| *color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn quote_of(text: &str) -> Vec<ast::Block> {
        vec![ast::Block::Paragraph(vec![Inline::text(text)])]
    }

    fn emoji_options() -> Options {
        Options {
            enable_emoji_callouts: true,
            ..Default::default()
        }
    }

    #[rstest]
    #[case("[!NOTE]", "Note", "📘", Color::BlueBackground)]
    #[case("[!TIP]", "Tip", "💡", Color::GreenBackground)]
    #[case("[!IMPORTANT]", "Important", "☝️", Color::PurpleBackground)]
    #[case("[!WARNING]", "Warning", "⚠️", Color::YellowBackground)]
    #[case("[!CAUTION]", "Caution", "❗", Color::RedBackground)]
    #[case("[!note]", "Note", "📘", Color::BlueBackground)]
    fn test_alert_kinds(
        #[case] marker: &str,
        #[case] label: &str,
        #[case] icon: &str,
        #[case] color: Color,
    ) {
        let children = quote_of(&format!("{marker}\nBody"));
        assert_eq!(
            blockquote(&children, &Options::default()),
            Block::callout(
                vec![RichText::text(label)],
                icon,
                color,
                vec![Block::paragraph(vec![RichText::text("Body")])]
            )
        );
    }

    #[test]
    fn test_alert_with_following_blocks() {
        let children = vec![
            ast::Block::Paragraph(vec![Inline::text("[!WARNING]")]),
            ast::Block::Paragraph(vec![Inline::text("Careful")]),
        ];
        let Block::Callout { children, .. } = blockquote(&children, &Options::default()) else {
            panic!("expected callout");
        };
        assert_eq!(
            children,
            vec![Block::paragraph(vec![RichText::text("Careful")])]
        );
    }

    #[test]
    fn test_alert_keeps_formatting_of_remainder() {
        let children = vec![ast::Block::Paragraph(vec![
            Inline::text("[!TIP]\nUse "),
            Inline::Strong(vec![Inline::text("this")]),
        ])];
        let Block::Callout { children, .. } = blockquote(&children, &Options::default()) else {
            panic!("expected callout");
        };
        let runs = children[0].rich_text().unwrap();
        assert_eq!(runs[0].content(), "Use ");
        assert!(runs[1].annotations().bold);
    }

    #[test]
    fn test_unknown_alert_is_quote() {
        let children = quote_of("[!DANGER]\nBody");
        assert_eq!(
            blockquote(&children, &Options::default()).kind(),
            "quote"
        );
    }

    #[test]
    fn test_marker_must_stand_alone() {
        let children = quote_of("[!NOTE] inline");
        assert_eq!(blockquote(&children, &Options::default()).kind(), "quote");
    }

    #[test]
    fn test_plain_quote() {
        let children = quote_of("Just a quote");
        assert_eq!(
            blockquote(&children, &Options::default()),
            Block::quote(
                vec![],
                vec![Block::paragraph(vec![RichText::text("Just a quote")])]
            )
        );
    }

    #[test]
    fn test_emoji_callout_disabled_by_default() {
        let children = quote_of("🚧 Under construction");
        assert_eq!(blockquote(&children, &Options::default()).kind(), "quote");
    }

    #[test]
    fn test_emoji_callout() {
        let children = vec![
            ast::Block::Paragraph(vec![Inline::text("🚧 Under construction")]),
            ast::Block::Paragraph(vec![Inline::text("Back soon")]),
        ];
        assert_eq!(
            blockquote(&children, &emoji_options()),
            Block::callout(
                vec![RichText::text("Under construction")],
                "🚧",
                Color::YellowBackground,
                vec![Block::paragraph(vec![RichText::text("Back soon")])]
            )
        );
    }

    #[test]
    fn test_emoji_with_variation_selector() {
        let children = quote_of("⚠️ Heads up");
        let Block::Callout { icon, color, .. } = blockquote(&children, &emoji_options()) else {
            panic!("expected callout");
        };
        assert_eq!(icon, "⚠️");
        assert_eq!(color, Color::YellowBackground);
    }

    #[test]
    fn test_unmapped_emoji_uses_default_color() {
        let children = quote_of("🦀 Rust");
        let Block::Callout { icon, color, .. } = blockquote(&children, &emoji_options()) else {
            panic!("expected callout");
        };
        assert_eq!(icon, "🦀");
        assert_eq!(color, Color::Default);
    }

    #[test]
    fn test_zwj_sequence_is_one_icon() {
        let children = quote_of("👩‍💻 Dev notes");
        let Block::Callout {
            icon, rich_text, ..
        } = blockquote(&children, &emoji_options())
        else {
            panic!("expected callout");
        };
        assert_eq!(icon, "👩‍💻");
        assert_eq!(rich_text, vec![RichText::text("Dev notes")]);
    }

    #[rstest]
    #[case("© 2024 Acme Corp")]
    #[case("™ pending")]
    #[case("‼ not an icon")]
    #[case("1. step")]
    fn test_text_presentation_symbols_stay_quote(#[case] text: &str) {
        let children = quote_of(text);
        assert_eq!(blockquote(&children, &emoji_options()).kind(), "quote");
    }

    #[rstest]
    #[case("©️ 2024 Acme Corp", "©️", "2024 Acme Corp")]
    #[case("1️⃣ First step", "1️⃣", "First step")]
    #[case("🇩🇪 Berlin", "🇩🇪", "Berlin")]
    #[case("👍🏽 Approved", "👍🏽", "Approved")]
    fn test_emoji_sequences_become_icons(
        #[case] text: &str,
        #[case] expected_icon: &str,
        #[case] expected_text: &str,
    ) {
        let children = quote_of(text);
        let Block::Callout {
            icon, rich_text, ..
        } = blockquote(&children, &emoji_options())
        else {
            panic!("expected callout");
        };
        assert_eq!(icon, expected_icon);
        assert_eq!(rich_text, vec![RichText::text(expected_text)]);
    }

    #[test]
    fn test_text_without_emoji_stays_quote() {
        let children = quote_of("Plain text");
        assert_eq!(blockquote(&children, &emoji_options()).kind(), "quote");
    }

    #[test]
    fn test_alert_wins_over_emoji() {
        let children = quote_of("[!NOTE]\n💡 idea");
        let Block::Callout { icon, .. } = blockquote(&children, &emoji_options()) else {
            panic!("expected callout");
        };
        assert_eq!(icon, "📘");
    }
}
