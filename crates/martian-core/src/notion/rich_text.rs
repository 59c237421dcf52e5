//! Rich text runs and their annotations

use serde::Serialize;

/// Notion text and background colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    GrayBackground,
    BrownBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    RedBackground,
}

/// Formatting flags carried by every rich text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

/// One atomic styled unit of Notion rich text
#[derive(Debug, Clone, PartialEq)]
pub enum RichText {
    Text {
        content: String,
        link: Option<String>,
        annotations: Annotations,
    },
    Equation {
        expression: String,
        annotations: Annotations,
    },
}

impl RichText {
    /// Plain text run without a link or formatting
    pub fn text(content: impl Into<String>) -> Self {
        RichText::Text {
            content: content.into(),
            link: None,
            annotations: Annotations::default(),
        }
    }

    /// Inline equation run
    pub fn equation(expression: impl Into<String>) -> Self {
        RichText::Equation {
            expression: expression.into(),
            annotations: Annotations::default(),
        }
    }

    pub fn with_annotations(mut self, value: Annotations) -> Self {
        match &mut self {
            RichText::Text { annotations, .. } | RichText::Equation { annotations, .. } => {
                *annotations = value;
            }
        }
        self
    }

    /// Attach a hyperlink. Equation runs cannot carry links and are returned unchanged.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        if let RichText::Text { link, .. } = &mut self {
            *link = Some(url.into());
        }
        self
    }

    /// Text content, or the expression for equation runs
    pub fn content(&self) -> &str {
        match self {
            RichText::Text { content, .. } => content,
            RichText::Equation { expression, .. } => expression,
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            RichText::Text { link, .. } => link.as_deref(),
            RichText::Equation { .. } => None,
        }
    }

    pub fn annotations(&self) -> &Annotations {
        match self {
            RichText::Text { annotations, .. } | RichText::Equation { annotations, .. } => {
                annotations
            }
        }
    }
}
