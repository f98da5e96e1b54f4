use serde::Serialize;

/// One classified unit of parsed page content.
///
/// A parse produces these in rendering order. Text is stored with escapes
/// already resolved, so it renders verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Segment {
    /// Literal content.
    Text { text: String },
    /// A `[[target]]` or `[[target|label]]` reference to another page.
    Link {
        /// Page title the link resolves against.
        target: String,
        /// Display text. Equals `target` when no label was written.
        label: String,
    },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    pub fn link(target: impl Into<String>, label: impl Into<String>) -> Self {
        Segment::Link {
            target: target.into(),
            label: label.into(),
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Segment::Link { .. })
    }

    /// Text shown to the reader: the literal text, or the link label.
    pub fn display_text(&self) -> &str {
        match self {
            Segment::Text { text } => text,
            Segment::Link { label, .. } => label,
        }
    }

    /// The page title a link points at; `None` for text.
    pub fn target(&self) -> Option<&str> {
        match self {
            Segment::Text { .. } => None,
            Segment::Link { target, .. } => Some(target),
        }
    }
}

/// Scanner state while walking page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Accumulating literal text.
    Text,
    /// Accumulating a link body after `[[`.
    InsideLink,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_accessors() {
        let link = Segment::link("Home", "the home page");
        assert!(link.is_link());
        assert_eq!(link.target(), Some("Home"));
        assert_eq!(link.display_text(), "the home page");
    }

    #[test]
    fn text_accessors() {
        let text = Segment::text("plain");
        assert!(!text.is_link());
        assert_eq!(text.target(), None);
        assert_eq!(text.display_text(), "plain");
    }
}
