use serde::{Deserialize, Serialize};

/// What to do with a `[[` that is never closed before the end of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnterminatedLink {
    /// Flush the accumulated body as a link, as pages have always rendered.
    #[default]
    Link,
    /// Flush `[[` plus the body as literal text.
    Text,
}

/// Knobs for [`crate::markup::parse_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub unterminated_link: UnterminatedLink,
}

impl ParseOptions {
    pub fn with_unterminated_link(mut self, policy: UnterminatedLink) -> Self {
        self.unterminated_link = policy;
        self
    }
}
