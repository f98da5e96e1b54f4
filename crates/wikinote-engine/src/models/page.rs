use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Content given to pages created without any text of their own.
pub const NEW_PAGE_CONTENT: &str = "Init.";

/// Stable identifier of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageId(Uuid);

impl PageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A titled unit of content within a wiki.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    /// Raw markup, parsed on every render.
    pub content: String,
}

impl Page {
    /// Creates a page with a fresh identifier.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: PageId::new(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Partial change to a page. Empty strings count as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PageUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self::default().with_title(title)
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self::default().with_content(content)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Drops empty fields.
    pub(crate) fn normalized(self) -> Self {
        Self {
            title: self.title.filter(|t| !t.is_empty()),
            content: self.content.filter(|c| !c.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pages_get_distinct_ids() {
        let a = Page::new("A", "a");
        let b = Page::new("A", "a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_page_id_displays_as_uuid() {
        let id = PageId::new();
        assert_eq!(id.to_string(), id.as_uuid().to_string());
    }

    #[test]
    fn test_update_normalization_drops_empty_fields() {
        let update = PageUpdate::title("").with_content("body").normalized();
        assert_eq!(update.title, None);
        assert_eq!(update.content.as_deref(), Some("body"));
        assert!(PageUpdate::title("").normalized().is_empty());
    }
}
