use std::collections::HashMap;

use crate::models::{Page, PageId};

/// Mapping from page title to page identifier within one wiki.
///
/// Titles are unique per wiki; when built from a list that repeats a title,
/// the last entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleIndex<Id> {
    titles: HashMap<String, Id>,
}

impl<Id> Default for TitleIndex<Id> {
    fn default() -> Self {
        Self {
            titles: HashMap::new(),
        }
    }
}

impl<Id> TitleIndex<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a title, returning the identifier it replaced.
    pub fn insert(&mut self, title: impl Into<String>, id: Id) -> Option<Id> {
        self.titles.insert(title.into(), id)
    }

    pub fn get(&self, title: &str) -> Option<&Id> {
        self.titles.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// All indexed titles, in no particular order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.titles.keys().map(String::as_str)
    }
}

impl TitleIndex<PageId> {
    /// Builds the index for a wiki's current page list.
    pub fn from_pages<'a>(pages: impl IntoIterator<Item = &'a Page>) -> Self {
        pages
            .into_iter()
            .map(|page| (page.title.clone(), page.id))
            .collect()
    }
}

impl<Id, S: Into<String>> FromIterator<(S, Id)> for TitleIndex<Id> {
    fn from_iter<I: IntoIterator<Item = (S, Id)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (title, id) in iter {
            index.insert(title, id);
        }
        index
    }
}
