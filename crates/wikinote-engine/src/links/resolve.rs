use std::collections::HashSet;

use super::title_index::TitleIndex;
use crate::markup::Segment;

/// Outcome of looking a link target up in a [`TitleIndex`].
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a, Id> {
    /// The target names an existing page.
    Found(&'a Id),
    /// No page in the index has this title.
    NotFound,
}

// Manual impls: a borrowed id is always copyable, whatever `Id` is.
impl<Id> Clone for Resolution<'_, Id> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Id> Copy for Resolution<'_, Id> {}

impl<'a, Id> Resolution<'a, Id> {
    pub fn found(self) -> Option<&'a Id> {
        match self {
            Resolution::Found(id) => Some(id),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// Converts to a `Result`, naming `target` in the not-found error.
    pub fn into_result(self, target: &str) -> Result<&'a Id, LinkError> {
        self.found()
            .ok_or_else(|| LinkError::PageNotFound(target.to_string()))
    }
}

/// User-facing failure to follow a link.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("Page not found: {0}")]
    PageNotFound(String),
}

/// Resolves a link target against the current title index.
///
/// Exact, case-sensitive match; no I/O, no fallbacks.
pub fn resolve<'a, Id>(target: &str, index: &'a TitleIndex<Id>) -> Resolution<'a, Id> {
    match index.get(target) {
        Some(id) => Resolution::Found(id),
        None => {
            log::debug!("link target {target:?} matches no page");
            Resolution::NotFound
        }
    }
}

/// Resolves a link segment; text segments have nothing to resolve.
pub fn resolve_segment<'a, Id>(
    segment: &Segment,
    index: &'a TitleIndex<Id>,
) -> Option<Resolution<'a, Id>> {
    segment.target().map(|target| resolve(target, index))
}

/// Link targets in `segments` that match no page, each reported once, in
/// order of first appearance.
pub fn unresolved_links<'s, Id>(segments: &'s [Segment], index: &TitleIndex<Id>) -> Vec<&'s str> {
    let mut seen = HashSet::new();
    segments
        .iter()
        .filter_map(Segment::target)
        .filter(|target| !resolve(target, index).is_found())
        .filter(|target| seen.insert(*target))
        .collect()
}
