//! # Link Resolution
//!
//! Maps the textual target of a link segment to a concrete page identifier.
//!
//! The [`TitleIndex`] is owned by whoever lists the pages of a wiki and is
//! rebuilt when that list changes. Resolution only reads it, per call, and
//! matches titles exactly (case-sensitive).

pub mod resolve;
pub mod title_index;

pub use resolve::{LinkError, Resolution, resolve, resolve_segment, unresolved_links};
pub use title_index::TitleIndex;
