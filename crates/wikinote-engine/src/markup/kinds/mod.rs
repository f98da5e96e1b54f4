//! # Markup Kinds
//!
//! Types that own their syntax delimiters, so the scanner never hardcodes
//! `[[`, `]]`, `|` or `\`.
//!
//! - **`WikiLink`**: `OPEN = "[["`, `CLOSE = "]]"`, `ALIAS = '|'`
//! - **`Escape`**: `CHAR = '\\'`

pub mod escape;
pub mod wikilink;

pub use escape::Escape;
pub use wikilink::WikiLink;
