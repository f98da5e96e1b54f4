//! # Page Markup
//!
//! Single-pass scanner that turns raw page content into renderable segments.
//!
//! ## Architecture
//!
//! The scanner walks the content once with a [`cursor::Cursor`] and switches
//! between two modes ([`types::ScanMode`]):
//! - `Text`: characters accumulate as literal text until `[[` opens a link
//! - `InsideLink`: characters accumulate as the link body until `]]` closes it
//!
//! A backslash makes the following character literal in either mode, so
//! `\[\[` never opens a link and `\]]` never closes one.
//!
//! ## Modules
//!
//! - **`types`**: `Segment` enum (Text, Link) and the `ScanMode` state
//! - **`kinds`**: Delimiter owners (`WikiLink`, `Escape`)
//! - **`cursor`**: `Cursor` for char-by-char scanning
//! - **`options`**: `ParseOptions` and the unterminated-link policy
//! - **`parser`**: `parse()` / `parse_with()` entry points
//!
//! ## Unterminated Links
//!
//! By default `x [[Open` ends as a link to `Open`, matching how existing pages
//! have always rendered. [`UnterminatedLink::Text`] renders it literally instead.

pub mod cursor;
pub mod kinds;
pub mod options;
pub mod parser;
pub mod types;

pub use options::{ParseOptions, UnterminatedLink};
pub use parser::{link_targets, links, parse, parse_with};
pub use types::{ScanMode, Segment};
