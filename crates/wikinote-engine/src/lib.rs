pub mod io;
pub mod links;
pub mod markup;
pub mod models;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use links::{LinkError, Resolution, TitleIndex, resolve, resolve_segment, unresolved_links};
pub use markup::{ParseOptions, Segment, UnterminatedLink, parse, parse_with};
pub use models::*;
