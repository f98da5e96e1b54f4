/// Escape character that makes the next character literal content.
///
/// Applies in text and inside link bodies alike. A backslash with nothing
/// after it is itself literal.
pub struct Escape;

impl Escape {
    pub const CHAR: char = '\\';
}
