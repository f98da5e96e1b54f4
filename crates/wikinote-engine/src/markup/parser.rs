use std::collections::HashSet;

use super::{
    cursor::Cursor,
    kinds::{Escape, WikiLink},
    options::{ParseOptions, UnterminatedLink},
    types::{ScanMode, Segment},
};

/// Parses page content into an ordered sequence of [`Segment`]s using the
/// default [`ParseOptions`].
///
/// Never fails: malformed markup degrades to text or a best-effort link.
/// Runs in a single pass and keeps no state between calls.
pub fn parse(content: &str) -> Vec<Segment> {
    parse_with(content, &ParseOptions::default())
}

/// Parses page content into an ordered sequence of [`Segment`]s.
///
/// # Rules
/// - `[[` opens a link in text mode; `]]` closes it inside a link body
/// - `\` makes the next character literal; a trailing `\` is literal itself
/// - The first unescaped `|` in a link body splits target from label
/// - Empty buffers emit nothing, and consecutive text is coalesced
/// - At end of input an open link body is flushed per
///   [`ParseOptions::unterminated_link`]
pub fn parse_with(content: &str, options: &ParseOptions) -> Vec<Segment> {
    let mut cur = Cursor::new(content);
    let mut out = vec![];
    let mut mode = ScanMode::Text;
    let mut buf = String::new();
    // Byte offset in `buf` of the first unescaped alias separator.
    let mut alias_at: Option<usize> = None;

    while !cur.eof() {
        if cur.peek() == Some(Escape::CHAR) {
            cur.bump();
            buf.push(cur.bump().unwrap_or(Escape::CHAR));
            continue;
        }

        match mode {
            ScanMode::Text if cur.starts_with(WikiLink::OPEN) => {
                cur.bump_str(WikiLink::OPEN);
                flush_text(&mut out, &mut buf);
                mode = ScanMode::InsideLink;
            }
            ScanMode::InsideLink if cur.starts_with(WikiLink::CLOSE) => {
                cur.bump_str(WikiLink::CLOSE);
                flush_link(&mut out, &mut buf, alias_at.take());
                mode = ScanMode::Text;
            }
            ScanMode::InsideLink if cur.peek() == Some(WikiLink::ALIAS) => {
                cur.bump();
                alias_at.get_or_insert(buf.len());
                buf.push(WikiLink::ALIAS);
            }
            _ => {
                if let Some(c) = cur.bump() {
                    buf.push(c);
                }
            }
        }
    }

    match (mode, options.unterminated_link) {
        (ScanMode::Text, _) => flush_text(&mut out, &mut buf),
        (ScanMode::InsideLink, UnterminatedLink::Link) => flush_link(&mut out, &mut buf, alias_at),
        (ScanMode::InsideLink, UnterminatedLink::Text) => {
            buf.insert_str(0, WikiLink::OPEN);
            flush_text(&mut out, &mut buf);
        }
    }

    out
}

/// Iterates over the link segments of a parsed page.
pub fn links(segments: &[Segment]) -> impl Iterator<Item = &Segment> {
    segments.iter().filter(|s| s.is_link())
}

/// Distinct link targets in `content`, in order of first appearance.
pub fn link_targets(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    parse(content)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Link { target, .. } => Some(target),
            Segment::Text { .. } => None,
        })
        .filter(|target| seen.insert(target.clone()))
        .collect()
}

/// Emits accumulated text, merging into a preceding text segment.
fn flush_text(out: &mut Vec<Segment>, buf: &mut String) {
    if buf.is_empty() {
        return;
    }
    if let Some(Segment::Text { text }) = out.last_mut() {
        text.push_str(buf);
        buf.clear();
        return;
    }
    out.push(Segment::Text {
        text: std::mem::take(buf),
    });
}

/// Emits an accumulated link body, split at `alias_at` when present.
///
/// A body with neither target nor label (`[[]]`, `[[|]]`) emits nothing.
fn flush_link(out: &mut Vec<Segment>, buf: &mut String, alias_at: Option<usize>) {
    let body = std::mem::take(buf);
    let segment = match alias_at {
        Some(at) => {
            let (target, label) = (&body[..at], &body[at + WikiLink::ALIAS.len_utf8()..]);
            if target.is_empty() && label.is_empty() {
                return;
            }
            Segment::link(target, label)
        }
        None if body.is_empty() => return,
        None => Segment::Link {
            target: body.clone(),
            label: body,
        },
    };
    out.push(segment);
}
