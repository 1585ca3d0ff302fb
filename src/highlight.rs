//! Highlight rendering for text-layer spans
//!
//! Turns a span's text plus its recorded match ranges into either a
//! segment list (for terminal styling) or an escaped markup string (for
//! surfaces that consume the text layer as markup). Both views walk the
//! same ranges; the markup path additionally escapes `&`, `<`, `>` so
//! document content can never inject markup.

use log::warn;

use crate::search_engine::{PageMatchIndex, SpanMatch};

/// One piece of a span after highlight decomposition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Match { text: &'a str, active: bool },
}

/// Escape the structural markup characters in document text.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decompose a span's text into plain and matched segments.
///
/// Ranges are walked in ascending start order. Out-of-bounds ranges are
/// clamped rather than trusted; the finder never produces them, so a
/// clamp that changes anything is logged as a tripwire.
pub fn split_segments<'a>(
    text: &'a str,
    matches: &[SpanMatch],
    active_match_index: usize,
) -> Vec<Segment<'a>> {
    let mut segments = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = 0;

    for m in matches {
        let (start, end) = clamp_range(text, m.start, m.end);
        if start > cursor {
            segments.push(Segment::Plain(&text[cursor..start]));
        }
        segments.push(Segment::Match {
            text: &text[start..end],
            active: m.match_index == active_match_index,
        });
        cursor = end.max(cursor);
    }

    if cursor < text.len() {
        segments.push(Segment::Plain(&text[cursor..]));
    }

    segments
}

/// Render one span of a page's text layer as escaped markup.
///
/// Spans without recorded matches come back fully escaped and unwrapped;
/// matched ranges are wrapped in `<mark>` markers, the active match with
/// a distinguishing modifier.
pub fn render_span(
    text: &str,
    item_index: u32,
    page_number: u32,
    page_matches: &PageMatchIndex,
    active_match_index: usize,
) -> String {
    let Some(matches) = page_matches
        .get(&page_number)
        .and_then(|items| items.get(&item_index))
    else {
        return escape_text(text);
    };

    let mut out = String::with_capacity(text.len() + matches.len() * 32);
    for segment in split_segments(text, matches, active_match_index) {
        match segment {
            Segment::Plain(chunk) => out.push_str(&escape_text(chunk)),
            Segment::Match { text, active } => {
                let class = if active {
                    "match match--active"
                } else {
                    "match"
                };
                out.push_str("<mark class=\"");
                out.push_str(class);
                out.push_str("\">");
                out.push_str(&escape_text(text));
                out.push_str("</mark>");
            }
        }
    }
    out
}

/// Clamp a match range into the span, snapping to char boundaries.
fn clamp_range(text: &str, start: usize, end: usize) -> (usize, usize) {
    let safe_start = floor_boundary(text, start.min(text.len()));
    let safe_end = floor_boundary(text, end.clamp(safe_start, text.len()));

    if (safe_start, safe_end) != (start, end) {
        warn!("clamped out-of-range highlight {start}..{end} to {safe_start}..{safe_end}");
    }
    (safe_start, safe_end)
}

fn floor_boundary(text: &str, mut pos: usize) -> usize {
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
