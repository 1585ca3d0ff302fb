//! The page surface: current page's text layer with highlights
//!
//! The engine owns rasterization; what this widget shows is the text
//! layer — the extracted spans of the current page — styled through the
//! same highlight decomposition the markup renderer uses, so matches
//! and the active match look the way the overlay promises.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::document::TextSpan;
use crate::highlight::{Segment, split_segments};
use crate::search_engine::PageMatchIndex;
use crate::theme::Palette;

pub struct PageView<'a> {
    pub page_number: u32,
    pub spans: &'a [TextSpan],
    pub page_matches: &'a PageMatchIndex,
    pub active_match_index: usize,
    /// Extraction failed for this page
    pub load_error: Option<&'a str>,
}

pub fn render(frame: &mut Frame, area: Rect, view: &PageView<'_>, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::NONE)
        .title(format!(" page {} ", view.page_number))
        .title_style(Style::default().fg(palette.dim));

    if let Some(detail) = view.load_error {
        let body = Paragraph::new(Line::styled(
            format!("text layer unavailable: {detail}"),
            Style::default().fg(palette.error),
        ))
        .block(block);
        frame.render_widget(body, area);
        return;
    }

    let lines: Vec<Line> = view
        .spans
        .iter()
        .map(|span| text_layer_line(span, view, palette))
        .collect();

    let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

fn text_layer_line<'a>(span: &'a TextSpan, view: &PageView<'a>, palette: &Palette) -> Line<'a> {
    let plain = Style::default().fg(palette.foreground);

    let Some(matches) = view
        .page_matches
        .get(&view.page_number)
        .and_then(|items| items.get(&span.item_index))
    else {
        return Line::styled(span.text.as_str(), plain);
    };

    let pieces = split_segments(&span.text, matches, view.active_match_index)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => Span::styled(text, plain),
            Segment::Match { text, active } => Span::styled(text, palette.match_style(active)),
        })
        .collect::<Vec<_>>();

    Line::from(pieces)
}
