//! The find-in-document overlay
//!
//! A single-row bar under the toolbar while the search session is open:
//! query, match counter, and the error line when the last scan failed.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::search::SearchSession;
use crate::theme::Palette;

/// Rows the overlay occupies when open (query row + optional error row).
pub fn height(session: &SearchSession) -> u16 {
    if !session.is_open {
        0
    } else if session.error_message.is_some() {
        2
    } else {
        1
    }
}

pub fn render(frame: &mut Frame, area: Rect, session: &SearchSession, palette: &Palette) {
    if !session.is_open || area.height == 0 {
        return;
    }

    let dim = Style::default().fg(palette.dim);
    let fg = Style::default().fg(palette.foreground);

    let counter = session.counter_label();
    let busy = if session.is_searching { " …" } else { "" };

    // keep the query from running into the counter on narrow terminals
    let fixed = " Find: ".width() + counter.width() + busy.width() + 6;
    let room = (area.width as usize).saturating_sub(fixed);
    let mut query = session.query.clone();
    if query.width() > room {
        let skip = query.chars().count().saturating_sub(room.saturating_sub(1));
        query = query.chars().skip(skip).collect();
    }

    let query_row = Line::from(vec![
        Span::styled(" Find: ", dim),
        Span::styled(query, fg.add_modifier(Modifier::BOLD)),
        Span::styled("▏", Style::default().fg(palette.accent)),
        Span::styled(busy, dim),
        Span::styled(format!("  {counter}  "), dim),
        Span::styled("‹n›", dim),
        Span::styled(" next ", dim),
        Span::styled("‹N›", dim),
        Span::styled(" prev ", dim),
        Span::styled("‹esc›", dim),
        Span::styled(" close", dim),
    ]);

    let mut rows = vec![query_row];
    if let Some(message) = &session.error_message {
        rows.push(Line::styled(
            format!(" {message}"),
            Style::default().fg(palette.error),
        ));
    }

    frame.render_widget(Paragraph::new(rows), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_follows_session_state() {
        let mut session = SearchSession::new();
        assert_eq!(height(&session), 0);

        session.open();
        assert_eq!(height(&session), 1);

        session.error_message = Some("Unable to search this document.".to_string());
        assert_eq!(height(&session), 2);

        session.close();
        assert_eq!(height(&session), 0);
    }
}
