//! The one-line toolbar across the top of the viewer

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::notification::{NotificationLevel, NotificationState};
use crate::theme::Palette;
use crate::viewer::ViewerState;

/// Whether the page field is being edited (highlights the buffer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageFieldMode {
    Display,
    Editing,
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    viewer: &ViewerState,
    page_field: PageFieldMode,
    notifications: &mut NotificationState,
    palette: &Palette,
) {
    let dim = Style::default().fg(palette.dim);
    let fg = Style::default().fg(palette.foreground);
    let accent = Style::default().fg(palette.accent);

    let page_style = match page_field {
        PageFieldMode::Editing => accent.add_modifier(Modifier::REVERSED),
        PageFieldMode::Display => fg,
    };

    let total = if viewer.has_document() {
        viewer.page_count().to_string()
    } else {
        "—".to_string()
    };

    let mut spans = vec![
        Span::styled(" Page ", dim),
        Span::styled(viewer.page_input.clone(), page_style),
        Span::styled(format!(" of {total}"), dim),
        Span::styled("  │  ", dim),
        Span::styled(format!("{}%", viewer.zoom_percent()), fg),
        Span::styled("  │  ", dim),
        Span::styled(format!("{}°", viewer.rotation()), fg),
        Span::styled("  │  ", dim),
        Span::styled("/", accent),
        Span::styled(" find  ", dim),
        Span::styled("p", accent),
        Span::styled(" print  ", dim),
        Span::styled("s", accent),
        Span::styled(" save", dim),
    ];

    if let Some(note) = notifications.current() {
        let style = match note.level {
            NotificationLevel::Info => accent,
            NotificationLevel::Error => Style::default().fg(palette.error),
        };
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let room = (area.width as usize).saturating_sub(used + 4);
        if room > 3 {
            let mut message = note.message.clone();
            if message.width() > room {
                message = message.chars().take(room.saturating_sub(1)).collect();
                message.push('…');
            }
            spans.push(Span::styled("  │  ", dim));
            spans.push(Span::styled(message, style));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
