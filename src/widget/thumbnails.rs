//! Thumbnail strip along the left edge
//!
//! One entry per page. Without rendered previews (the engine owns
//! rasterization), each entry is a boxed page number — enough to see
//! where you are and to jump by selection.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::theme::Palette;

pub const STRIP_WIDTH: u16 = 12;

#[derive(Debug, Default)]
pub struct ThumbnailStrip {
    state: ListState,
}

impl ThumbnailStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the strip's selection in step with the viewer's page.
    pub fn sync_to(&mut self, current_page: u32) {
        if current_page > 0 {
            self.state.select(Some(current_page as usize - 1));
        }
    }

    /// Page under the strip cursor, 1-based.
    pub fn selected_page(&self) -> Option<u32> {
        self.state.selected().map(|i| i as u32 + 1)
    }

    pub fn select_next(&mut self, page_count: u32) {
        if page_count == 0 {
            return;
        }
        let next = self
            .state
            .selected()
            .map_or(0, |i| (i + 1).min(page_count as usize - 1));
        self.state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let prev = self.state.selected().map_or(0, |i| i.saturating_sub(1));
        self.state.select(Some(prev));
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        page_count: u32,
        current_page: u32,
        focused: bool,
        palette: &Palette,
    ) {
        let border_style = if focused {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.dim)
        };

        let items: Vec<ListItem> = (1..=page_count)
            .map(|page| {
                let marker = if page == current_page { "▸" } else { " " };
                let style = if page == current_page {
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.foreground)
                };
                ListItem::new(Line::styled(format!("{marker} p.{page}"), style))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::RIGHT)
                    .border_style(border_style),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_tracks_pages() {
        let mut strip = ThumbnailStrip::new();
        strip.sync_to(3);
        assert_eq!(strip.selected_page(), Some(3));

        strip.select_next(5);
        assert_eq!(strip.selected_page(), Some(4));

        strip.select_previous();
        strip.select_previous();
        assert_eq!(strip.selected_page(), Some(2));
    }

    #[test]
    fn test_select_next_stops_at_last_page() {
        let mut strip = ThumbnailStrip::new();
        strip.sync_to(2);
        strip.select_next(2);
        assert_eq!(strip.selected_page(), Some(2));
    }
}
