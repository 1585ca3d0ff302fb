//! Colors for the viewer chrome and highlights

use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Debug)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub dim: Color,
    pub accent: Color,
    /// Background for a non-active search match
    pub match_bg: Color,
    /// Background for the active search match
    pub active_match_bg: Color,
    pub error: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Gray,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            match_bg: Color::Rgb(100, 100, 0),
            active_match_bg: Color::Yellow,
            error: Color::Red,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Black,
            dim: Color::DarkGray,
            accent: Color::Blue,
            match_bg: Color::Rgb(255, 240, 150),
            active_match_bg: Color::Yellow,
            error: Color::Red,
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a matched range; the active match gets the loud one.
    pub fn match_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .bg(self.active_match_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(self.match_bg)
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
