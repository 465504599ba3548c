//! Color palette and style constants for the marquee TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(15, 13, 35);
pub const C_OVERLAY_BG: Color = Color::Rgb(22, 20, 46);
pub const C_ACCENT: Color = Color::Rgb(171, 139, 255);
pub const C_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MUTED: Color = Color::Rgb(72, 72, 96);
pub const C_SECONDARY: Color = Color::Rgb(168, 181, 219);
pub const C_PRIMARY: Color = Color::Rgb(220, 218, 240);
pub const C_LABEL: Color = Color::Rgb(196, 170, 255);
pub const C_SELECTION_BG: Color = Color::Rgb(34, 31, 61);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 38, 66);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(147, 51, 234);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 120);
pub const C_FILTER_BG: Color = Color::Rgb(20, 18, 40);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_RATING: Color = Color::Rgb(255, 210, 50);
pub const C_FAVORITE: Color = Color::Rgb(255, 95, 140);
pub const C_RANK: Color = Color::Rgb(206, 206, 251);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(168, 181, 219);
pub const C_MODE_SEARCH: Color = Color::Rgb(255, 200, 80);
pub const C_MODE_OVERLAY: Color = Color::Rgb(171, 139, 255);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_selected() -> Style {
    Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_label() -> Style {
    Style::default().fg(C_LABEL).add_modifier(Modifier::BOLD)
}
