//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Theme {
    Dark,
    Light,
}

/// Detect the terminal background and pick a matching palette.
/// Defaults to dark when the background can't be determined.
pub fn resolve_theme() -> Theme {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => Theme::Light,
        _ => Theme::Dark,
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Readiness score colors (traffic light, high is good here)
    pub score_high: Color,
    pub score_mid: Color,
    pub score_low: Color,

    // Bar chart colors
    pub bar_filled: Color,
    pub bar_empty: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Field list styles
    pub field_label: Color,
    pub field_selected: Style,
    pub field_editing: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Gating / notice colors
    pub warning: Color,

    // Popup overlay colors
    pub popup_border: Color,
}

impl ThemeColors {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            score_high: Color::Green,
            score_mid: Color::Yellow,
            score_low: Color::Red,
            bar_filled: Color::Cyan,
            bar_empty: Color::DarkGray,
            muted: Color::Gray,
            title_color: Color::Cyan,
            field_label: Color::Gray,
            field_selected: Style::new().reversed(),
            field_editing: Style::new().fg(Color::Yellow).bold(),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            warning: Color::Yellow,
            popup_border: Color::Cyan,
        }
    }

    pub fn light() -> Self {
        Self {
            score_high: Color::Green,
            score_mid: Color::Indexed(130),
            score_low: Color::Red,
            bar_filled: Color::Blue,
            bar_empty: Color::Indexed(252),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            field_label: Color::DarkGray,
            field_selected: Style::new().reversed(),
            field_editing: Style::new().fg(Color::Indexed(130)).bold(),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Green,
            flash_error: Color::Red,
            warning: Color::Indexed(130),
            popup_border: Color::Blue,
        }
    }

    /// Color for a readiness value on a 0-100 scale. High readiness is
    /// good, so the ramp runs red -> yellow -> green.
    pub fn score_color(&self, score: f64) -> Color {
        if score >= 70.0 {
            self.score_high
        } else if score >= 40.0 {
            self.score_mid
        } else {
            self.score_low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_color_ramp() {
        let colors = ThemeColors::dark();
        assert_eq!(colors.score_color(85.0), colors.score_high);
        assert_eq!(colors.score_color(55.0), colors.score_mid);
        assert_eq!(colors.score_color(10.0), colors.score_low);
    }

    #[test]
    fn test_boundaries_round_up() {
        let colors = ThemeColors::dark();
        assert_eq!(colors.score_color(70.0), colors.score_high);
        assert_eq!(colors.score_color(40.0), colors.score_mid);
    }
}
