//! Theme-aware color palette for Helmsight.
//!
//! Semantic colors that adapt to the current theme; use these instead
//! of hardcoded Color::from_rgb() values in views and canvases.

use iced::{Color, Theme};

/// Get colors from the theme's extended palette.
pub struct ThemeColors<'a> {
    theme: &'a Theme,
}

impl<'a> ThemeColors<'a> {
    /// Create a new ThemeColors from a theme reference.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn palette(&self) -> &iced::theme::palette::Extended {
        self.theme.extended_palette()
    }

    pub fn is_dark(&self) -> bool {
        self.palette().is_dark
    }

    /// Primary text color.
    pub fn text(&self) -> Color {
        self.palette().background.base.text
    }

    /// Dimmed text (axis labels, timestamps).
    pub fn text_dimmed(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.5, 0.5, 0.5)
        } else {
            Color::from_rgb(0.4, 0.4, 0.4)
        }
    }

    /// Success/healthy color (green).
    pub fn success(&self) -> Color {
        self.palette().success.base.color
    }

    /// Danger/error color (red).
    pub fn danger(&self) -> Color {
        self.palette().danger.base.color
    }

    /// Primary accent color.
    pub fn primary(&self) -> Color {
        self.palette().primary.base.color
    }

    /// Default border color.
    pub fn border(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.25, 0.25, 0.3)
        } else {
            Color::from_rgb(0.8, 0.8, 0.82)
        }
    }

    /// Subtle border (row separators).
    pub fn border_subtle(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.2, 0.2, 0.22)
        } else {
            Color::from_rgb(0.85, 0.85, 0.87)
        }
    }

    /// Table row background.
    pub fn row_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.13, 0.13, 0.15)
        } else {
            Color::from_rgb(0.98, 0.98, 0.99)
        }
    }

    /// Chart background color.
    pub fn chart_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.08, 0.08, 0.1)
        } else {
            Color::from_rgb(0.98, 0.98, 0.99)
        }
    }

    /// Chart grid lines.
    pub fn chart_grid(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.2, 0.2, 0.25)
        } else {
            Color::from_rgb(0.85, 0.85, 0.88)
        }
    }

    /// Chart axis labels.
    pub fn chart_label(&self) -> Color {
        self.text_dimmed()
    }

    /// Chart data stroke.
    pub fn chart_stroke(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.2, 0.7, 1.0)
        } else {
            Color::from_rgb(0.1, 0.45, 0.8)
        }
    }
}

/// Convenience function to create ThemeColors.
pub fn colors(theme: &Theme) -> ThemeColors<'_> {
    ThemeColors::new(theme)
}
