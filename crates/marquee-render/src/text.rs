//! Text measurement. Wrapping decisions live in [`wrap`]; they only ever see the
//! [`TextMeasurer`] trait, so tests can inject a deterministic fake metric.

pub mod wrap;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Width estimate from terminal cell counts: `unicode_width x font_size x factor`.
///
/// Not font-accurate, but deterministic across platforms, which is what the layout and its
/// goldens need. Swap in a real metrics source via [`crate::LayoutOptions`] when pixel-true
/// wrapping matters.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.1
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let lines: Vec<&str> = text.split('\n').collect();
        let mut max_cells = 0usize;
        for line in &lines {
            max_cells = max_cells.max(UnicodeWidthStr::width(*line));
        }

        TextMetrics {
            width: max_cells as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_font_size_and_cell_count() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle {
            font_size: 10.0,
            ..Default::default()
        };
        let metrics = m.measure("Avatar", &style);
        assert_eq!(metrics.width, 6.0 * 10.0 * 0.6);
        assert_eq!(metrics.line_count, 1);
    }

    #[test]
    fn wide_characters_count_double() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::default();
        let narrow = m.measure("ab", &style);
        let wide = m.measure("千与", &style);
        assert_eq!(wide.width, 2.0 * narrow.width);
    }

    #[test]
    fn multiline_text_reports_the_longest_line() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::default();
        let metrics = m.measure("short\na longer line", &style);
        assert_eq!(metrics.line_count, 2);
        assert_eq!(metrics.width, m.measure("a longer line", &style).width);
    }
}
