//! Greedy label wrapping driven by live width measurement.
//!
//! This is the one place where measured text feeds back into layout: each candidate line is
//! re-measured with the active [`TextMeasurer`], so breakpoints depend on the metric in
//! effect, not on character counts.

use super::{TextMeasurer, TextStyle};

/// Reflows `label` into lines no wider than `max_width_px`.
///
/// Greedy line-fill: words are taken in order; a word that would push a non-empty line past
/// the limit commits the line and starts the next one. A single word wider than the limit is
/// emitted on its own line and overflows — it is never split or hyphenated. Concatenating the
/// returned lines' words reproduces the input word sequence exactly.
///
/// A label that already fits comes back as exactly one line. An empty or all-whitespace label
/// produces no lines. A non-positive or non-finite width disables wrapping.
pub fn wrap_label_lines(
    label: &str,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    max_width_px: f64,
) -> Vec<String> {
    let words: Vec<&str> = label.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    if !max_width_px.is_finite() || max_width_px <= 0.0 {
        return vec![words.join(" ")];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in words {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if measurer.measure(&candidate, style).width > max_width_px && !line.is_empty() {
            lines.push(line);
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{DeterministicTextMeasurer, TextMetrics};

    /// Fake metric: every character is exactly 1px, so widths are trivially predictable.
    struct CharPx;

    impl TextMeasurer for CharPx {
        fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
            TextMetrics {
                width: text.chars().count() as f64,
                height: 1.0,
                line_count: 1,
            }
        }
    }

    fn wrap(label: &str, max: f64) -> Vec<String> {
        wrap_label_lines(label, &CharPx, &TextStyle::default(), max)
    }

    #[test]
    fn fitting_label_is_a_single_line() {
        assert_eq!(wrap("Avatar", 10.0), vec!["Avatar"]);
    }

    #[test]
    fn overflowing_label_wraps_to_at_least_two_lines() {
        let lines = wrap("Pirates of the Caribbean", 12.0);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(line.chars().count() <= 12, "{line:?} exceeds the limit");
        }
    }

    #[test]
    fn words_are_never_dropped_or_reordered() {
        let label = "Harry Potter and the Deathly Hallows Part 2";
        let lines = wrap(label, 9.0);
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        let original: Vec<&str> = label.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn an_overwide_word_is_not_split() {
        let lines = wrap("Incomprehensibilities", 5.0);
        assert_eq!(lines, vec!["Incomprehensibilities"]);
    }

    #[test]
    fn an_overwide_word_gets_its_own_line() {
        let lines = wrap("The Incomprehensibilities Return", 8.0);
        assert_eq!(
            lines,
            vec!["The", "Incomprehensibilities", "Return"]
        );
    }

    #[test]
    fn greedy_fill_packs_words_onto_a_line() {
        // "It s a" is 6 chars, adding "Mad" would make 10 > 8.
        let lines = wrap("It s a Mad Mad World", 8.0);
        assert_eq!(lines, vec!["It s a", "Mad Mad", "World"]);
    }

    #[test]
    fn empty_label_produces_no_lines() {
        assert!(wrap("", 10.0).is_empty());
        assert!(wrap("   ", 10.0).is_empty());
    }

    #[test]
    fn non_finite_width_disables_wrapping() {
        assert_eq!(
            wrap("a b c", f64::NAN),
            vec!["a b c"]
        );
        assert_eq!(wrap("a b c", 0.0), vec!["a b c"]);
    }

    #[test]
    fn measurer_decides_breakpoints_not_char_counts() {
        // With the deterministic measurer at 12px, each char is 7.2px wide.
        let measurer = DeterministicTextMeasurer::default();
        let style = TextStyle {
            font_size: 12.0,
            ..Default::default()
        };
        // "Jurassic World" is 14 cells = 100.8px; a 100px budget forces a break.
        let lines = wrap_label_lines("Jurassic World", &measurer, &style, 100.0);
        assert_eq!(lines, vec!["Jurassic", "World"]);
        // The same label fits a 101px budget on one line.
        let lines = wrap_label_lines("Jurassic World", &measurer, &style, 101.0);
        assert_eq!(lines, vec!["Jurassic World"]);
    }
}
