//! Ordinal category → color scale over a fixed palette.

use indexmap::IndexMap;

/// Two concatenated ColorBrewer qualitative sets (Paired + Set3), 24 colors.
pub const CATEGORY_PALETTE: [&str; 24] = [
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6", "#6a3d9a", "#ffff99", "#b15928", "#8dd3c7", "#ffffb3", "#bebada", "#fb8072",
    "#80b1d3", "#fdb462", "#b3de69", "#fccde5", "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// First-seen-order ordinal scale: the Nth distinct category gets palette color N.
///
/// When the domain outgrows the palette the scale cycles rather than failing, so the mapping
/// stays total and deterministic. The same category always yields the same color within one
/// render.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    domain: IndexMap<String, usize>,
}

impl CategoryColors {
    /// Pre-seeds the domain so colors are assigned in the given order regardless of which
    /// category is asked for first.
    pub fn with_domain<S: AsRef<str>>(categories: &[S]) -> Self {
        let mut scale = Self::default();
        for name in categories {
            scale.index_of(name.as_ref());
        }
        scale
    }

    fn index_of(&mut self, category: &str) -> usize {
        if let Some(idx) = self.domain.get(category).copied() {
            return idx;
        }
        let idx = self.domain.len();
        self.domain.insert(category.to_string(), idx);
        idx
    }

    /// Total mapping; a category not seen at construction extends the domain, matching d3's
    /// implicit ordinal domain.
    pub fn color(&mut self, category: &str) -> String {
        let idx = self.index_of(category);
        CATEGORY_PALETTE[idx % CATEGORY_PALETTE.len()].to_string()
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_palette_colors_in_first_seen_order() {
        let mut colors = CategoryColors::with_domain(&["Action", "Drama", "Comedy"]);
        assert_eq!(colors.color("Action"), CATEGORY_PALETTE[0]);
        assert_eq!(colors.color("Drama"), CATEGORY_PALETTE[1]);
        assert_eq!(colors.color("Comedy"), CATEGORY_PALETTE[2]);
    }

    #[test]
    fn mapping_is_stable_across_lookups() {
        let mut colors = CategoryColors::with_domain(&["Action", "Drama"]);
        let first = colors.color("Drama");
        let second = colors.color("Drama");
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_categories_get_distinct_colors_while_palette_lasts() {
        let names: Vec<String> = (0..CATEGORY_PALETTE.len()).map(|i| format!("c{i}")).collect();
        let mut colors = CategoryColors::with_domain(&names);
        let mut seen = std::collections::HashSet::new();
        for name in &names {
            assert!(seen.insert(colors.color(name)), "duplicate color for {name}");
        }
    }

    #[test]
    fn overflowing_the_palette_cycles() {
        let names: Vec<String> = (0..=CATEGORY_PALETTE.len()).map(|i| format!("c{i}")).collect();
        let mut colors = CategoryColors::with_domain(&names);
        assert_eq!(colors.color("c24"), CATEGORY_PALETTE[0]);
    }

    #[test]
    fn unseen_category_extends_the_domain() {
        let mut colors = CategoryColors::with_domain(&["Action"]);
        assert_eq!(colors.color("Surprise"), CATEGORY_PALETTE[1]);
        assert_eq!(colors.len(), 2);
    }
}
