//! Layout model: the pure output of [`crate::layout_chart`], consumed by the SVG writer.

use serde::{Deserialize, Serialize};

/// A leaf item with its computed tile bounds, fill color, and wrapped label lines.
///
/// Bounds are absolute within the tile area; sibling rectangles do not overlap and their
/// areas are proportional to `value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeafLayout {
    pub name: String,
    pub category: String,
    pub value: f64,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub fill: String,
    /// Label text reflowed so no line exceeds the tile's usable width; in reading order,
    /// words never dropped or reordered.
    #[serde(default)]
    pub label_lines: Vec<String>,
}

impl LeafLayout {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub swatch_x: f64,
    pub swatch_y: f64,
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendLayout {
    #[serde(default)]
    pub entries: Vec<LegendEntry>,
    pub swatch_side: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartLayout {
    pub title: String,
    pub description: String,
    /// Canvas width; the legend band occupies the bottom of the canvas and the tiles the rest.
    pub width: f64,
    pub height: f64,
    /// Extra band above the canvas holding the title and description.
    pub header_height: f64,
    pub label_font_size: f64,
    #[serde(default)]
    pub leaves: Vec<LeafLayout>,
    pub legend: LegendLayout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_round_trips_through_json() {
        let layout = ChartLayout {
            title: "Movies".to_string(),
            description: "Top 1 grossing movies at the US box office by genre".to_string(),
            width: 1400.0,
            height: 800.0,
            header_height: 70.0,
            label_font_size: 12.0,
            leaves: vec![LeafLayout {
                name: "Avatar".to_string(),
                category: "Action".to_string(),
                value: 760505847.0,
                x0: 2.0,
                y0: 2.0,
                x1: 1398.0,
                y1: 698.0,
                fill: "#a6cee3".to_string(),
                label_lines: vec!["Avatar".to_string()],
            }],
            legend: LegendLayout {
                entries: Vec::new(),
                swatch_side: 100.0 / 6.0,
            },
        };
        let json = serde_json::to_string(&layout).unwrap();
        let back: ChartLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back.leaves[0].width(), 1396.0);
        assert_eq!(back.title, layout.title);
    }
}
