//! Chart geometry and typography knobs.
//!
//! Defaults reproduce the original chart: a 1400x800 canvas whose bottom 100px band holds the
//! legend, 1px of padding between tiles, and a 5-column legend grid.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Full canvas width in px.
    pub width: f64,
    /// Full canvas height in px, legend band included.
    pub height: f64,
    /// Height of the band below the tiles reserved for the legend.
    pub legend_band: f64,
    /// Uniform inner padding between adjacent tiles, applied at every depth.
    pub padding: f64,
    /// Number of legend columns.
    pub legend_columns: usize,
    /// Label font size in px; line height is 1.1em of this.
    pub label_font_size: f64,
    /// Horizontal inset of label text from the tile's left edge, and the slack subtracted from
    /// the tile width when wrapping.
    pub label_inset: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 800.0,
            legend_band: 100.0,
            padding: 1.0,
            legend_columns: 5,
            label_font_size: 12.0,
            label_inset: 5.0,
        }
    }
}

impl ChartConfig {
    /// The region tiles are laid out in: everything above the legend band.
    pub fn tile_area_height(&self) -> f64 {
        (self.height - self.legend_band).max(0.0)
    }
}
