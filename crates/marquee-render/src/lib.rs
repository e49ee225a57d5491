#![forbid(unsafe_code)]

//! Treemap tiling, label wrapping, and SVG rendering for marquee.
//!
//! The pipeline is split into a pure layout stage ([`layout_chart`]: dataset → rectangles +
//! colors + wrapped label lines) and an effectful drawing stage
//! ([`svg::render_chart_svg`]: layout → SVG text), so the layout can be tested without any
//! rendering surface. Text width decisions are delegated to an injectable
//! [`text::TextMeasurer`].

pub mod color;
pub mod model;
pub mod svg;
pub mod text;
pub mod treemap;

use crate::color::CategoryColors;
use crate::model::{ChartLayout, LeafLayout, LegendEntry, LegendLayout};
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
use marquee_core::{ChartConfig, Dataset};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid chart config: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Extra vertical space above the tiles for the title and description lines.
const HEADER_HEIGHT: f64 = 70.0;
/// Legend geometry offsets, matching the original chart.
const LEGEND_INSET: f64 = 5.0;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

/// Computes the full chart layout: tile rectangles, per-category fills, wrapped label lines,
/// legend geometry, and the title/description strings.
///
/// Pure except for the injected text measurer; identical inputs produce identical layouts.
pub fn layout_chart(
    dataset: &Dataset,
    config: &ChartConfig,
    options: &LayoutOptions,
) -> Result<ChartLayout> {
    if !(config.width.is_finite() && config.width > 0.0)
        || !(config.height.is_finite() && config.height > 0.0)
    {
        return Err(Error::InvalidConfig {
            message: format!("canvas {}x{} is not drawable", config.width, config.height),
        });
    }
    if config.legend_band >= config.height {
        return Err(Error::InvalidConfig {
            message: "legend band leaves no room for tiles".to_string(),
        });
    }

    let summary = marquee_core::summarize(dataset);
    let description = marquee_core::describe(dataset, &summary);
    let mut colors = CategoryColors::with_domain(&summary.categories);

    let tiles = treemap::layout_tiles(
        dataset,
        config.width,
        config.tile_area_height(),
        config.padding,
    );

    let label_style = TextStyle {
        font_family: None,
        font_size: config.label_font_size,
        font_weight: None,
    };
    let measurer = options.text_measurer.as_ref();

    let mut leaves = Vec::with_capacity(tiles.len());
    for tile in tiles {
        let fill = colors.color(&tile.category);
        let max_label_width = (tile.x1 - tile.x0) - 2.0 * config.label_inset;
        let label_lines =
            text::wrap::wrap_label_lines(&tile.name, measurer, &label_style, max_label_width);
        leaves.push(LeafLayout {
            name: tile.name,
            category: tile.category,
            value: tile.value,
            x0: tile.x0,
            y0: tile.y0,
            x1: tile.x1,
            y1: tile.y1,
            fill,
            label_lines,
        });
    }

    let legend = layout_legend(&summary.categories, &mut colors, config);

    Ok(ChartLayout {
        title: dataset.name.clone(),
        description,
        width: config.width,
        height: config.height,
        header_height: HEADER_HEIGHT,
        label_font_size: config.label_font_size,
        leaves,
        legend,
    })
}

fn layout_legend(
    categories: &[String],
    colors: &mut CategoryColors,
    config: &ChartConfig,
) -> LegendLayout {
    let columns = config.legend_columns.max(1);
    let item_width = config.width / columns as f64;
    let item_height = config.legend_band / columns as f64;
    let swatch_side = config.legend_band / 6.0;
    let origin_x = LEGEND_INSET;
    let origin_y = config.height - config.legend_band + LEGEND_INSET;

    let mut entries = Vec::with_capacity(categories.len());
    for (i, name) in categories.iter().enumerate() {
        let col = (i % columns) as f64;
        let row = (i / columns) as f64;
        let swatch_x = origin_x + col * item_width;
        let swatch_y = origin_y + row * item_height;
        entries.push(LegendEntry {
            label: name.clone(),
            color: colors.color(name),
            swatch_x,
            swatch_y,
            label_x: swatch_x + 1.2 * swatch_side,
            label_y: origin_y + 12.0 + row * item_height,
        });
    }

    LegendLayout {
        entries,
        swatch_side,
    }
}
