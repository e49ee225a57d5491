#![forbid(unsafe_code)]

//! `marquee` renders a static treemap chart from the freeCodeCamp tree-map datasets
//! (movie box office, Kickstarter pledges, video-game sales): one JSON document in, one SVG
//! document out, with optional raster conversion.
//!
//! # Features
//!
//! - `fetch`: enable the single HTTP GET dataset loader (`Dataset::fetch`)
//! - `render`: enable layout + SVG rendering (`marquee::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use marquee_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use marquee_render::model::ChartLayout;
    pub use marquee_render::svg::{SvgRenderOptions, render_chart_svg};
    pub use marquee_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use marquee_render::{LayoutOptions, layout_chart};

    use marquee_core::{ChartConfig, Dataset};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum ChartError {
        #[error(transparent)]
        Data(#[from] marquee_core::Error),
        #[error(transparent)]
        Layout(#[from] marquee_render::Error),
    }

    pub type Result<T> = std::result::Result<T, ChartError>;

    /// Synchronous end-to-end helper: dataset → SVG text.
    pub fn render_svg_sync(
        dataset: &Dataset,
        config: &ChartConfig,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_chart(dataset, config, layout_options)?;
        Ok(render_chart_svg(&layout, svg_options))
    }

    /// Async-shaped wrapper over [`render_svg_sync`]. All work is CPU-bound; the future
    /// resolves without suspending, so any executor (or `block_on`) can drive it.
    pub async fn render_svg(
        dataset: &Dataset,
        config: &ChartConfig,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        render_svg_sync(dataset, config, layout_options, svg_options)
    }

    /// Bundles the common options for repeated rendering so callers are not threading four
    /// parameters through every call. Runtime-agnostic and clonable.
    #[derive(Clone, Default)]
    pub struct ChartRenderer {
        pub config: ChartConfig,
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl ChartRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: ChartConfig) -> Self {
            self.config = config;
            self
        }

        pub fn layout_sync(&self, dataset: &Dataset) -> Result<ChartLayout> {
            Ok(layout_chart(dataset, &self.config, &self.layout)?)
        }

        pub fn render_svg_sync(&self, dataset: &Dataset) -> Result<String> {
            render_svg_sync(dataset, &self.config, &self.layout, &self.svg)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            dataset: &Dataset,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_png_sync(dataset, &self.config, &self.layout, &self.svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            dataset: &Dataset,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_jpeg_sync(dataset, &self.config, &self.layout, &self.svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(&self, dataset: &Dataset) -> raster::Result<Vec<u8>> {
            raster::render_pdf_sync(dataset, &self.config, &self.layout, &self.svg)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn renderer_produces_a_parseable_document() {
            let dataset = Dataset::from_json_str(
                r#"{"name":"Movies","children":[
                    {"name":"Action","children":[
                        {"name":"Avatar","category":"Action","value":760000000}
                    ]}
                ]}"#,
            )
            .unwrap();
            let svg = ChartRenderer::new().render_svg_sync(&dataset).unwrap();
            let doc = roxmltree::Document::parse(&svg).unwrap();
            assert!(
                doc.descendants()
                    .any(|n| n.attribute("data-name") == Some("Avatar"))
            );
        }

        #[test]
        fn async_wrapper_resolves_without_an_executor_reactor() {
            let dataset = Dataset::from_json_str(r#"{"name":"Movies","children":[]}"#).unwrap();
            let svg = futures::executor::block_on(render_svg(
                &dataset,
                &ChartConfig::default(),
                &LayoutOptions::default(),
                &SvgRenderOptions::default(),
            ))
            .unwrap();
            assert!(svg.starts_with("<svg"));
        }
    }
}
