#![forbid(unsafe_code)]

//! Dataset model + aggregation for the marquee treemap chart (headless).
//!
//! Design goals:
//! - deterministic, testable outputs (layout and rendering live in `marquee-render`)
//! - runtime-agnostic async APIs (no specific executor required)
//! - the single network fetch is the only suspension point in the whole pipeline

pub mod config;
pub mod dataset;
pub mod error;
pub mod summary;

pub use config::ChartConfig;
pub use dataset::{
    Category, Dataset, KICKSTARTER_DATA_URL, LeafItem, MOVIE_DATA_URL, VIDEO_GAME_DATA_URL,
};
pub use error::{Error, Result};
pub use summary::{DatasetSummary, describe, summarize};

/// Loads a dataset from a local path.
///
/// Async wrapper over the synchronous loader so callers with an executor can `.await` it the
/// same way they await [`fetch_dataset`]. No I/O is overlapped; the future resolves immediately.
pub async fn load_dataset(path: &std::path::Path) -> Result<Dataset> {
    Dataset::from_path(path)
}

/// Fetches a dataset over HTTP.
///
/// This is the pipeline's single suspension point: one GET, no retry, no timeout beyond the
/// client default. A failed fetch or malformed body surfaces as an [`Error`] and nothing
/// downstream runs.
#[cfg(feature = "fetch")]
pub async fn fetch_dataset(url: &str) -> Result<Dataset> {
    Dataset::fetch(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_dataset_surfaces_io_errors() {
        let err = futures::executor::block_on(load_dataset(std::path::Path::new(
            "definitely/not/here.json",
        )))
        .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
