//! The two-level hierarchy the chart is built from.
//!
//! The wire shape is fixed by the freeCodeCamp treemap datasets:
//! `{name, children: [{name, children: [{name, category, value}]}]}`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Top US box-office receipts, grouped by genre.
pub const MOVIE_DATA_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/movie-data.json";
/// Top Kickstarter pledges, grouped by product type.
pub const KICKSTARTER_DATA_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/kickstarter-funding-data.json";
/// Top video-game sales, grouped by console.
pub const VIDEO_GAME_DATA_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/video-game-sales-data.json";

/// A terminal data point; `value` is the non-negative weight driving tile area.
///
/// `category` repeats the parent category name. It is redundant with tree position but kept
/// because the datasets carry it and the renderer stamps it into `data-category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeafItem {
    pub name: String,
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub children: Vec<LeafItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Category>,
}

impl Dataset {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(text)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dataset: Dataset = serde_json::from_reader(reader)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading dataset");
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Performs the single HTTP GET the pipeline starts with.
    #[cfg(feature = "fetch")]
    pub fn fetch(url: &str) -> Result<Self> {
        tracing::debug!(url, "fetching dataset");
        let dataset: Dataset = reqwest::blocking::get(url)?.error_for_status()?.json()?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Leaf weights must be finite and non-negative; zero is allowed and produces an
    /// invisible tile downstream.
    fn validate(&self) -> Result<()> {
        for category in &self.children {
            for leaf in &category.children {
                if !leaf.value.is_finite() || leaf.value < 0.0 {
                    return Err(Error::InvalidDataset {
                        message: format!(
                            "leaf {:?} in category {:?} has invalid value {}",
                            leaf.name, category.name, leaf.value
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// Total leaf weight across all categories.
    pub fn total_value(&self) -> f64 {
        self.children
            .iter()
            .flat_map(|c| c.children.iter())
            .map(|l| l.value)
            .sum()
    }
}
