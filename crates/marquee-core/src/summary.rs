//! Walks the top-level children once to produce the counts and category list used for the
//! chart title, description, and the color domain.

use crate::Dataset;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub item_count: usize,
    pub category_count: usize,
    /// Category names in first-encountered order. This order is the color domain.
    pub categories: Vec<String>,
}

pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let mut item_count = 0usize;
    let mut categories = Vec::with_capacity(dataset.children.len());
    for category in &dataset.children {
        item_count += category.children.len();
        categories.push(category.name.clone());
    }
    DatasetSummary {
        item_count,
        category_count: categories.len(),
        categories,
    }
}

/// Human-readable description line shown under the title.
///
/// The three known dataset roots get their original wording; anything else falls back to a
/// generic grouping sentence.
pub fn describe(dataset: &Dataset, summary: &DatasetSummary) -> String {
    let n = summary.item_count;
    match dataset.name.as_str() {
        "Kickstarter" => format!("Top {n} Kickstarter pledges by product type"),
        "Movies" => format!("Top {n} grossing movies at the US box office by genre"),
        "Video Game Sales" => format!("Top {n} selling video games by console"),
        other => format!("Top {n} items in {other} by category"),
    }
}
