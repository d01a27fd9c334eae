//! Output module for building crawl artifacts
//!
//! This module handles:
//! - Concatenating scraped pages into one plain-text document
//! - Generating the sitemap XML
//! - Writing both artifacts to disk

mod export;
mod sitemap;
mod text;

pub use export::{artifact_file_names, write_artifacts, ArtifactNames, ExportedArtifacts};
pub use sitemap::{build_sitemap, SITEMAP_NAMESPACE};
pub use text::build_full_text;

use crate::state::PageResult;
use serde::Serialize;

/// Artifacts derived from a finished crawl
///
/// Serializes as `{"content": ..., "sitemap": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlOutcome {
    /// Concatenated plain text of every scraped page
    #[serde(rename = "content")]
    pub full_text: String,

    /// Sitemap XML listing every scraped page
    #[serde(rename = "sitemap")]
    pub sitemap_xml: String,
}

impl CrawlOutcome {
    /// Builds both artifacts from the results in visit order
    ///
    /// Pure function of `results`: the same input always yields
    /// byte-identical artifacts.
    pub fn from_results(results: &[PageResult]) -> Self {
        Self {
            full_text: build_full_text(results),
            sitemap_xml: build_sitemap(results),
        }
    }
}
