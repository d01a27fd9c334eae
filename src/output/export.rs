//! Artifact export
//!
//! Writes a finished crawl's artifacts to disk as
//! `<host>_full_content.txt` and `<host>_sitemap.xml`.

use crate::output::CrawlOutcome;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// File names for the two artifacts of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub full_text: String,
    pub sitemap: String,
}

/// Paths the artifacts were written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArtifacts {
    pub full_text: PathBuf,
    pub sitemap: PathBuf,
}

/// Derives artifact file names from the seed's host
///
/// Falls back to `site` when the seed has no host.
pub fn artifact_file_names(seed: &Url) -> ArtifactNames {
    let host = seed.host_str().unwrap_or("site");
    ArtifactNames {
        full_text: format!("{}_full_content.txt", host),
        sitemap: format!("{}_sitemap.xml", host),
    }
}

/// Writes both artifacts into `directory`, creating it if needed
///
/// # Returns
///
/// * `Ok(ExportedArtifacts)` - Paths of the written files
/// * `Err(std::io::Error)` - Directory creation or a write failed
pub fn write_artifacts(
    outcome: &CrawlOutcome,
    seed: &Url,
    directory: &Path,
) -> std::io::Result<ExportedArtifacts> {
    fs::create_dir_all(directory)?;

    let names = artifact_file_names(seed);
    let full_text = directory.join(names.full_text);
    let sitemap = directory.join(names.sitemap);

    fs::write(&full_text, outcome.full_text.as_bytes())?;
    fs::write(&sitemap, outcome.sitemap_xml.as_bytes())?;

    tracing::info!(
        "Wrote {} and {}",
        full_text.display(),
        sitemap.display()
    );

    Ok(ExportedArtifacts { full_text, sitemap })
}
