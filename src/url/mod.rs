//! URL handling module for Site-Scribe
//!
//! This module provides seed normalization, domain extraction and the link
//! filter that decides which discovered `href`s stay inside the crawl scope.

mod domain;
mod filter;
mod normalize;

// Re-export main functions
pub use domain::extract_domain;
pub use filter::{has_excluded_extension, resolve_link};
pub use normalize::{normalize_seed, strip_fragment};
