//! State module for tracking crawl progress
//!
//! This module provides the per-page types produced while a crawl runs.
//!
//! # Components
//!
//! - `PageState`: Terminal status of a dequeued page (scraped or failed)
//! - `PageResult`: Title and text extracted from a scraped page

mod page_result;
mod page_state;

// Re-export main types
pub use page_result::PageResult;
pub use page_state::PageState;
