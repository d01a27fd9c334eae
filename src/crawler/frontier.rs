//! Frontier for breadth-first traversal
//!
//! This module handles:
//! - FIFO queue management for URLs to crawl
//! - The visited set and queue-membership dedup
//! - The page cap, counted per dequeue attempt
//!
//! A frontier is owned by exactly one crawl and never shared.

use crate::url::{extract_domain, strip_fragment};
use crate::UrlError;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Queue and visited set of a single crawl
#[derive(Debug)]
pub struct Frontier {
    /// URLs waiting to be fetched, in discovery order
    queue: VecDeque<Url>,

    /// Mirror of `queue` for O(1) membership checks
    queued: HashSet<String>,

    /// URLs that have been dequeued; only grows
    visited: HashSet<String>,

    /// Host every enqueued URL must share
    domain: String,

    /// Dequeue attempts so far, successful or not
    pages_scraped: u32,

    /// Hard cap on `pages_scraped`
    max_pages: u32,
}

impl Frontier {
    /// Creates a frontier seeded with `seed`
    ///
    /// The crawl domain is the seed's host. The seed's fragment is dropped
    /// like any discovered link's.
    ///
    /// # Returns
    ///
    /// * `Ok(Frontier)` - Frontier holding the seed
    /// * `Err(UrlError::MissingDomain)` - The seed has no host
    pub fn new(seed: Url, max_pages: u32) -> Result<Self, UrlError> {
        let domain = extract_domain(&seed).ok_or(UrlError::MissingDomain)?;
        let mut frontier = Self::empty(domain, max_pages);
        frontier.offer(strip_fragment(seed));
        Ok(frontier)
    }

    /// Creates a frontier with no queued URLs
    pub fn empty(domain: impl Into<String>, max_pages: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            domain: domain.into(),
            pages_scraped: 0,
            max_pages,
        }
    }

    /// Dequeues the next URL to fetch
    ///
    /// Already-visited URLs are skipped. The returned URL is marked visited
    /// and the page counter is incremented before the caller fetches it, so
    /// failed fetches count toward the cap.
    ///
    /// # Returns
    ///
    /// * `Some((Url, u32))` - The URL and its 1-based position in the fetch order
    /// * `None` - The queue is empty or the cap has been reached
    pub fn next_url(&mut self) -> Option<(Url, u32)> {
        while self.has_capacity() {
            let url = self.queue.pop_front()?;
            self.queued.remove(url.as_str());

            if !self.visited.insert(url.as_str().to_string()) {
                tracing::trace!("Skipping already visited URL: {}", url);
                continue;
            }

            self.pages_scraped += 1;
            return Some((url, self.pages_scraped));
        }

        None
    }

    /// Appends a URL unless it was already visited or is already queued
    ///
    /// Scope and type filtering happen before this call; this only dedups.
    ///
    /// # Returns
    ///
    /// `true` if the URL was enqueued
    pub fn offer(&mut self, url: Url) -> bool {
        let key = url.as_str();
        if self.visited.contains(key) || self.queued.contains(key) {
            return false;
        }

        tracing::debug!("Enqueued: {}", url);
        self.queued.insert(key.to_string());
        self.queue.push_back(url);
        true
    }

    /// Returns true while more pages may be dequeued
    pub fn has_capacity(&self) -> bool {
        self.pages_scraped < self.max_pages
    }

    /// Returns true once the page cap has been hit
    pub fn cap_reached(&self) -> bool {
        !self.has_capacity()
    }

    /// Host this frontier is restricted to
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Number of dequeue attempts so far
    pub fn pages_scraped(&self) -> u32 {
        self.pages_scraped
    }

    /// Page cap of this frontier
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Number of visited URLs
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs waiting in the queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
