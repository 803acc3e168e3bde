//! Crawl frontier for a bounded, sequential traversal
//!
//! This module handles:
//! - FIFO ordering of pending page paths
//! - O(1) membership checks against both visited and queued paths
//! - The hard cap on distinct pages visited

use std::collections::{HashSet, VecDeque};

/// Frontier of pending and visited page paths
///
/// A path enters the queue at most once before it is dequeued: enqueueing
/// checks both the visited set and the current queue. The visited set only
/// grows, and once it holds `max_urls` paths the frontier is exhausted even
/// if paths remain queued.
#[derive(Debug, Clone)]
pub struct Frontier {
    /// Pending paths in discovery order
    queue: VecDeque<String>,

    /// Mirror of `queue` for membership tests
    queued: HashSet<String>,

    /// Paths handed out by `next_url`
    visited: HashSet<String>,

    /// Hard ceiling on `visited.len()`
    max_urls: usize,

    /// Dequeued paths dropped because they were already visited
    duplicates_dropped: usize,
}

impl Frontier {
    /// Creates a frontier with `start` as its sole queued path
    ///
    /// # Arguments
    ///
    /// * `start` - The page-relative start path
    /// * `max_urls` - Maximum number of distinct pages to visit
    pub fn new(start: impl Into<String>, max_urls: usize) -> Self {
        let start = start.into();
        Self {
            queue: VecDeque::from([start.clone()]),
            queued: HashSet::from([start]),
            visited: HashSet::new(),
            max_urls,
            duplicates_dropped: 0,
        }
    }

    /// Returns the next path to fetch and marks it visited
    ///
    /// Already-visited paths at the head of the queue are dropped without
    /// counting against the cap.
    ///
    /// # Returns
    ///
    /// * `Some(String)` - A path that has not been visited before
    /// * `None` - The queue is empty or the cap has been reached
    pub fn next_url(&mut self) -> Option<String> {
        while self.visited.len() < self.max_urls {
            let path = self.queue.pop_front()?;
            self.queued.remove(&path);

            if self.visited.contains(&path) {
                self.duplicates_dropped += 1;
                tracing::trace!("Dropping already visited path: {}", path);
                continue;
            }

            self.visited.insert(path.clone());
            return Some(path);
        }

        None
    }

    /// Queues a path unless it was already visited or is already queued
    ///
    /// # Returns
    ///
    /// `true` if the path was added
    pub fn enqueue(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.visited.contains(&path) || self.queued.contains(&path) {
            return false;
        }

        self.queued.insert(path.clone());
        self.queue.push_back(path);
        true
    }

    /// Queues each path in order, returning how many were new
    pub fn enqueue_all<I, S>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths
            .into_iter()
            .map(|path| self.enqueue(path))
            .filter(|added| *added)
            .count()
    }

    /// Returns true once the queue is empty or the cap is reached
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty() || self.visited.len() >= self.max_urls
    }

    /// Returns whether a path has been handed out by `next_url`
    pub fn is_visited(&self, path: &str) -> bool {
        self.visited.contains(path)
    }

    /// Returns whether a path is currently waiting in the queue
    pub fn is_queued(&self, path: &str) -> bool {
        self.queued.contains(path)
    }

    /// Returns the number of distinct paths visited
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns the number of paths waiting in the queue
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    pub fn max_urls(&self) -> usize {
        self.max_urls
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }
}
