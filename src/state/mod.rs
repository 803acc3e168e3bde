//! State module for tracking traversal progress
//!
//! # Components
//!
//! - `PageState`: Tracks the state of individual pages (queued, fetching, processed, failed)
//! - `TraversalState`: Tracks whether a run is still going or has finished

mod page_state;
mod traversal_state;

// Re-export main types
pub use page_state::PageState;
pub use traversal_state::TraversalState;
