//! URL handling module for Swatch-Ripple
//!
//! The frontier tracks page-relative paths exactly as the catalog returns
//! them; this module converts between those paths and absolute URLs under a
//! single fixed origin.

mod resolve;

pub use resolve::{join_origin, page_path, parse_origin};
