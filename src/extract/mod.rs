//! Attribute extraction from free-text variant titles
//!
//! Every function in this module is pure and deterministic. Titles that do
//! not match an expected pattern yield empty (or absent) attributes rather
//! than errors, since the upstream titles come from heterogeneous HTML.
//!
//! # Example
//!
//! ```
//! use swatch_ripple::extract::{detect_series, extract_sku, Series};
//!
//! let title = "ZLINE 30 in. Paramount Gas Range (SGRZ-30)";
//! assert_eq!(extract_sku(title), "SGRZ-30");
//! assert_eq!(detect_series(title), Series::Paramount);
//! ```

mod details;
mod series;
mod sku;

pub use details::{extract_variant_details, VariantDetails};
pub use series::{detect_series, Series};
pub use sku::extract_sku;
