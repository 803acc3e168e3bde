//! Series classification for variant titles

use serde::Serialize;
use std::fmt;

/// Coarse product family derived from title text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    Paramount,
    Classic,
    Select,
    Unknown,
}

impl Series {
    /// All series in classification priority order
    pub const ALL: [Series; 4] = [
        Series::Paramount,
        Series::Classic,
        Series::Select,
        Series::Unknown,
    ];

    /// Returns the lowercase key used in the output document
    pub fn key(&self) -> &'static str {
        match self {
            Self::Paramount => "paramount",
            Self::Classic => "classic",
            Self::Select => "select",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the key with its first letter capitalized
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Paramount => "Paramount",
            Self::Classic => "Classic",
            Self::Select => "Select",
            Self::Unknown => "Unknown",
        }
    }

    /// Position of this series in [`Series::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Detects which series a title belongs to
///
/// Case-insensitive substring search in the order paramount, classic,
/// select. The first hit wins; titles matching none are `Unknown`.
pub fn detect_series(title: &str) -> Series {
    let lower = title.to_lowercase();

    // Unknown is the fallback and has no keyword
    Series::ALL[..3]
        .iter()
        .copied()
        .find(|series| lower.contains(series.key()))
        .unwrap_or(Series::Unknown)
}
