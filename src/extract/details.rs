//! Variant attribute extraction
//!
//! Each attribute is an independent keyword check against the title. Where
//! one keyword is a substring of another, the longer keyword is listed first
//! so that it takes precedence.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// The unit literal is matched case-sensitively
static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:in\.|inch)").expect("valid size regex"));

const FUEL_TYPES: &[(&str, &str)] = &[("dual fuel", "Dual Fuel"), ("gas", "Gas")];

const BASE_FINISHES: &[(&str, &str)] = &[
    ("black stainless steel", "Black Stainless Steel"),
    ("satin stainless steel", "Satin Stainless Steel"),
    ("stainless steel", "Stainless Steel"),
];

const ACCENTS: &[(&str, &str)] = &[
    ("champagne bronze", "Champagne Bronze"),
    ("polished gold", "Polished Gold"),
    ("matte black", "Matte Black"),
];

// "white matte" also covers "white matte door"
const DOOR_COLORS: &[(&str, &str)] = &[("white matte", "White Matte")];

const BURNER_TYPES: &[(&str, &str)] = &[
    ("brass burner", "Brass Burners"),
    ("duopro", "DuoPro Burners"),
    ("porcelain", "Porcelain"),
];

/// Typed attribute set parsed from a variant title
///
/// The four always-present fields are empty strings when undetected.
/// `door_color` and `burner_type` are `None` when the attribute does not
/// apply, and are left out of serialized output entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDetails {
    pub size: String,
    pub fuel_type: String,
    pub base_finish: String,
    pub accent: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burner_type: Option<String>,
}

/// Extracts size, fuel type, finish, accent, door color and burner type
///
/// # Example
///
/// ```
/// use swatch_ripple::extract::extract_variant_details;
///
/// let details = extract_variant_details(
///     "36 in. Classic Dual Fuel Range in Black Stainless Steel with Brass Burners",
/// );
/// assert_eq!(details.size, "36 Inch");
/// assert_eq!(details.fuel_type, "Dual Fuel");
/// assert_eq!(details.base_finish, "Black Stainless Steel");
/// assert_eq!(details.burner_type.as_deref(), Some("Brass Burners"));
/// assert_eq!(details.door_color, None);
/// ```
pub fn extract_variant_details(title: &str) -> VariantDetails {
    let lower = title.to_lowercase();

    let size = SIZE_RE
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|digits| format!("{} Inch", digits.as_str()))
        .unwrap_or_default();

    VariantDetails {
        size,
        fuel_type: first_match(&lower, FUEL_TYPES).unwrap_or_default(),
        base_finish: first_match(&lower, BASE_FINISHES).unwrap_or_default(),
        accent: first_match(&lower, ACCENTS).unwrap_or_default(),
        door_color: first_match(&lower, DOOR_COLORS),
        burner_type: first_match(&lower, BURNER_TYPES),
    }
}

/// Returns the label of the first keyword contained in `haystack`
fn first_match(haystack: &str, table: &[(&str, &str)]) -> Option<String> {
    table
        .iter()
        .find(|(needle, _)| haystack.contains(needle))
        .map(|(_, label)| (*label).to_string())
}
