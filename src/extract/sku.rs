use regex::Regex;
use std::sync::LazyLock;

static TRAILING_SKU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Z0-9\-]+)\)$").expect("valid sku regex"));

/// Extracts the SKU from a trailing parenthesized token
///
/// The token must sit at the very end of the trimmed title and consist only
/// of uppercase letters, digits and hyphens, e.g. `"... (SGRZ-30-CB)"`.
/// Returns an empty string when no such token exists.
pub fn extract_sku(title: &str) -> String {
    TRAILING_SKU_RE
        .captures(title.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
