//! Tokenization of CF `coordinates` attribute values
//!
//! Values are loosely delimited lists of variable names: `"lon lat"`,
//! `"lon,lat"` and `"lon,    lat"` all name the same two coordinates.

use regex::Regex;
use std::sync::OnceLock;

fn delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r"\s+|,\s*").expect("delimiter pattern is valid"))
}

/// Splits a `coordinates` value into variable-name tokens, in order.
///
/// Delimiters are runs of whitespace or a comma followed by optional
/// whitespace. Nothing else is trimmed, so leading, trailing or doubled
/// delimiters produce empty tokens and an empty value yields `[""]`.
pub fn split_coordinates(value: &str) -> Vec<String> {
    delimiter().split(value).map(str::to_string).collect()
}

/// The coordinate list of a variable with empty tokens removed.
///
/// Science variables sharing a key can be resampled over the same swath
/// geometry.
pub fn coordinates_key(value: &str) -> Vec<String> {
    delimiter()
        .split(value)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
