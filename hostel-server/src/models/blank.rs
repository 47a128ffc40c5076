//! Serde helper for HTML form values
//!
//! Browser forms submit untouched optional inputs as `""`. These are
//! treated the same as a missing field.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Deserialize `null`, a missing value, or a blank string as `None`,
/// otherwise parse the string with `FromStr`.
///
/// Use together with `#[serde(default)]`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}
