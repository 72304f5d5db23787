//! Decoding helper for API fields that may arrive as JSON `null`.

use serde::{Deserialize, Deserializer};

/// Decode `null` as `T::default()`. Pair with `#[serde(default)]` so a
/// missing key behaves the same way.
///
/// # Errors
///
/// Returns the deserializer's error when the value is neither `null` nor a
/// valid `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
