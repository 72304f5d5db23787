//! JSON output helpers.

/// Pretty-print a raw JSON body. Bodies that are not JSON come back as an
/// empty string.
#[must_use]
pub fn pretty_json(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_default()
}
