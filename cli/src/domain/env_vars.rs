//! `NAME=value` pair validation for `bcn run --envvar`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::RunError;

/// Upper-case letters and underscores, then `=`, then anything.
static ENV_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^([A-Z_]+)=(.*)$").expect("valid regex")
});

/// Parse `NAME=value` pairs into a map. Later pairs override earlier ones.
///
/// # Errors
///
/// Returns `RunError::InvalidEnvVar` naming the first pair whose name is not
/// made of upper-case letters and underscores. No partial map is returned.
pub fn check_env_vars<S: AsRef<str>>(pairs: &[S]) -> Result<BTreeMap<String, String>, RunError> {
    let mut vars = BTreeMap::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let caps = ENV_PAIR_RE
            .captures(pair)
            .ok_or_else(|| RunError::InvalidEnvVar(pair.to_string()))?;
        vars.insert(caps[1].to_string(), caps[2].to_string());
    }
    Ok(vars)
}
