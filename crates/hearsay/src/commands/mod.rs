pub mod analyze;
pub mod convert;
pub mod score;
pub mod version;

use anyhow::bail;
use std::path::PathBuf;

/// Resolve a path from its CLI flag or environment fallback.
pub(crate) fn resolve_path(
    arg: Option<PathBuf>,
    env_var: &str,
    flag: &str,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }
    match std::env::var(env_var) {
        Ok(value) if !value.trim().is_empty() => Ok(PathBuf::from(value.trim())),
        _ => bail!("{flag} not given and {env_var} is not set"),
    }
}
