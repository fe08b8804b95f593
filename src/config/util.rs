//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Check that `url_str` is an absolute `http`/`https` URL with a host.
///
/// ```ignore
/// is_site_url("https://example.org")      -> true
/// is_site_url("https://example.org/sub/") -> true
/// is_site_url("example.org")              -> false
/// is_site_url("ftp://example.org")        -> false
/// ```
pub fn is_site_url(url_str: &str) -> bool {
    url::Url::parse(url_str)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/archive/data/        ← cwd
/// /home/user/archive/docket.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Upward search starting at `start`.
pub fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

// ============================================================================
// tests
// ============================================================================
