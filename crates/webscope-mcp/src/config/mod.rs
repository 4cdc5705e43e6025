//! Configuration loading and resolution.

use std::path::PathBuf;

/// Resolve the directory audit reports are written into.
pub fn resolve_report_dir(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    if let Ok(env_path) = std::env::var("WEBSCOPE_REPORT_DIR") {
        return PathBuf::from(env_path);
    }

    PathBuf::from("./reports")
}

/// Resolve an explicit Chrome/Chromium binary, when one is configured.
pub fn resolve_chrome_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    std::env::var("WEBSCOPE_CHROME").ok().map(PathBuf::from)
}
