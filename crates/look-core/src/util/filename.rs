//! Output path generation and reporting helpers
//!
//! Generated names look like `2026-10-19-142503-google-chrome.png`: a local
//! timestamp followed by a prefix describing the target.

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Timestamp layout for generated filenames
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// Lowercases `prefix` and replaces every character outside `[a-z0-9_-]`
/// with `-`.
///
/// ```
/// use look_core::util::filename::sanitize_prefix;
///
/// assert_eq!(sanitize_prefix("My App!"), "my-app-");
/// ```
pub fn sanitize_prefix(prefix: &str) -> String {
    prefix
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Chooses the filename prefix for a capture: `screen` for screen captures,
/// otherwise the app filter, the title filter, or `window`, in that order.
/// The result is already sanitized.
pub fn filename_prefix(screen: bool, app: Option<&str>, title: Option<&str>) -> String {
    let raw = if screen {
        "screen"
    } else {
        app.filter(|s| !s.is_empty())
            .or(title.filter(|s| !s.is_empty()))
            .unwrap_or("window")
    };
    sanitize_prefix(raw)
}

/// Builds `{timestamp}-{prefix}.png` for the given local time
pub fn generate_filename(prefix: &str, timestamp: NaiveDateTime) -> PathBuf {
    PathBuf::from(format!("{}-{}.png", timestamp.format(TIMESTAMP_FORMAT), prefix))
}

/// Creates the directory that will contain `path` if it does not exist yet.
///
/// Relative paths are resolved against the current directory first, so a
/// bare filename resolves to the current directory (which already exists).
/// Returns the absolute parent directory.
pub fn ensure_parent_dir(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let parent = absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));

    if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(&parent)?;
        tracing::trace!("ensured output directory {}", parent.display());
    }
    Ok(parent)
}

/// Formats a byte count with thousands separators (`1234567` → `1,234,567`)
pub fn format_byte_count(bytes: u64) -> String {
    let digits = bytes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
