//! Centralized thresholds and configuration constants for window capture.
//!
//! # Runtime Configuration
//!
//! Defaults can be overridden at runtime via environment variables:
//!
//! | Environment Variable | Default | Description |
//! |---------------------|---------|-------------|
//! | `LOOK_MAX_SIZE` | 1568 | Default bound on the larger image dimension |
//! | `LOOK_SCREENCAPTURE_BIN` | `screencapture` | Capture utility to invoke |
//! | `LOOK_SIPS_BIN` | `sips` | Resize utility to invoke |
//!
//! The window inclusion thresholds are not configurable. They exclude
//! popovers, web inspectors and small utility panels, which are never useful
//! capture targets.

/// Stacking layer of ordinary application windows.
///
/// Menus, the Dock, status items and overlays all live on non-zero layers.
pub const NORMAL_WINDOW_LAYER: i32 = 0;

/// Minimum window width (in points) for a window to be a capture candidate.
pub const MIN_WINDOW_WIDTH: i32 = 600;

/// Minimum window height (in points) for a window to be a capture candidate.
pub const MIN_WINDOW_HEIGHT: i32 = 400;

/// Default bound on the larger dimension of a captured image.
///
/// 1568px keeps screenshots legible while staying within the image size that
/// vision models ingest without further downscaling.
pub const DEFAULT_MAX_SIZE: u32 = 1568;

/// macOS screen/window capture utility.
pub const SCREENCAPTURE_BIN: &str = "screencapture";

/// macOS scriptable image processing utility.
pub const SIPS_BIN: &str = "sips";

// =============================================================================
// Environment Variable Overrides
// =============================================================================

fn get_from_env<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    std::env::var(env_var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn get_program_from_env(env_var: &str, default: &str) -> String {
    std::env::var(env_var)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Get the default max image size, checking environment variable override.
///
/// Override with: `LOOK_MAX_SIZE`
///
/// # Example
///
/// ```bash
/// # Keep captures small for chat attachments
/// export LOOK_MAX_SIZE=1024
/// ```
pub fn default_max_size() -> u32 {
    get_from_env("LOOK_MAX_SIZE", DEFAULT_MAX_SIZE)
}

/// Get the capture utility, checking environment variable override.
///
/// Override with: `LOOK_SCREENCAPTURE_BIN`
pub fn screencapture_program() -> String {
    get_program_from_env("LOOK_SCREENCAPTURE_BIN", SCREENCAPTURE_BIN)
}

/// Get the resize utility, checking environment variable override.
///
/// Override with: `LOOK_SIPS_BIN`
pub fn sips_program() -> String {
    get_program_from_env("LOOK_SIPS_BIN", SIPS_BIN)
}
