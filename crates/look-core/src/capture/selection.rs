//! Window filtering and target selection
//!
//! Selection happens in two passes:
//!
//! 1. **Inclusion rule** - only ordinary windows ([`NORMAL_WINDOW_LAYER`]) of
//!    at least [`MIN_WINDOW_WIDTH`] x [`MIN_WINDOW_HEIGHT`] are candidates.
//!    This drops menus, the Dock, popovers, tooltips and inspector panels.
//! 2. **User filters** - case-insensitive substring match on the owning app
//!    and on the title. When both are given, both must match (AND semantics).
//!    Windows the OS reported without a title never match a title filter;
//!    their `(untitled)` placeholder is display-only.
//!
//! Surviving windows keep enumeration order. No ranking is applied: the first
//! survivor is the capture target. On macOS the window server reports windows
//! front-to-back, so this is usually the frontmost match, but that ordering is
//! best-effort rather than a documented contract.

use crate::capture::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, NORMAL_WINDOW_LAYER};
use crate::model::{WindowFilter, WindowInfo};

/// Returns true if the window is a primary application window worth capturing
pub fn is_capturable(window: &WindowInfo) -> bool {
    window.layer == NORMAL_WINDOW_LAYER
        && window.width >= MIN_WINDOW_WIDTH
        && window.height >= MIN_WINDOW_HEIGHT
}

/// Pre-lowercased filter so each window costs one lowercase per field
#[derive(Debug)]
struct PreparedFilter {
    app:   Option<String>,
    title: Option<String>,
}

impl PreparedFilter {
    fn new(filter: &WindowFilter) -> Self {
        Self {
            app:   filter.app.as_deref().map(str::to_lowercase),
            title: filter.title.as_deref().map(str::to_lowercase),
        }
    }

    fn matches(&self, window: &WindowInfo) -> bool {
        if let Some(ref app) = self.app {
            if !window.app.to_lowercase().contains(app.as_str()) {
                return false;
            }
        }

        if let Some(ref title) = self.title {
            if window.untitled || !window.title.to_lowercase().contains(title.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Applies the inclusion rule and the user filters, preserving input order.
///
/// An empty result is not an error here; callers decide how to report it.
///
/// # Examples
///
/// ```
/// use look_core::capture::selection::select_windows;
/// use look_core::model::{WindowFilter, WindowInfo};
///
/// let windows = vec![
///     WindowInfo::new(1, "Google Chrome", "Inbox", (0, 0), (1400, 900), 0),
///     WindowInfo::new(2, "Finder", "Downloads", (0, 0), (900, 600), 0),
/// ];
///
/// let chrome = select_windows(&windows, &WindowFilter::by_app("chrome"));
/// assert_eq!(chrome.len(), 1);
/// assert_eq!(chrome[0].id, 1);
/// ```
pub fn select_windows(windows: &[WindowInfo], filter: &WindowFilter) -> Vec<WindowInfo> {
    let prepared = PreparedFilter::new(filter);

    let selected: Vec<WindowInfo> = windows
        .iter()
        .filter(|window| is_capturable(window))
        .filter(|window| prepared.matches(window))
        .cloned()
        .collect();

    tracing::debug!(
        total = windows.len(),
        selected = selected.len(),
        filter = %filter.describe(),
        "window selection complete"
    );

    selected
}

/// Returns the capture target: the first window surviving [`select_windows`].
///
/// Multiple matches are not disambiguated; the first one wins.
pub fn first_match(windows: &[WindowInfo], filter: &WindowFilter) -> Option<WindowInfo> {
    let prepared = PreparedFilter::new(filter);

    let found = windows
        .iter()
        .find(|window| is_capturable(window) && prepared.matches(window))
        .cloned();

    match &found {
        Some(window) => tracing::debug!(
            "matched window {} (app: '{}', title: '{}')",
            window.id,
            window.app,
            window.title
        ),
        None => tracing::debug!("no window matched {:?}", filter),
    }

    found
}
