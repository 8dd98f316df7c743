//! Data models and type definitions for look-core
//!
//! This module defines the core types used throughout the library:
//! - Window metadata as delivered by the OS ([`RawWindowRecord`]) and as
//!   consumed by the selector ([`WindowInfo`])
//! - User-supplied window filters ([`WindowFilter`])
//! - Capture targets

use serde::{Deserialize, Serialize};

/// Opaque platform window identifier (CoreGraphics window number on macOS)
pub type WindowId = u32;

/// Title shown for windows that report no title
pub const UNTITLED_PLACEHOLDER: &str = "(untitled)";

/// A window record exactly as the windowing system reported it.
///
/// Every field is optional because the OS omits keys freely (untitled
/// windows, windows owned by daemons, records without bounds). Defaults are
/// applied once, in [`WindowInfo::from_raw`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWindowRecord {
    pub number:     Option<i64>,
    pub owner_name: Option<String>,
    pub name:       Option<String>,
    pub layer:      Option<i64>,
    pub x:          Option<f64>,
    pub y:          Option<f64>,
    pub width:      Option<f64>,
    pub height:     Option<f64>,
}

/// Metadata about a single on-screen (or off-screen) application window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Platform window identifier, unique among open windows at query time
    pub id:       WindowId,
    /// Owning application name (may be empty)
    pub app:      String,
    /// Window title, `(untitled)` when the OS reports none
    pub title:    String,
    /// Set when the OS reported no title; `title` then holds the placeholder
    /// and title filters never match
    #[serde(skip)]
    pub untitled: bool,
    pub width:    i32,
    pub height:   i32,
    pub x:        i32,
    pub y:        i32,
    /// Stacking layer; 0 is an ordinary application window
    pub layer:    i32,
}

impl WindowInfo {
    /// Creates a WindowInfo; an empty `title` is stored as the placeholder
    pub fn new(
        id: WindowId,
        app: impl Into<String>,
        title: impl Into<String>,
        (x, y): (i32, i32),
        (width, height): (i32, i32),
        layer: i32,
    ) -> Self {
        let (title, untitled) = normalize_title(Some(title.into()));
        Self {
            id,
            app: app.into(),
            title,
            untitled,
            width,
            height,
            x,
            y,
            layer,
        }
    }

    /// Converts a sparse OS record, defaulting every missing field.
    ///
    /// Missing owner becomes an empty string, a missing or empty title becomes
    /// [`UNTITLED_PLACEHOLDER`], and missing numeric fields become 0.
    /// Fractional bounds are truncated toward zero.
    pub fn from_raw(raw: RawWindowRecord) -> Self {
        let (title, untitled) = normalize_title(raw.name);

        Self {
            id: raw
                .number
                .and_then(|n| WindowId::try_from(n).ok())
                .unwrap_or(0),
            app: raw.owner_name.unwrap_or_default(),
            title,
            untitled,
            width: truncate(raw.width),
            height: truncate(raw.height),
            x: truncate(raw.x),
            y: truncate(raw.y),
            layer: raw
                .layer
                .and_then(|l| i32::try_from(l).ok())
                .unwrap_or(0),
        }
    }

    /// Human-readable `app - title (WxH)` description used in status output
    pub fn describe(&self) -> String {
        format!("{} - {} ({}x{})", self.app, self.title, self.width, self.height)
    }
}

fn normalize_title(name: Option<String>) -> (String, bool) {
    match name {
        Some(name) if !name.is_empty() => (name, false),
        _ => (UNTITLED_PLACEHOLDER.to_string(), true),
    }
}

fn truncate(value: Option<f64>) -> i32 {
    // `as` saturates and maps NaN to 0
    value.map(|v| v as i32).unwrap_or(0)
}

/// User-supplied substring filters. Both are case-insensitive and combine
/// with AND semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowFilter {
    /// Substring of the owning application name
    pub app:   Option<String>,
    /// Substring of the window title
    pub title: Option<String>,
}

impl WindowFilter {
    /// Creates a filter from optional app and title substrings.
    ///
    /// Empty strings count as absent filters.
    pub fn new(app: Option<String>, title: Option<String>) -> Self {
        Self {
            app:   app.filter(|s| !s.is_empty()),
            title: title.filter(|s| !s.is_empty()),
        }
    }

    /// Filter matching only by application name
    pub fn by_app(app: impl Into<String>) -> Self {
        Self::new(Some(app.into()), None)
    }

    /// Filter matching only by window title
    pub fn by_title(title: impl Into<String>) -> Self {
        Self::new(None, Some(title.into()))
    }

    /// Returns true when no filter is active
    pub fn is_empty(&self) -> bool {
        self.app.is_none() && self.title.is_none()
    }

    /// Renders the active filters as `app='X', title='Y'`.
    ///
    /// Returns an empty string when no filter is active.
    pub fn describe(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(app) = &self.app {
            parts.push(format!("app='{app}'"));
        }
        if let Some(title) = &self.title {
            parts.push(format!("title='{title}'"));
        }
        parts.join(", ")
    }
}

/// What a capture command is aimed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTarget {
    /// The whole screen, optionally restricted to the primary display
    Screen { primary_display_only: bool },
    /// A single window selected by the filter
    Window(WindowInfo),
}

impl std::fmt::Display for CaptureTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureTarget::Screen {
                primary_display_only: true,
            } => write!(f, "primary display"),
            CaptureTarget::Screen {
                primary_display_only: false,
            } => write!(f, "all displays"),
            CaptureTarget::Window(window) => write!(f, "{}", window.describe()),
        }
    }
}
