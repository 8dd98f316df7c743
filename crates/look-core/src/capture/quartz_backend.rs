//! macOS window enumeration via Quartz Window Services
//!
//! Uses `CGWindowListCopyWindowInfo` to obtain one dictionary per window.
//! The dictionaries are sparse (untitled windows omit `kCGWindowName`, some
//! system windows omit the owner), so each one is decoded into a
//! [`RawWindowRecord`] with optional fields and normalized by
//! [`WindowInfo::from_raw`].
//!
//! Reading window titles requires Screen Recording permission on macOS
//! 10.15+. Without it titles come back empty and render as `(untitled)`.

use async_trait::async_trait;
use core_foundation::base::{CFType, TCFType};
use core_foundation::dictionary::CFDictionary;
use core_foundation::number::CFNumber;
use core_foundation::string::{CFString, CFStringRef};
use core_graphics::geometry::CGRect;
use core_graphics::window::{
    copy_window_info, kCGNullWindowID, kCGWindowBounds, kCGWindowLayer, kCGWindowListOptionAll,
    kCGWindowListOptionOnScreenOnly, kCGWindowName, kCGWindowNumber, kCGWindowOwnerName,
};

use super::traits::WindowEnumerator;
use crate::error::{CaptureError, CaptureResult};
use crate::model::{RawWindowRecord, WindowInfo};

/// Window enumerator backed by CoreGraphics
#[derive(Debug, Clone, Copy, Default)]
pub struct QuartzEnumerator;

impl QuartzEnumerator {
    /// Creates a new QuartzEnumerator
    pub fn new() -> Self {
        Self
    }

    /// Queries the window server synchronously
    fn enumerate_sync(include_off_screen: bool) -> CaptureResult<Vec<RawWindowRecord>> {
        let options = if include_off_screen {
            kCGWindowListOptionAll
        } else {
            kCGWindowListOptionOnScreenOnly
        };

        let list = copy_window_info(options, kCGNullWindowID).ok_or_else(|| {
            CaptureError::EnumerationFailed {
                reason: "CGWindowListCopyWindowInfo returned NULL".to_string(),
            }
        })?;

        let mut records = Vec::with_capacity(list.len() as usize);
        for item in list.iter() {
            let raw = *item;
            if raw.is_null() {
                continue;
            }
            // SAFETY: every element of the window list is a CFDictionary owned
            // by `list`; the get rule retains it for the lifetime of `dict`.
            let dict: CFDictionary<CFString, CFType> =
                unsafe { CFDictionary::wrap_under_get_rule(raw as _) };
            records.push(decode_record(&dict));
        }

        Ok(records)
    }
}

fn key(name: CFStringRef) -> CFString {
    // SAFETY: the kCGWindow* keys are immutable CFString constants exported
    // by CoreGraphics.
    unsafe { CFString::wrap_under_get_rule(name) }
}

fn string_value(dict: &CFDictionary<CFString, CFType>, name: CFStringRef) -> Option<String> {
    dict.find(&key(name))
        .and_then(|value| value.downcast::<CFString>())
        .map(|s| s.to_string())
}

fn int_value(dict: &CFDictionary<CFString, CFType>, name: CFStringRef) -> Option<i64> {
    dict.find(&key(name))
        .and_then(|value| value.downcast::<CFNumber>())
        .and_then(|n| n.to_i64())
}

fn bounds_value(dict: &CFDictionary<CFString, CFType>) -> Option<CGRect> {
    // SAFETY: reading an exported CoreGraphics constant
    let bounds_key = unsafe { kCGWindowBounds };
    let value = dict.find(&key(bounds_key))?;
    let bounds = value.downcast::<CFDictionary>()?;
    CGRect::from_dict_representation(&bounds)
}

fn decode_record(dict: &CFDictionary<CFString, CFType>) -> RawWindowRecord {
    // SAFETY: reading exported CoreGraphics constants
    let (number_key, owner_key, name_key, layer_key) =
        unsafe { (kCGWindowNumber, kCGWindowOwnerName, kCGWindowName, kCGWindowLayer) };

    let bounds = bounds_value(dict);

    RawWindowRecord {
        number:     int_value(dict, number_key),
        owner_name: string_value(dict, owner_key),
        name:       string_value(dict, name_key),
        layer:      int_value(dict, layer_key),
        x:          bounds.map(|b| b.origin.x),
        y:          bounds.map(|b| b.origin.y),
        width:      bounds.map(|b| b.size.width),
        height:     bounds.map(|b| b.size.height),
    }
}

#[async_trait]
impl WindowEnumerator for QuartzEnumerator {
    async fn list_windows(&self, include_off_screen: bool) -> CaptureResult<Vec<WindowInfo>> {
        let records = Self::enumerate_sync(include_off_screen)?;
        let windows: Vec<WindowInfo> = records.into_iter().map(WindowInfo::from_raw).collect();
        tracing::debug!(
            count = windows.len(),
            include_off_screen,
            "enumerated windows via Quartz"
        );
        Ok(windows)
    }
}
