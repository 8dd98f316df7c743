//! look-core: window enumeration, selection and capture for the `look` CLI
//!
//! This library lists application windows through the host windowing system,
//! picks a capture target by application name and title, and drives the OS
//! capture and resize utilities. Pixel work is never done here: capture and
//! resampling are delegated to `screencapture` and `sips` on macOS.

pub mod capture;
pub mod error;
pub mod model;
pub mod session;
pub mod util;
