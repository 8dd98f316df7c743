//! Utility modules for look-core
//!
//! This module contains helpers that sit outside the capture pipeline:
//! - `filename`: generated output names, directory creation and byte formatting

pub mod filename;
