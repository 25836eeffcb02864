//! Utility module for watchpage
//!
//! This module provides common utilities used throughout the crate:
//! - Error handling with custom error types
//! - Configuration management
//! - Time and file name formatting helpers

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{Config, ControlsConfig, DropdownConfig, GeneralConfig, GesturesConfig, ToastConfig};
pub use error::{IntoPageError, Result, WatchPageError};

/// Maximum length of a sanitized download file name
const MAX_FILENAME_LEN: usize = 100;

/// Format a playback position for display
///
/// Returns `M:SS`, or `H:MM:SS` when the value reaches an hour or
/// `show_hours` is set. Negative and non-finite inputs render as zero.
///
/// # Arguments
///
/// * `secs` - Position in seconds, rounded to the nearest second
/// * `show_hours` - Force the hour field
pub fn format_time(secs: f64, show_hours: bool) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return if show_hours { "0:00:00".to_string() } else { "0:00".to_string() };
    }

    let total = secs.round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if show_hours || hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Turn a display name into a safe download file stem
///
/// Anything outside `[A-Za-z0-9_-]` becomes `_`, runs of `_` collapse,
/// leading and trailing `_` are dropped and the result is capped at
/// 100 characters.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    out.trim_matches('_').chars().take(MAX_FILENAME_LEN).collect()
}

/// Estimate the size of a stream in megabytes from its resolution and duration
///
/// Uses a resolution-tiered bitrate guess since the page never sees the
/// real content length.
pub fn estimate_file_size_mb(width: u32, height: u32, duration_secs: f64) -> f64 {
    let pixels = width as u64 * height as u64;
    let mbps = if pixels > 1920 * 1080 {
        4.0
    } else if pixels > 1280 * 720 {
        2.5
    } else if pixels > 640 * 480 {
        1.5
    } else {
        1.0
    };

    let duration = if duration_secs.is_finite() && duration_secs > 0.0 { duration_secs } else { 0.0 };
    mbps / 8.0 * duration
}

/// Clamp a value between min and max
///
/// # Arguments
///
/// * `value` - Value to clamp
/// * `min` - Minimum value
/// * `max` - Maximum value
///
/// # Returns
///
/// The clamped value
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
