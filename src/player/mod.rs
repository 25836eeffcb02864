//! Media player facade for watchpage
//!
//! The page embeds a third-party player widget. This module describes
//! the slice of it the coordinator drives: transport, position, volume,
//! rate, fullscreen and the events it emits.

pub mod metadata;
pub mod simulated;

pub use metadata::VideoMetadata;
pub use simulated::SimulatedPlayer;

use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Player trait defining the media player interface
pub trait MediaPlayer {
    /// Current playback position in seconds
    fn position(&self) -> f64;

    /// Seek to `secs`
    fn set_position(&mut self, secs: f64);

    /// Media duration in seconds; NaN or zero while unknown
    fn duration(&self) -> f64;

    /// Volume level (0.0 to 1.0)
    fn volume(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    fn is_muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    /// Playback rate (1.0 = normal)
    fn speed(&self) -> f64;

    fn set_speed(&mut self, speed: f64);

    /// Intrinsic video size; zeros until metadata has loaded
    fn video_dimensions(&self) -> (u32, u32);

    fn is_paused(&self) -> bool;

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Toggle play/pause
    fn toggle_play(&mut self) {
        if self.is_paused() {
            self.play();
        } else {
            self.pause();
        }
    }

    fn toggle_fullscreen(&mut self);

    /// Point the player at `url` again and reload it
    fn reload_source(&mut self, url: &str) -> Result<()>;
}

/// Events emitted by the player widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerEvent {
    /// Widget finished setting up
    Ready,
    /// Source started loading
    LoadStart,
    /// Duration and dimensions are known
    LoadedMetadata,
    /// Enough data buffered to start
    CanPlay,
    /// Playback actually started
    Playing,
    /// Media error with the element's error code
    Error { code: u16 },
}

/// User-facing message for a media error code
pub fn playback_error_message(code: u16) -> &'static str {
    match code {
        1 => "The video playback was aborted.",
        2 => "Network error. Please check your connection.",
        3 => "Video decoding failed. The format may not be supported.",
        4 => "The video is not available or has been removed.",
        _ => "Unknown error occurred. Please try again.",
    }
}
