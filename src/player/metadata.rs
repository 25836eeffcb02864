//! Video metadata shown beside the player

use crate::player::MediaPlayer;
use crate::utils::{estimate_file_size_mb, format_time};

/// Display strings for the metadata panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub duration: String,
    pub resolution: String,
    pub file_size: String,
}

impl VideoMetadata {
    /// Read duration and dimensions from the player
    pub fn from_player<P: MediaPlayer + ?Sized>(player: &P) -> Self {
        let (width, height) = player.video_dimensions();
        Self::new(player.duration(), width, height)
    }

    pub fn new(duration_secs: f64, width: u32, height: u32) -> Self {
        let known_duration = duration_secs.is_finite() && duration_secs > 0.0;

        let duration = if known_duration {
            format_time(duration_secs, duration_secs >= 3600.0)
        } else {
            "Loading...".to_string()
        };

        let resolution = if width > 0 && height > 0 {
            format!("{}x{}", width, height)
        } else {
            "N/A".to_string()
        };

        let file_size = if known_duration && width > 0 && height > 0 {
            format!("~{:.1} MB", estimate_file_size_mb(width, height, duration_secs))
        } else {
            "N/A".to_string()
        };

        Self {
            duration,
            resolution,
            file_size,
        }
    }
}
