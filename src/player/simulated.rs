//! Deterministic in-memory player
//!
//! Used by the CLI to replay sessions and by tests. Time does not advance
//! on its own; position only moves through seeks.

use crate::player::MediaPlayer;
use crate::utils::clamp;
use crate::utils::error::{Result, WatchPageError};
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPlayer {
    position: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    speed: f64,
    paused: bool,
    fullscreen: bool,
    dimensions: (u32, u32),
    source: Option<String>,
    fail_reload: bool,
    toggle_count: u32,
}

impl SimulatedPlayer {
    pub fn new(duration: f64, dimensions: (u32, u32)) -> Self {
        Self {
            position: 0.0,
            duration,
            volume: 1.0,
            muted: false,
            speed: 1.0,
            paused: true,
            fullscreen: false,
            dimensions,
            source: None,
            fail_reload: false,
            toggle_count: 0,
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Last source passed to [`MediaPlayer::reload_source`]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// How many times play/pause was toggled
    pub fn toggle_count(&self) -> u32 {
        self.toggle_count
    }

    /// Make source reloads fail
    pub fn fail_reload(&mut self, fail: bool) {
        self.fail_reload = fail;
    }
}

impl MediaPlayer for SimulatedPlayer {
    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, secs: f64) {
        self.position = clamp(secs, 0.0, self.duration.max(0.0));
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = clamp(volume, 0.0, 1.0);
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn speed(&self) -> f64 {
        self.speed
    }

    fn set_speed(&mut self, speed: f64) {
        debug!("Simulated player speed {:.2}x", speed);
        self.speed = speed;
    }

    fn video_dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn toggle_play(&mut self) {
        self.toggle_count += 1;
        self.paused = !self.paused;
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    fn reload_source(&mut self, url: &str) -> Result<()> {
        if self.fail_reload {
            return Err(WatchPageError::player_error("source rejected"));
        }
        self.source = Some(url.to_string());
        self.position = 0.0;
        Ok(())
    }
}
