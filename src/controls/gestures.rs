//! Pointer and touch gestures on the player area

use crate::surface::{TimerHost, TimerId};
use std::time::Duration;

/// Detects two clicks within a short window
#[derive(Debug)]
pub struct DoubleClickDetector {
    clicks: u8,
    timer: Option<TimerId>,
    window: Duration,
}

impl DoubleClickDetector {
    pub fn new(window: Duration) -> Self {
        Self {
            clicks: 0,
            timer: None,
            window,
        }
    }

    /// Register a click. Returns true when it completes a double click.
    pub fn click<T: TimerHost + ?Sized>(&mut self, timers: &mut T) -> bool {
        self.clicks += 1;
        if self.clicks == 1 {
            self.timer = Some(timers.set_timeout(self.window));
            return false;
        }

        self.cancel(timers);
        true
    }

    /// The click window ran out. Returns true when the timer was ours.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.timer == Some(id) {
            self.timer = None;
            self.clicks = 0;
            true
        } else {
            false
        }
    }

    pub fn cancel<T: TimerHost + ?Sized>(&mut self, timers: &mut T) {
        if let Some(id) = self.timer.take() {
            timers.clear_timeout(id);
        }
        self.clicks = 0;
    }
}

/// Horizontal swipe direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved left: seek forward
    Left,
    /// Finger moved right: seek backward
    Right,
}

/// Tracks one touch from start to end
#[derive(Debug)]
pub struct SwipeTracker {
    start_x: Option<f64>,
    threshold: f64,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            start_x: None,
            threshold,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the touch; short or unpaired touches yield nothing
    pub fn touch_end(&mut self, x: f64) -> Option<Swipe> {
        let start = self.start_x.take()?;
        let diff = start - x;
        if diff.abs() < self.threshold {
            return None;
        }
        Some(if diff > 0.0 { Swipe::Left } else { Swipe::Right })
    }
}
