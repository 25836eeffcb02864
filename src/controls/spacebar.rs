//! Spacebar tap/hold detection
//!
//! A short press of Space toggles play/pause. Holding it past the
//! threshold boosts playback speed until the key is released, after which
//! the pre-hold speed and play state come back exactly.
//!
//! ```text
//! Idle --keydown--> PendingTap --threshold--> Held
//!                        |                      |
//!                        +--keyup (tap)--> Idle <--keyup (restore)
//! ```

use crate::surface::TimerId;
use log::debug;

/// Detector phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldPhase {
    Idle,
    /// Space is down and the threshold timer is running
    PendingTap,
    /// Threshold passed; playback is boosted
    Held {
        original_speed: f64,
        was_playing: bool,
    },
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldInput {
    KeyDown,
    /// The threshold timer fired; carries the player state at that moment
    ThresholdElapsed { speed: f64, paused: bool },
    KeyUp,
}

/// Side effects the caller performs after a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldAction {
    /// Start the threshold timer
    ArmTimer,
    /// Cancel the threshold timer if still pending
    CancelTimer,
    /// The press was a tap
    TogglePlay,
    /// Enter the boosted state
    Boost { speed: f64, start_playback: bool },
    /// Leave the boosted state
    Restore { speed: f64, pause: bool },
}

/// Pure transition function
///
/// Key-downs while a press is already in flight (auto-repeat) change
/// nothing. A threshold that fires outside `PendingTap` is stale and
/// ignored.
pub fn transition(phase: HoldPhase, input: HoldInput, boost_speed: f64) -> (HoldPhase, Vec<HoldAction>) {
    match (phase, input) {
        (HoldPhase::Idle, HoldInput::KeyDown) => (HoldPhase::PendingTap, vec![HoldAction::ArmTimer]),

        (HoldPhase::PendingTap, HoldInput::ThresholdElapsed { speed, paused }) => (
            HoldPhase::Held {
                original_speed: speed,
                was_playing: !paused,
            },
            vec![HoldAction::Boost {
                speed: boost_speed,
                start_playback: paused,
            }],
        ),

        (HoldPhase::PendingTap, HoldInput::KeyUp) => {
            (HoldPhase::Idle, vec![HoldAction::CancelTimer, HoldAction::TogglePlay])
        }

        (HoldPhase::Held { original_speed, was_playing }, HoldInput::KeyUp) => (
            HoldPhase::Idle,
            vec![HoldAction::Restore {
                speed: original_speed,
                pause: !was_playing,
            }],
        ),

        (HoldPhase::Idle, HoldInput::KeyUp) => (HoldPhase::Idle, vec![HoldAction::CancelTimer]),

        (phase, _) => (phase, Vec::new()),
    }
}

/// Stateful wrapper around [`transition`] that remembers the threshold timer
#[derive(Debug)]
pub struct HoldDetector {
    phase: HoldPhase,
    timer: Option<TimerId>,
    boost_speed: f64,
}

impl HoldDetector {
    pub fn new(boost_speed: f64) -> Self {
        Self {
            phase: HoldPhase::Idle,
            timer: None,
            boost_speed,
        }
    }

    /// Feed one input and get back the actions to perform
    pub fn handle(&mut self, input: HoldInput) -> Vec<HoldAction> {
        let (next, actions) = transition(self.phase, input, self.boost_speed);
        if next != self.phase {
            debug!("Spacebar {:?} -> {:?}", self.phase, next);
        }
        self.phase = next;
        actions
    }

    /// Remember the timer armed for the current press
    pub fn arm(&mut self, id: TimerId) {
        self.timer = Some(id);
    }

    /// Take the pending timer so the caller can cancel it
    pub fn disarm(&mut self) -> Option<TimerId> {
        self.timer.take()
    }

    /// Whether a fired timer is the one this detector armed
    pub fn owns_timer(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// Drop back to idle without performing any actions
    pub fn reset(&mut self) -> Option<TimerId> {
        self.phase = HoldPhase::Idle;
        self.timer.take()
    }

    pub fn phase(&self) -> HoldPhase {
        self.phase
    }

    /// Space is down and has not yet become a hold
    pub fn is_tap(&self) -> bool {
        matches!(self.phase, HoldPhase::PendingTap)
    }

    pub fn is_held(&self) -> bool {
        matches!(self.phase, HoldPhase::Held { .. })
    }
}
