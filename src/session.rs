//! Scripted page sessions
//!
//! A session is a JSON list of input steps (key presses, clicks, swipes,
//! player events and waits) replayed against a [`HeadlessSurface`]. Waits
//! advance the surface's virtual clock and fire whatever timers fall due,
//! so a replay is deterministic.

use crate::controls::{Theme, ToastKind};
use crate::coordinator::{Lifecycle, PlaybackCoordinator, STREAM_MENU};
use crate::launch::ExternalPlayer;
use crate::player::{MediaPlayer, PlayerEvent, SimulatedPlayer};
use crate::storage::PreferenceStore;
use crate::surface::{
    ClickEvent, Control, HeadlessSurface, Key, KeyEvent, KeyModifiers, PageEffect, Rect, TargetKind,
};
use crate::utils::error::{IntoPageError, Result, WatchPageError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Page address used when a session names none
pub const DEMO_PAGE_URL: &str = "https://media.example.com/watch/4f2a9c/Big_Buck_Bunny.mp4";

/// One input step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SessionStep {
    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: KeyModifiers,
        #[serde(default)]
        target: TargetKind,
    },
    KeyUp {
        key: Key,
        #[serde(default)]
        modifiers: KeyModifiers,
        #[serde(default)]
        target: TargetKind,
    },
    /// Let `ms` milliseconds pass
    Wait { ms: u64 },
    Control { control: Control },
    Click {
        #[serde(default)]
        target: TargetKind,
        #[serde(default)]
        dropdown: Option<String>,
    },
    /// Touch swipe from `from` to `to` (screen x)
    Swipe { from: f64, to: f64 },
    Player { event: PlayerEvent },
}

/// Media the simulated player pretends to hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaFixture {
    pub duration_secs: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for MediaFixture {
    fn default() -> Self {
        Self {
            duration_secs: 596.0,
            width: 1920,
            height: 1080,
        }
    }
}

/// A complete scripted session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub page_url: Option<String>,
    /// Text of the file name heading
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub media: MediaFixture,
    pub steps: Vec<SessionStep>,
}

impl Session {
    /// Read a session from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let session: Session = serde_json::from_str(&data).session_err("Parsing session file")?;
        if session.steps.is_empty() {
            return Err(WatchPageError::Session(format!("{:?} contains no steps", path)));
        }
        info!("Loaded session with {} step(s) from {:?}", session.steps.len(), path);
        Ok(session)
    }

    pub fn page_url(&self) -> &str {
        self.page_url.as_deref().unwrap_or(DEMO_PAGE_URL)
    }

    /// Headless page laid out for this session: the file name heading and
    /// the stream menu below the player
    pub fn surface(&self) -> HeadlessSurface {
        let mut surface = HeadlessSurface::new(self.page_url());
        surface.set_file_name_text(self.file_name.as_deref());
        surface.add_dropdown(STREAM_MENU, Rect { top: 520.0, bottom: 560.0 }, 0.0, ExternalPlayer::ALL.len());
        surface
    }

    /// Player loaded with this session's media
    pub fn player(&self) -> SimulatedPlayer {
        SimulatedPlayer::new(self.media.duration_secs, (self.media.width, self.media.height))
    }

    /// Built-in walkthrough of the page's controls
    pub fn demo() -> Self {
        let key = |key: Key| SessionStep::KeyDown {
            key,
            modifiers: KeyModifiers::default(),
            target: TargetKind::Page,
        };
        let key_up = |key: Key| SessionStep::KeyUp {
            key,
            modifiers: KeyModifiers::default(),
            target: TargetKind::Page,
        };
        let ctrl = |c: char| SessionStep::KeyDown {
            key: Key::Char(c),
            modifiers: KeyModifiers { ctrl: true, ..Default::default() },
            target: TargetKind::Page,
        };
        let wait = |ms: u64| SessionStep::Wait { ms };
        let player_click = || SessionStep::Click {
            target: TargetKind::Player,
            dropdown: None,
        };

        Self {
            page_url: None,
            file_name: Some("Big Buck Bunny".to_string()),
            media: MediaFixture::default(),
            steps: vec![
                SessionStep::Player { event: PlayerEvent::Ready },
                // Tap
                key(Key::Space),
                wait(120),
                key_up(Key::Space),
                wait(1000),
                // Hold
                key(Key::Space),
                wait(400),
                key(Key::Space),
                wait(1500),
                key_up(Key::Space),
                wait(1000),
                key(Key::Right),
                key(Key::Up),
                key(Key::Char('m')),
                wait(1000),
                player_click(),
                wait(100),
                player_click(),
                wait(2000),
                player_click(),
                wait(100),
                player_click(),
                wait(2000),
                SessionStep::Swipe { from: 300.0, to: 120.0 },
                ctrl('s'),
                key(Key::Down),
                key(Key::Escape),
                SessionStep::Control { control: Control::StreamMenu },
                SessionStep::Control { control: Control::PlayerCard("vlc-pc".to_string()) },
                wait(3000),
                SessionStep::Control { control: Control::CopyLink },
                wait(3000),
                ctrl('d'),
                wait(3000),
                SessionStep::Control { control: Control::ThemeToggle },
                SessionStep::Player { event: PlayerEvent::Error { code: 2 } },
                SessionStep::Control { control: Control::RetryPlayback },
                SessionStep::Player { event: PlayerEvent::Playing },
            ],
        }
    }
}

/// What a replay did to the page
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub steps: usize,
    pub elapsed: Duration,
    pub lifecycle: Lifecycle,
    pub theme: Theme,
    pub toasts: Vec<(String, ToastKind)>,
    pub effects: Vec<PageEffect>,
    pub pending_timers: usize,
}

impl SessionReport {
    /// Number of toasts of `kind` shown during the replay
    pub fn toasts_of(&self, kind: ToastKind) -> usize {
        self.toasts.iter().filter(|(_, k)| *k == kind).count()
    }
}

/// Let `by` pass on the virtual clock, firing every timer that falls due
pub fn advance<P, St>(coordinator: &mut PlaybackCoordinator<HeadlessSurface, P, St>, by: Duration)
where
    P: MediaPlayer,
    St: PreferenceStore,
{
    let until = coordinator.surface().now() + by;
    while let Some(id) = coordinator.surface_mut().pop_due(until) {
        coordinator.on_timer(id);
    }
    coordinator.surface_mut().set_now(until);
}

/// Feed one step to the coordinator. Waits advance the virtual clock.
pub fn apply_step<P, St>(coordinator: &mut PlaybackCoordinator<HeadlessSurface, P, St>, step: &SessionStep)
where
    P: MediaPlayer,
    St: PreferenceStore,
{
    debug!("Step {:?}", step);
    match step {
        SessionStep::KeyDown { key, modifiers, target } => {
            let event = KeyEvent::new(*key).with_modifiers(*modifiers).on(*target);
            let response = coordinator.handle_key_down(event);
            debug!("  -> {:?}", response);
        }
        SessionStep::KeyUp { key, modifiers, target } => {
            let event = KeyEvent::new(*key).with_modifiers(*modifiers).on(*target);
            coordinator.handle_key_up(event);
        }
        SessionStep::Wait { ms } => advance(coordinator, Duration::from_millis(*ms)),
        SessionStep::Control { control } => coordinator.handle_control(control.clone()),
        SessionStep::Click { target, dropdown } => coordinator.handle_click(ClickEvent {
            target: *target,
            dropdown: dropdown.clone(),
        }),
        SessionStep::Swipe { from, to } => {
            coordinator.handle_touch_start(*from);
            coordinator.handle_touch_end(*to);
        }
        SessionStep::Player { event } => coordinator.on_player_event(*event),
    }
}

/// Replay every step on the virtual clock
pub fn replay<P, St>(coordinator: &mut PlaybackCoordinator<HeadlessSurface, P, St>, steps: &[SessionStep]) -> SessionReport
where
    P: MediaPlayer,
    St: PreferenceStore,
{
    let start = coordinator.surface().now();
    for step in steps {
        apply_step(coordinator, step);
    }
    report(coordinator, steps.len(), start)
}

/// Replay with waits also taking real time
pub async fn replay_realtime<P, St>(
    coordinator: &mut PlaybackCoordinator<HeadlessSurface, P, St>,
    steps: &[SessionStep],
) -> SessionReport
where
    P: MediaPlayer,
    St: PreferenceStore,
{
    let start = coordinator.surface().now();
    for step in steps {
        if let SessionStep::Wait { ms } = step {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        apply_step(coordinator, step);
    }
    report(coordinator, steps.len(), start)
}

fn report<P, St>(coordinator: &PlaybackCoordinator<HeadlessSurface, P, St>, steps: usize, start: Duration) -> SessionReport
where
    P: MediaPlayer,
    St: PreferenceStore,
{
    let surface = coordinator.surface();
    SessionReport {
        steps,
        elapsed: surface.now().saturating_sub(start),
        lifecycle: coordinator.lifecycle(),
        theme: coordinator.theme(),
        toasts: surface.toast_history().to_vec(),
        effects: surface.effects().to_vec(),
        pending_timers: surface.pending_timers(),
    }
}
